use std::fmt;
use std::str::FromStr;

use crate::error::UnknownPolicy;
use crate::executor::ExecutionResult;

/// Which internal-error results of a slide's batch are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HidePolicy {
    /// Hide every internal error.
    #[default]
    All,
    /// Hide internal errors except for the last block of the slide.
    AllButLast,
    /// Show everything.
    None,
}

impl HidePolicy {
    /// Filter one slide's results, in block order. Results of programs that
    /// actually ran are always kept.
    pub fn filter(self, results: Vec<ExecutionResult>) -> Vec<ExecutionResult> {
        let last = results.len().saturating_sub(1);
        results
            .into_iter()
            .enumerate()
            .filter(|(i, result)| {
                if !result.is_internal_error() {
                    return true;
                }
                match self {
                    HidePolicy::All => false,
                    HidePolicy::AllButLast => *i == last,
                    HidePolicy::None => true,
                }
            })
            .map(|(_, result)| result)
            .collect()
    }
}

impl FromStr for HidePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(HidePolicy::All),
            "all-but-last" | "allbutlast" => Ok(HidePolicy::AllButLast),
            "none" => Ok(HidePolicy::None),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for HidePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HidePolicy::All => write!(f, "all"),
            HidePolicy::AllButLast => write!(f, "all-but-last"),
            HidePolicy::None => write!(f, "none"),
        }
    }
}
