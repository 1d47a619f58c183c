use std::io;

use thiserror::Error;

/// Failures on the sandbox side of an execution, as opposed to the executed
/// program exiting non-zero. These never leave [`crate::Sandbox::execute`];
/// they become internal-error results.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("Error: unsupported language")]
    UnsupportedLanguage(String),
    #[error("Error: could not create file")]
    CreateFile(#[source] io::Error),
    #[error("Error: could not write to file")]
    WriteFile(#[source] io::Error),
}

/// A hide policy name that is not one of `all`, `all-but-last`, `none`.
#[derive(Debug, Error)]
#[error("unknown hide policy '{0}' (expected all, all-but-last or none)")]
pub struct UnknownPolicy(pub String);
