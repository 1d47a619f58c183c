use std::path::Path;

/// Values substituted into command templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    /// `<file>`: absolute path of the source file.
    pub file: String,
    /// `<name>`: file name without directory and extension.
    pub name: String,
    /// `<path>`: directory containing the source file.
    pub path: String,
}

impl Placeholders {
    pub fn for_file(file: &Path) -> Self {
        Placeholders {
            file: file.to_string_lossy().into_owned(),
            name: file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: file
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "<file>" => Some(&self.file),
            "<name>" => Some(&self.name),
            "<path>" => Some(&self.path),
            _ => None,
        }
    }

    /// Substitute every placeholder in `template`. Substituted text is never
    /// scanned again, so paths that happen to contain `<name>` stay intact.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('<') {
            out.push_str(&rest[..open]);
            rest = &rest[open..];
            let replaced = rest
                .find('>')
                .and_then(|close| self.lookup(&rest[..=close]).map(|value| (close, value)));
            match replaced {
                Some((close, value)) => {
                    out.push_str(value);
                    rest = &rest[close + 1..];
                }
                None => {
                    out.push('<');
                    rest = &rest[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Render every argument of one command.
    pub fn render_command(&self, command: &[String]) -> Vec<String> {
        command.iter().map(|arg| self.render(arg)).collect()
    }
}
