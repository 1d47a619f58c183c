use std::collections::HashMap;

/// Wraps snippets that lack a program entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWrapper {
    /// Code containing this text already has an entry point.
    pub marker: String,
    pub before: String,
    pub after: String,
}

/// How to run code written in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainSpec {
    /// Extension of the source file, without the dot.
    pub extension: String,
    /// Commands run in order. Arguments may contain `<file>`, `<name>`
    /// and `<path>`.
    pub commands: Vec<Vec<String>>,
    pub entry: Option<EntryWrapper>,
}

impl ToolchainSpec {
    pub fn new(extension: &str, commands: &[&[&str]]) -> Self {
        ToolchainSpec {
            extension: extension.to_string(),
            commands: commands
                .iter()
                .map(|c| c.iter().map(|a| a.to_string()).collect())
                .collect(),
            entry: None,
        }
    }

    pub fn with_entry(mut self, marker: &str, before: &str, after: &str) -> Self {
        self.entry = Some(EntryWrapper {
            marker: marker.to_string(),
            before: before.to_string(),
            after: after.to_string(),
        });
        self
    }

    /// The source text written to disk for `code`.
    pub fn prepare(&self, code: &str) -> String {
        match &self.entry {
            Some(entry) if !code.contains(&entry.marker) => {
                format!("{}{}{}", entry.before, code, entry.after)
            }
            _ => code.to_string(),
        }
    }
}

/// Languages run by a single interpreter command: names, extension, argv.
const INTERPRETED: &[(&[&str], &str, &[&str])] = &[
    (&["bash"], "sh", &["bash", "<file>"]),
    (&["sh"], "sh", &["sh", "<file>"]),
    (&["zsh"], "zsh", &["zsh", "<file>"]),
    (&["fish"], "fish", &["fish", "<file>"]),
    (&["elixir"], "exs", &["elixir", "<file>"]),
    (&["javascript", "js"], "js", &["node", "<file>"]),
    (&["typescript", "ts"], "ts", &["deno", "run", "<file>"]),
    (&["lua"], "lua", &["lua", "<file>"]),
    (&["python", "py"], "py", &["python3", "<file>"]),
    (&["ruby", "rb"], "rb", &["ruby", "<file>"]),
    (&["perl"], "pl", &["perl", "<file>"]),
    (&["php"], "php", &["php", "<file>"]),
    (&["r"], "R", &["Rscript", "<file>"]),
    (&["java"], "java", &["java", "<file>"]),
    (&["julia"], "jl", &["julia", "<file>"]),
    (&["swift"], "swift", &["swift", "<file>"]),
    (&["dart"], "dart", &["dart", "<file>"]),
    (&["v"], "v", &["v", "run", "<file>"]),
    (&["scala"], "sc", &["scala", "<file>"]),
    (&["haskell"], "hs", &["runghc", "<file>"]),
    (&["ocaml"], "ml", &["ocaml", "<file>"]),
];

/// Language identifier to toolchain lookup.
#[derive(Debug, Clone, Default)]
pub struct ToolchainRegistry {
    languages: HashMap<String, ToolchainSpec>,
}

impl ToolchainRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The toolchains shipped with the viewer.
    pub fn builtin() -> Self {
        let compile_and_run = |compiler: &[&str]| -> Vec<Vec<String>> {
            let mut compile: Vec<String> = compiler.iter().map(|a| a.to_string()).collect();
            compile.extend(["<file>", "-o", "<path>/<name>.run"].map(String::from));
            vec![compile, vec!["<path>/<name>.run".to_string()]]
        };

        let mut registry = ToolchainRegistry::new();
        for (names, extension, command) in INTERPRETED {
            registry.insert_all(names, ToolchainSpec::new(extension, &[*command]));
        }

        let go = ToolchainSpec::new("go", &[&["go", "run", "<file>"]]).with_entry(
            "package main",
            "package main\n\nimport \"fmt\"\n\nvar _ = fmt.Sprint\n\nfunc main() {\n",
            "\n}\n",
        );
        registry.insert("go", go);

        let mut rust = ToolchainSpec::new("rs", &[]).with_entry("fn main", "fn main() {\n", "\n}\n");
        rust.commands = compile_and_run(&["rustc"]);
        registry.insert_all(&["rust", "rs"], rust);

        let mut c = ToolchainSpec::new("c", &[]);
        c.commands = compile_and_run(&["cc"]);
        registry.insert("c", c);

        let mut cpp = ToolchainSpec::new("cpp", &[]);
        cpp.commands = compile_and_run(&["g++", "-std=c++20"]);
        registry.insert_all(&["cpp", "c++"], cpp);

        registry
    }

    pub fn insert(&mut self, language: &str, spec: ToolchainSpec) {
        self.languages.insert(language.to_string(), spec);
    }

    fn insert_all(&mut self, languages: &[&str], spec: ToolchainSpec) {
        for language in languages {
            self.insert(language, spec.clone());
        }
    }

    pub fn get(&self, language: &str) -> Option<&ToolchainSpec> {
        self.languages.get(language)
    }

    /// Sorted language identifiers.
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
