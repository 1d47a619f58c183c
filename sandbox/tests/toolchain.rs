use std::path::Path;
use std::time::Duration;

use sandbox::template::Placeholders;
use sandbox::{EXIT_CODE_INTERNAL_ERROR, ExecutionResult, HidePolicy, ToolchainRegistry};

#[test]
fn builtin_languages() {
    let registry = ToolchainRegistry::builtin();
    for language in ["bash", "go", "python", "rust", "javascript", "cpp"] {
        assert!(registry.get(language).is_some(), "{} missing", language);
    }
    assert!(registry.get("cobol").is_none());

    let go = registry.get("go").unwrap();
    assert_eq!(go.extension, "go");
    assert_eq!(go.commands, vec![vec!["go", "run", "<file>"]]);

    let languages = registry.languages();
    let mut sorted = languages.clone();
    sorted.sort();
    assert_eq!(languages, sorted);
}

#[test]
fn rust_compiles_then_runs() {
    let registry = ToolchainRegistry::builtin();
    let rust = registry.get("rust").unwrap();
    assert_eq!(
        rust.commands,
        vec![
            vec!["rustc", "<file>", "-o", "<path>/<name>.run"],
            vec!["<path>/<name>.run"],
        ]
    );
    assert_eq!(
        rust.prepare("println!(\"hi\");"),
        "fn main() {\nprintln!(\"hi\");\n}\n"
    );
    assert_eq!(rust.prepare("fn main() {}"), "fn main() {}");
}

#[test]
fn go_snippets_get_a_main_package() {
    let registry = ToolchainRegistry::builtin();
    let go = registry.get("go").unwrap();

    let wrapped = go.prepare("fmt.Println(1)");
    assert!(wrapped.starts_with("package main\n"));
    assert!(wrapped.contains("func main() {\nfmt.Println(1)\n}\n"));

    let program = "package main\n\nfunc main() {}\n";
    assert_eq!(go.prepare(program), program);
}

#[test]
fn placeholders_from_path() {
    let placeholders = Placeholders::for_file(Path::new("/tmp/folien-x/folien-abc.rs"));
    assert_eq!(placeholders.file, "/tmp/folien-x/folien-abc.rs");
    assert_eq!(placeholders.name, "folien-abc");
    assert_eq!(placeholders.path, "/tmp/folien-x");
}

#[test]
fn render_substitutes_every_placeholder() {
    let placeholders = Placeholders {
        file: "/d/a.rs".to_string(),
        name: "a".to_string(),
        path: "/d".to_string(),
    };
    assert_eq!(placeholders.render("<path>/<name>.run"), "/d/a.run");
    assert_eq!(placeholders.render("<file><file>"), "/d/a.rs/d/a.rs");
    assert_eq!(placeholders.render("<other> <a<file>"), "<other> <a/d/a.rs");
    assert_eq!(placeholders.render("no placeholders"), "no placeholders");
    assert_eq!(
        placeholders.render_command(&["-o".to_string(), "<path>/<name>".to_string()]),
        vec!["-o", "/d/a"]
    );
}

#[test]
fn render_does_not_rescan_values() {
    let placeholders = Placeholders {
        file: "/d/<name>.rs".to_string(),
        name: "a".to_string(),
        path: "/d".to_string(),
    };
    assert_eq!(placeholders.render("<file>"), "/d/<name>.rs");
}

fn result(output: &str, exit_code: i32) -> ExecutionResult {
    ExecutionResult {
        output: output.to_string(),
        exit_code,
        duration: Duration::ZERO,
    }
}

#[test]
fn hide_policies() {
    let batch = || {
        vec![
            result("internal a", EXIT_CODE_INTERNAL_ERROR),
            result("failed", 2),
            result("internal b", EXIT_CODE_INTERNAL_ERROR),
        ]
    };
    let outputs = |results: Vec<ExecutionResult>| -> Vec<String> {
        results.into_iter().map(|r| r.output).collect()
    };

    assert_eq!(outputs(HidePolicy::All.filter(batch())), vec!["failed"]);
    assert_eq!(
        outputs(HidePolicy::AllButLast.filter(batch())),
        vec!["failed", "internal b"]
    );
    assert_eq!(
        outputs(HidePolicy::None.filter(batch())),
        vec!["internal a", "failed", "internal b"]
    );
    assert!(HidePolicy::AllButLast.filter(Vec::new()).is_empty());
}

#[test]
fn hide_policy_names() {
    assert_eq!("all".parse::<HidePolicy>().unwrap(), HidePolicy::All);
    assert_eq!("All-But-Last".parse::<HidePolicy>().unwrap(), HidePolicy::AllButLast);
    assert_eq!("none".parse::<HidePolicy>().unwrap(), HidePolicy::None);
    assert!("some".parse::<HidePolicy>().is_err());
    assert_eq!(HidePolicy::AllButLast.to_string(), "all-but-last");
    assert_eq!(HidePolicy::default(), HidePolicy::All);
}
