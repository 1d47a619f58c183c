use std::path::Path;
use std::time::Duration;

use deck::code::{self, CodeBlock};
use sandbox::{EXIT_CODE_INTERNAL_ERROR, HidePolicy, Sandbox, ToolchainRegistry, ToolchainSpec};

fn sh_sandbox(root: &Path, commands: &[&[&str]]) -> Sandbox {
    let mut registry = ToolchainRegistry::new();
    registry.insert("sh", ToolchainSpec::new("sh", commands));
    Sandbox::new(registry).with_temp_root(root)
}

fn block(language: &str, code: &str) -> CodeBlock {
    CodeBlock {
        code: code.to_string(),
        language: language.to_string(),
    }
}

fn assert_empty(dir: &Path) {
    let leftovers: Vec<_> = std::fs::read_dir(dir)
        .expect("read temp root")
        .flatten()
        .map(|e| e.path())
        .collect();
    assert!(leftovers.is_empty(), "leftover temp entries: {:?}", leftovers);
}

#[test]
fn unsupported_language_is_internal_error() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["sh", "<file>"]]);

    let result = sandbox.execute(&block("brainfuck", "+++"));
    assert_eq!(result.exit_code, EXIT_CODE_INTERNAL_ERROR);
    assert_eq!(result.output, "Error: unsupported language");
    assert_eq!(result.duration, Duration::ZERO);
    assert!(result.is_internal_error());
    assert_empty(root.path());
}

#[test]
fn runs_code_and_cleans_up() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["sh", "<file>"]]);

    let result = sandbox.execute(&block("sh", "echo hello\n"));
    assert_eq!(result.output, "hello\n");
    assert_eq!(result.exit_code, 0);
    assert_empty(root.path());
}

#[test]
fn stdout_and_stderr_are_combined() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["sh", "<file>"]]);

    let result = sandbox.execute(&block("sh", "echo out\necho err >&2\necho again\n"));
    assert_eq!(result.output, "out\nerr\nagain\n");
}

#[test]
fn exit_status_one_keeps_output() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["sh", "<file>"]]);

    let result = sandbox.execute(&block("sh", "echo oops\nexit 1\n"));
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.output, "oops\nexit status: 1");
    assert!(!result.is_internal_error());
}

#[test]
fn other_exit_status_reports_only_the_error() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["sh", "<file>"]]);

    let result = sandbox.execute(&block("sh", "echo hidden\nexit 3\n"));
    assert_eq!(result.exit_code, 3);
    assert_eq!(result.output, "exit status: 3");
}

#[test]
fn killed_process_reports_only_the_signal() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["sh", "<file>"]]);

    let result = sandbox.execute(&block("sh", "echo leaked\nkill -9 $$\n"));
    assert_eq!(result.exit_code, 1);
    assert!(!result.output.contains("leaked"), "output: {:?}", result.output);
    assert!(result.output.starts_with("signal: 9"), "output: {:?}", result.output);
    assert!(!result.is_internal_error());
    assert_empty(root.path());
}

#[test]
fn unusable_temp_root_is_internal_error() {
    let root = tempfile::tempdir().unwrap();
    let marker = root.path().join("ran");
    let touch = format!("touch {}", marker.display());
    let mut registry = ToolchainRegistry::new();
    registry.insert("sh", ToolchainSpec::new("sh", &[&["sh", "-c", &touch]]));
    let sandbox = Sandbox::new(registry).with_temp_root(root.path().join("missing"));

    let result = sandbox.execute(&block("sh", "echo unreachable\n"));
    assert_eq!(result.exit_code, EXIT_CODE_INTERNAL_ERROR);
    assert_eq!(result.output, "Error: could not create file");
    assert_eq!(result.duration, Duration::ZERO);
    assert!(!marker.exists());
}

#[test]
fn pipeline_continues_after_failure() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["sh", "-c", "exit 2"], &["sh", "<file>"]]);

    let result = sandbox.execute(&block("sh", "echo done\n"));
    assert_eq!(result.output, "exit status: 2done\n");
    assert_eq!(result.exit_code, 2);
}

#[test]
fn last_non_zero_status_wins() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(
        root.path(),
        &[&["sh", "-c", "exit 2"], &["sh", "-c", "exit 4"], &["sh", "-c", "exit 0"]],
    );

    let result = sandbox.execute(&block("sh", ""));
    assert_eq!(result.exit_code, 4);
}

#[test]
fn missing_program_is_not_internal() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["folien-test-no-such-program", "<file>"]]);

    let result = sandbox.execute(&block("sh", "echo unreachable\n"));
    assert_eq!(result.exit_code, 1);
    assert!(result.output.starts_with("folien-test-no-such-program: "));
    assert!(!result.is_internal_error());
    assert_empty(root.path());
}

#[test]
fn placeholders_point_at_the_source_file() {
    let root = tempfile::tempdir().unwrap();
    let script = r#"test "$(basename "$1" .sh)" = "$2" && test "$(dirname "$1")" = "$3" && test -f "$1" && echo ok"#;
    let sandbox = sh_sandbox(
        root.path(),
        &[&["sh", "-c", script, "check", "<file>", "<name>", "<path>"]],
    );

    let result = sandbox.execute(&block("sh", "true\n"));
    assert_eq!(result.output, "ok\n");
    assert_eq!(result.exit_code, 0);
}

#[test]
fn artifacts_are_removed_after_failure() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(
        root.path(),
        &[&["sh", "-c", "echo binary > <path>/<name>.run; exit 1"]],
    );

    let result = sandbox.execute(&block("sh", "echo hi\n"));
    assert_eq!(result.exit_code, 1);
    assert_empty(root.path());
}

#[test]
fn entry_wrapper_applies_without_marker() {
    let root = tempfile::tempdir().unwrap();
    let mut registry = ToolchainRegistry::new();
    registry.insert(
        "sh",
        ToolchainSpec::new("sh", &[&["sh", "<file>"]]).with_entry("# entry", "echo before\n", "\necho after\n"),
    );
    let sandbox = Sandbox::new(registry).with_temp_root(root.path());

    let wrapped = sandbox.execute(&block("sh", "echo middle"));
    assert_eq!(wrapped.output, "before\nmiddle\nafter\n");

    let kept = sandbox.execute(&block("sh", "# entry\necho alone\n"));
    assert_eq!(kept.output, "alone\n");
}

#[test]
fn duration_covers_the_pipeline() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["sh", "<file>"]]);

    let result = sandbox.execute(&block("sh", "sleep 0.2\n"));
    assert!(result.duration >= Duration::from_millis(150), "{:?}", result.duration);
}

#[test]
fn comment_markers_run_as_code() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["sh", "<file>"]]);

    let blocks = code::parse("```sh\n///echo setup\necho shown\n```\n").unwrap();
    let result = sandbox.execute(&blocks[0]);
    assert_eq!(result.output, "setup\nshown\n");
}

#[test]
fn batch_applies_hide_policy() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sh_sandbox(root.path(), &[&["sh", "<file>"]]);
    let blocks = vec![
        block("nope", ""),
        block("sh", "echo one\n"),
        block("nope", ""),
    ];

    let outputs = |policy| -> Vec<String> {
        sandbox
            .execute_all(&blocks, policy)
            .into_iter()
            .map(|r| r.output)
            .collect()
    };

    assert_eq!(outputs(HidePolicy::All), vec!["one\n"]);
    assert_eq!(
        outputs(HidePolicy::AllButLast),
        vec!["one\n", "Error: unsupported language"]
    );
    assert_eq!(outputs(HidePolicy::None).len(), 3);
    assert_empty(root.path());
}
