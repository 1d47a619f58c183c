use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use deck::code::CodeBlock;
use tracing::{debug, info, warn};

use crate::error::SandboxError;
use crate::policy::HidePolicy;
use crate::template::Placeholders;
use crate::toolchain::ToolchainRegistry;

/// Exit code reported when the sandbox itself failed (unsupported
/// language, temporary file problems). Real exit codes are never negative.
pub const EXIT_CODE_INTERNAL_ERROR: i32 = -1;

const TEMP_PREFIX: &str = "folien-";

/// The outcome of running one code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub output: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl ExecutionResult {
    fn internal(error: &SandboxError) -> Self {
        ExecutionResult {
            output: error.to_string(),
            exit_code: EXIT_CODE_INTERNAL_ERROR,
            duration: Duration::ZERO,
        }
    }

    pub fn is_internal_error(&self) -> bool {
        self.exit_code == EXIT_CODE_INTERNAL_ERROR
    }
}

/// Runs code blocks through their toolchains.
///
/// Every execution gets its own scoped directory under `temp_root` holding
/// the source file and anything the toolchain writes next to it. The
/// directory is removed when the execution returns, whatever the outcome.
#[derive(Debug, Clone)]
pub struct Sandbox {
    registry: ToolchainRegistry,
    temp_root: PathBuf,
}

impl Sandbox {
    pub fn new(registry: ToolchainRegistry) -> Self {
        Sandbox {
            registry,
            temp_root: std::env::temp_dir(),
        }
    }

    /// Place scoped directories under `root` instead of the system
    /// temporary directory.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = root.into();
        self
    }

    pub fn registry(&self) -> &ToolchainRegistry {
        &self.registry
    }

    /// Execute one code block. Never fails: sandbox problems come back as
    /// results carrying [`EXIT_CODE_INTERNAL_ERROR`].
    pub fn execute(&self, block: &CodeBlock) -> ExecutionResult {
        match self.try_execute(block) {
            Ok(result) => {
                info!(
                    language = %block.language,
                    exit_code = result.exit_code,
                    duration = ?result.duration,
                    "executed code block"
                );
                result
            }
            Err(err) => {
                warn!(language = %block.language, error = ?err, "code block not executed");
                ExecutionResult::internal(&err)
            }
        }
    }

    /// Execute the blocks of one slide in order and apply `policy` to the
    /// batch.
    pub fn execute_all(&self, blocks: &[CodeBlock], policy: HidePolicy) -> Vec<ExecutionResult> {
        let results = blocks.iter().map(|block| self.execute(block)).collect();
        policy.filter(results)
    }

    fn try_execute(&self, block: &CodeBlock) -> Result<ExecutionResult, SandboxError> {
        let toolchain = self
            .registry
            .get(&block.language)
            .ok_or_else(|| SandboxError::UnsupportedLanguage(block.language.clone()))?;

        let workdir = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir_in(&self.temp_root)
            .map_err(SandboxError::CreateFile)?;
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(&format!(".{}", toolchain.extension))
            .tempfile_in(workdir.path())
            .map_err(SandboxError::CreateFile)?;
        file.write_all(toolchain.prepare(&block.code).as_bytes())
            .map_err(SandboxError::WriteFile)?;
        // Closes the handle; the path guard still deletes the file on drop.
        let source = file.into_temp_path();

        let placeholders = Placeholders::for_file(&source);
        let commands: Vec<Vec<String>> = toolchain
            .commands
            .iter()
            .map(|command| placeholders.render_command(command))
            .collect();
        debug!(file = %placeholders.file, commands = commands.len(), "running pipeline");

        let start = Instant::now();
        let runs: Vec<CommandRun> = commands
            .iter()
            .map(|command| run_command(command, workdir.path()))
            .collect();
        let duration = start.elapsed();

        let mut output = String::new();
        let mut exit_code = 0;
        for run in runs {
            match run.failure {
                None => output.push_str(&run.output),
                Some(failure) => {
                    if failure.keeps_output {
                        output.push_str(&run.output);
                    }
                    output.push_str(&failure.description);
                    exit_code = failure.code;
                }
            }
        }

        Ok(ExecutionResult {
            output,
            exit_code,
            duration,
        })
    }
}

struct CommandRun {
    output: String,
    failure: Option<Failure>,
}

struct Failure {
    code: i32,
    description: String,
    /// Only a process that itself exited with status 1 shows its output.
    keeps_output: bool,
}

/// Run one command with stdout and stderr captured into the same buffer.
fn run_command(command: &[String], workdir: &Path) -> CommandRun {
    let Some((program, args)) = command.split_first() else {
        return CommandRun {
            output: String::new(),
            failure: None,
        };
    };

    match spawn_and_wait(program, args, workdir) {
        Ok((status, output)) if status.success() => CommandRun {
            output,
            failure: None,
        },
        Ok((status, output)) => CommandRun {
            output,
            failure: Some(Failure {
                // Killed by a signal: no code, report a generic failure.
                code: status.code().unwrap_or(1),
                description: status.to_string(),
                keeps_output: status.code() == Some(1),
            }),
        },
        Err(err) => CommandRun {
            output: String::new(),
            failure: Some(Failure {
                code: 1,
                description: format!("{}: {}", program, err),
                keeps_output: false,
            }),
        },
    }
}

fn spawn_and_wait(program: &str, args: &[String], workdir: &Path) -> io::Result<(ExitStatus, String)> {
    // One anonymous file behind both streams keeps their interleaving.
    let mut capture: File = tempfile::tempfile_in(workdir)?;
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(capture.try_clone()?)
        .stderr(capture.try_clone()?)
        .status()?;

    capture.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    capture.read_to_end(&mut bytes)?;
    Ok((status, String::from_utf8_lossy(&bytes).into_owned()))
}
