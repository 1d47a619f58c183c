mod presentation;
mod search;
mod terminal;
mod ui;
mod watcher;

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing::info;
use tracing_subscriber::EnvFilter;

use deck::Deck;
use deck::source;
use sandbox::{HidePolicy, Sandbox, ToolchainRegistry};

use crate::presentation::{Presentation, Settings};
use crate::watcher::FileWatcher;

const SUBCOMMANDS: &[&str] = &["present", "check", "exec", "help"];
/// Options that take a separate value.
const VALUE_OPTIONS: &[&str] = &["--log-file", "--hide-errors"];

#[derive(Parser)]
#[command(name = "folien", version, about = "Terminal based presentation tool")]
struct Cli {
    /// Write logs to this file (filter with FOLIEN_LOG, e.g. FOLIEN_LOG=debug)
    #[arg(long, global = true, env = "FOLIEN_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Present a markdown file (the default command)
    Present(PresentArgs),

    /// Parse a presentation and report problems
    Check(CheckArgs),

    /// Run the code blocks of one slide and print their output
    Exec(ExecArgs),
}

#[derive(clap::Args)]
struct PresentArgs {
    /// Markdown file to present; `-` or nothing reads standard input
    #[arg(default_value = "-")]
    file: String,

    /// Allow running code blocks with ctrl+e
    #[arg(short = 'x', long, env = "FOLIEN_ALLOW_EXECUTION")]
    allow_execution: bool,

    /// Which sandbox errors to hide: all, all-but-last or none
    #[arg(long, env = "FOLIEN_HIDE_ERRORS", default_value_t = HidePolicy::All)]
    hide_errors: HidePolicy,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Markdown file to check
    file: String,

    /// Print the first line of every slide
    #[arg(long)]
    list_slides: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,
}

#[derive(clap::Args)]
struct ExecArgs {
    /// Markdown file containing the slide
    file: String,

    /// Slide number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    slide: usize,

    /// Which sandbox errors to hide: all, all-but-last or none
    #[arg(long, env = "FOLIEN_HIDE_ERRORS", default_value_t = HidePolicy::None)]
    hide_errors: HidePolicy,
}

fn main() {
    let args = with_default_command(std::env::args().collect());
    let cli = Cli::parse_from(&args);

    let interactive = matches!(cli.command, Command::Present(_));
    if let Err(err) = init_logging(cli.log_file.as_deref(), interactive) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }

    let result = match cli.command {
        Command::Present(args) => do_present(args).map(|()| 0),
        Command::Check(args) => do_check(args),
        Command::Exec(args) => do_exec(args),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {:#}", err);
            process::exit(1);
        }
    }
}

/// Make `folien talk.md` mean `folien present talk.md`: unless the first
/// positional argument names a subcommand, `present` is inserted right
/// after the program name so every option lands on it.
fn with_default_command(mut args: Vec<String>) -> Vec<String> {
    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        if VALUE_OPTIONS.contains(&arg) {
            i += 2;
            continue;
        }
        if arg == "-" || arg == "--" || !arg.starts_with('-') {
            if SUBCOMMANDS.contains(&arg) {
                return args;
            }
            break;
        }
        i += 1;
    }

    let asks_for_info = i >= args.len()
        && args
            .iter()
            .skip(1)
            .any(|a| matches!(a.as_str(), "-h" | "--help" | "-V" | "--version"));
    if !asks_for_info {
        args.insert(1.min(args.len()), "present".to_string());
    }
    args
}

/// Logs go to `log_file` when given. Non-interactive commands log to
/// stderr otherwise; the interactive viewer owns the terminal and stays
/// silent.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = |default: &str| {
        EnvFilter::try_from_env("FOLIEN_LOG").unwrap_or_else(|_| EnvFilter::new(default))
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if !interactive => {
            tracing_subscriber::fmt()
                .with_env_filter(filter("warn"))
                .with_target(false)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn read_source(file: &str) -> Result<String> {
    if source::is_stdin(file) {
        let stdin = io::stdin();
        let is_terminal = stdin.is_terminal();
        return source::read_stdin(stdin.lock(), is_terminal).context("cannot read standard input");
    }
    source::read_file(Path::new(file)).with_context(|| format!("cannot read '{}'", file))
}

fn do_present(args: PresentArgs) -> Result<()> {
    let content = read_source(&args.file)?;
    let deck = Deck::load(&content);
    info!(file = %args.file, slides = deck.len(), "starting presentation");

    let settings = Settings {
        allow_execution: args.allow_execution,
        hide_policy: args.hide_errors,
    };
    let sandbox = Sandbox::new(ToolchainRegistry::builtin());
    let mut presentation = Presentation::new(deck, sandbox, settings);
    if !source::is_stdin(&args.file) {
        presentation = presentation.with_watcher(FileWatcher::new(&args.file));
    }

    terminal::run(presentation)
}

fn do_check(args: CheckArgs) -> Result<i32> {
    let color_choice = if args.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let content = read_source(&args.file)?;
    let mut files = SimpleFiles::new();
    let normalized = deck::normalize(&content);
    let file_id = files.add(args.file.clone(), normalized.clone());
    let parser = deck::parser::Parser::new(normalized, file_id);

    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    let emit = |diagnostics: &[deck::parser::ParseError]| {
        for diagnostic in diagnostics {
            let _ = term::emit_to_write_style(
                &mut writer.lock(),
                &config,
                &files,
                &diagnostic.to_diagnostic(),
            );
        }
    };

    match parser.parse() {
        Ok((deck, warnings)) => {
            emit(&warnings);
            if args.list_slides {
                for (i, slide) in deck.slides.iter().enumerate() {
                    let title = slide.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                    println!("{:>3}  {}", i + 1, title);
                }
            }
            eprintln!("ok: {} has {} slides", args.file, deck.len());
            Ok(0)
        }
        Err(errors) => {
            emit(&errors);
            Ok(1)
        }
    }
}

fn do_exec(args: ExecArgs) -> Result<i32> {
    let content = read_source(&args.file)?;
    let deck = Deck::load(&content);
    let slide = args
        .slide
        .checked_sub(1)
        .and_then(|page| deck.slide(page))
        .with_context(|| format!("slide {} does not exist ({} slides)", args.slide, deck.len()))?;

    let blocks = deck::code::parse(slide)?;
    let sandbox = Sandbox::new(ToolchainRegistry::builtin());
    let results = sandbox.execute_all(&blocks, args.hide_errors);

    let mut exit_code = 0;
    for result in &results {
        println!("{}", result.output.trim_end_matches('\n'));
        info!(exit_code = result.exit_code, duration = ?result.duration, "block finished");
        if result.exit_code != 0 {
            exit_code = if result.is_internal_error() { 1 } else { result.exit_code };
        }
    }
    Ok(exit_code)
}
