#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "burnup: burnup charts from board exports",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Alias for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Reports",
        about = "Replay an export and print the burnup report",
        long_about = "Replay a board export, list completed and open cards, and print the burnup summary. \
                      Window and scope come from burnup.toml and/or flags.",
        after_help = "EXAMPLES:\n    # Fixed scope, window from flags\n    burnup report board.json --start 2025-09-15 --end 2025-11-26 --scope 40\n\n    # Scope schedule and chart data for the renderer\n    burnup report board.json --scope \"0,10;30,+5;60,20\" --out chart.json\n\n    # Emit machine-readable output\n    burnup report board.json --format json"
    )]
    Report(cmd::report::ReportArgs),

    #[command(
        next_help_heading = "Reports",
        about = "List completed and open cards",
        long_about = "Replay a board export and list completed and open cards.",
        after_help = "EXAMPLES:\n    # List cards\n    burnup cards board.json\n\n    # Emit machine-readable output\n    burnup cards board.json --json"
    )]
    Cards(cmd::cards::CardsArgs),

    #[command(
        next_help_heading = "Tools",
        about = "Check a scope schedule",
        long_about = "Parse a scope value or schedule and print its step line.",
        after_help = "EXAMPLES:\n    # Check a schedule\n    burnup scope \"0,10;30,+5;60,20\" --end-day 72"
    )]
    Scope(cmd::scope::ScopeArgs),

    #[command(
        next_help_heading = "Tools",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    burnup completions bash\n\n    # Generate zsh completions\n    burnup completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("BURNUP_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "burnup=debug,info"
        } else {
            "burnup=info,warn"
        })
    });

    let format = env::var("BURNUP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli, output: OutputMode) -> anyhow::Result<()> {
    let cwd = env::current_dir()?;

    match cli.command {
        Commands::Report(ref args) => cmd::report::run_report(args, output, &cwd),
        Commands::Cards(ref args) => cmd::cards::run_cards(args, output),
        Commands::Scope(ref args) => cmd::scope::run_scope(args, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    debug!(?output, "resolved output mode");

    match run(cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error = CliError::from(&err);
            if render_error(output, &error).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
