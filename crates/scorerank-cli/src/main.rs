#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use std::env;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "scorerank: PageRank-style team strength from goal votes",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read settings from this file instead of ./scorerank.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format (defaults to pretty on a terminal, text otherwise).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
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
        next_help_heading = "Ranking",
        about = "Rank teams by ScoreRank",
        long_about = "Build the goal-vote graph from one or more results files and rank every team by ScoreRank.",
        after_help = "EXAMPLES:\n    # Rank one season\n    scorerank rank E0-1415.csv\n\n    # Heavier baseline, ten passes, top five only\n    scorerank rank E0-1415.csv --leak 0.4 -n 10 --top 5\n\n    # Emit machine-readable output\n    scorerank rank E0-1415.csv --format json"
    )]
    Rank(cmd::rank::RankArgs),

    #[command(
        next_help_heading = "Ranking",
        about = "Show scores pass by pass",
        long_about = "Record every team's score after redistribution and after each propagation pass.",
        after_help = "EXAMPLES:\n    # Watch scores settle over twenty passes\n    scorerank convergence E0-1415.csv -n 20"
    )]
    Convergence(cmd::convergence::ConvergenceArgs),

    #[command(
        next_help_heading = "Ranking",
        about = "Compare the league table with ScoreRank",
        long_about = "Build the points table and show where each team sits in it and in the ScoreRank ranking.",
        after_help = "EXAMPLES:\n    # Table vs ScoreRank for one season\n    scorerank table E0-1415.csv\n\n    # Tab-separated rows for scripts\n    scorerank table E0-1415.csv --format text"
    )]
    Table(cmd::table::TableArgs),

    #[command(
        next_help_heading = "Evaluation",
        about = "Backtest ScoreRank against bookmaker odds",
        long_about = "Predict every match from a rolling window of earlier results and correlate the predictions with the outcome implied by bookmaker odds.",
        after_help = "EXAMPLES:\n    # Two seasons, one-season window\n    scorerank backtest E0-1314.csv E0-1415.csv\n\n    # Shorter window, list every prediction\n    scorerank backtest E0-1415.csv --history 100 --predictions"
    )]
    Backtest(cmd::backtest::BacktestArgs),

    #[command(
        next_help_heading = "Inspection",
        about = "Describe the goal-vote graph",
        long_about = "Print graph statistics and accumulated edges, or the whole graph as Graphviz DOT.",
        after_help = "EXAMPLES:\n    # Statistics and edges\n    scorerank graph E0-1415.csv\n\n    # Render with Graphviz\n    scorerank graph E0-1415.csv --dot | dot -Tsvg > goals.svg"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        long_about = "Generate shell completion scripts for bash, zsh, fish, elvish, or powershell.",
        after_help = "EXAMPLES:\n    # Bash\n    scorerank completions bash > ~/.local/share/bash-completion/completions/scorerank\n\n    # Zsh\n    scorerank completions zsh > ~/.zfunc/_scorerank"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SCORERANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "scorerank=debug,info"
        } else {
            "scorerank=info,warn"
        })
    });

    let format = env::var("SCORERANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output
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
    let project = config::load_project_config(cli.config.as_deref(), &cwd)?;
    debug!(?project, "resolved configuration");

    match cli.command {
        Commands::Rank(args) => cmd::rank::run_rank(&args, &project, output),
        Commands::Convergence(args) => {
            cmd::convergence::run_convergence(&args, &project, output)
        }
        Commands::Table(args) => cmd::table::run_table(&args, &project, output),
        Commands::Backtest(args) => cmd::backtest::run_backtest_cmd(&args, &project, output),
        Commands::Graph(args) => cmd::graph::run_graph(&args, &project, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    if let Err(err) = run(cli, output) {
        render_error(output, &CliError::from(&err))?;
        std::process::exit(1);
    }
    Ok(())
}
