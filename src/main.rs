use clap::{Parser, Subcommand};
use eyre::Result;
use para::config::{Config, OutputFormat};
use para::render::Renderer;
use para::{Session, ops, repl};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "para")]
#[command(about = "PARA organizer - Projects, Areas, Resources and Archives in one in-memory board")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/para/para.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a YAML op script, then print the board
    Run {
        /// Script file: a YAML list of ops
        script: PathBuf,
    },

    /// Read commands from stdin until EOF or quit
    Repl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let level = if cli.verbose { Level::DEBUG } else { config.tracing_level()? };

    // Setup tracing
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if !config.color {
        colored::control::set_override(false);
    }

    let renderer = Renderer::new(cli.format.unwrap_or(config.format));
    let mut session = Session::new(config.default_category);

    match cli.command {
        Commands::Run { script } => {
            let ops = ops::load_script(&script)?;
            session.run_script(ops)?;
            print!("{}", renderer.board(session.store().state())?);
        }
        Commands::Repl => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            if prompt {
                println!("PARA board - type help for commands");
            }
            repl::run(&mut session, &renderer, stdin.lock(), &mut io::stdout(), prompt)?;
        }
    }

    Ok(())
}
