//! Take and grade themed quizzes from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::QuizArgs;

#[derive(Parser)]
#[command(name = "quizbank", version, about = "Themed web-development quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Play {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Also write the results page to this HTML file
        #[arg(long)]
        html: Option<PathBuf>,

        /// Also write the session report to this JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Compose a quiz and print it without playing
    Compose {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Grade an answers file
    Grade {
        /// JSON file with `questions` (ids in order) and `answers` (id -> list)
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write the results page to this HTML file
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show how many questions each theme has per level
    Themes {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample question banks
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizbank=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { quiz, html, json } => commands::play::execute(quiz, html, json).await,
        Commands::Compose { quiz, format } => commands::compose::execute(quiz, format).await,
        Commands::Grade {
            answers,
            format,
            html,
            config,
        } => commands::grade::execute(answers, format, html, config).await,
        Commands::Themes { config } => commands::themes::execute(config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
