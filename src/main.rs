use clap::{Parser, Subcommand};
use colored::Colorize;
use pwready::{cmd, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pwready",
    about = "Passwordless sign-in readiness for Microsoft Entra ID users",
    version,
    long_about = "Checks a user's registered authentication methods in Microsoft Graph\n\n\
                  Scores passwordless readiness (Authenticator, MFA, Windows Hello for Business)\n\
                  and recommends what to register next. Runs once, on a timer, or as an HTTP API."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate one user and print the readiness scorecard
    Evaluate(cmd::evaluate::EvaluateArgs),

    /// Serve the readiness API for the dashboard
    Serve(cmd::serve::ServeArgs),

    /// Show the effective readiness policy
    Policy(cmd::policy::PolicyArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> error::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; the server always logs, commands only when asked
    let default_filter = match (&cli.command, cli.verbose) {
        (_, true) => Some("pwready=debug"),
        (Commands::Serve(_), false) => Some("pwready=info"),
        _ => None,
    };
    if let Some(default_filter) = default_filter {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match cli.command {
        Commands::Evaluate(args) => cmd::evaluate::run(args).await?,
        Commands::Serve(args) => cmd::serve::run(args).await?,
        Commands::Policy(args) => cmd::policy::run(args).await?,
    }

    Ok(())
}
