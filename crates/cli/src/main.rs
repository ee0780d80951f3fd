use clap::{Parser, Subcommand};

mod commands;

use commands::{CalculateArgs, ServerArgs};

#[derive(Parser)]
#[command(name = "index-fund")]
#[command(about = "Market-cap weighted index fund allocator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web API server
    Server(ServerArgs),
    /// Compute an allocation table from a request file
    Calculate(CalculateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Server(args) => {
            commands::run_server(args).await?;
        }
        Commands::Calculate(args) => {
            commands::run_calculate(&args)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calculate() {
        let cli = Cli::try_parse_from(["index-fund", "calculate", "-i", "req.json", "--json"])
            .unwrap();
        match cli.command {
            Commands::Calculate(args) => {
                assert_eq!(args.input, "req.json");
                assert!(args.json);
            }
            Commands::Server(_) => panic!("expected calculate"),
        }
    }

    #[test]
    fn test_config_and_profile_conflict() {
        let result = Cli::try_parse_from([
            "index-fund",
            "server",
            "--config",
            "a.toml",
            "--profile",
            "dev",
        ]);
        assert!(result.is_err());
    }
}
