//! Graphiti examples CLI: runs a named example against Neo4j or the
//! in-process graph.

use clap::{Parser, Subcommand};
use graphiti_client::EmbeddedClient;
use graphiti_examples::{dataset, Config, Connection, ExampleCart, ExampleResult, ExampleStrategy};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graphiti-examples", version, about = "Graphiti knowledge graph examples")]
struct Cli {
    /// Use the in-process graph instead of Neo4j, seeded with the entities
    /// and facts the example episodes describe
    #[arg(long, global = true)]
    embedded: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an example
    Run {
        /// Example name
        #[arg(default_value = "quickstart")]
        strategy: String,
    },
    /// List the available examples
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter()?)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { strategy } => run_example(&strategy, cli.embedded).await,
        Commands::List => {
            for strategy in ExampleStrategy::ALL {
                println!("{}", strategy);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// `RUST_LOG`, plus info-level output from the harness and the client
fn log_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("graphiti_examples=info".parse()?)
        .add_directive("graphiti_client=info".parse()?))
}

async fn run_example(name: &str, embedded: bool) -> ExampleResult<()> {
    let config = Config::from_env()?;
    // unknown names fail before any connection is opened
    let strategy: ExampleStrategy = name.parse()?;
    let cart = ExampleCart::new(config.clone());

    if embedded {
        info!("using the in-process graph");
        let (nodes, edges) = dataset::seed_graph();
        let client = EmbeddedClient::with_graph(nodes, edges);
        cart.execute(strategy, Connection::with_client(client)).await
    } else {
        info!(uri = %config.neo4j.uri, "connecting to Neo4j");
        let conn = Connection::connect(&config.neo4j).await?;
        cart.execute(strategy, conn).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_covers_both_crates() {
        let filter = log_filter().unwrap().to_string();
        assert!(filter.contains("graphiti_examples=info"));
        assert!(filter.contains("graphiti_client=info"));
    }

    #[test]
    fn test_cli_parses_embedded_run() {
        let cli = Cli::try_parse_from(["graphiti-examples", "--embedded", "run"]).unwrap();
        assert!(cli.embedded);
        match cli.command {
            Commands::Run { strategy } => assert_eq!(strategy, "quickstart"),
            Commands::List => panic!("expected run"),
        }
    }
}
