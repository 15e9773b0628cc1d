use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chunkplace::placement::{PlacementConfig, StrategyKind};
use chunkplace::sim::{simulate, SimulationParams};

#[derive(Parser, Debug)]
#[command(name = "chunkplace")]
#[command(about = "Chunk placement simulator - replans and reconciles a worker fleet over discrete epochs", long_about = None)]
struct Args {
    /// Number of worker nodes
    #[arg(long, default_value_t = 100)]
    workers: usize,

    /// Initial number of chunks
    #[arg(long, default_value_t = 100_000)]
    chunks: usize,

    /// Number of simulated clients per epoch
    #[arg(long, default_value_t = 1000)]
    clients: usize,

    /// Number of planning epochs to run
    #[arg(long, default_value_t = 10)]
    epochs: usize,

    /// Chunks appended to the set after each epoch
    #[arg(long, default_value_t = 1000)]
    new_chunks_per_epoch: usize,

    /// Placement strategy
    #[arg(long, value_enum, default_value_t = StrategyKind::Rendezvous)]
    strategy: StrategyKind,

    /// Requested mean replica count per chunk
    #[arg(long, default_value_t = 2.0)]
    replication_factor_average: f64,

    /// Minimum replicas per chunk
    #[arg(long, default_value_t = 1)]
    lower_bound: usize,

    /// Maximum replicas per chunk
    #[arg(long, default_value_t = 5)]
    upper_bound: usize,

    /// RNG seed for client queries and routing
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chunkplace=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PlacementConfig {
        strategy: args.strategy,
        replication_factor_average: args.replication_factor_average,
        lower_bound: args.lower_bound,
        upper_bound: args.upper_bound,
    };
    let params = SimulationParams {
        workers_num: args.workers,
        chunks_num: args.chunks,
        clients_num: args.clients,
        epochs: args.epochs,
        new_chunks_per_epoch: args.new_chunks_per_epoch,
        seed: args.seed,
    };

    tracing::debug!(config = %serde_json::to_string(&config)?, "placement config");
    tracing::info!(
        strategy = %config.strategy,
        workers = params.workers_num,
        chunks = params.chunks_num,
        epochs = params.epochs,
        "starting simulation"
    );
    simulate(&params, &config)?;
    tracing::info!("simulation finished");

    Ok(())
}
