use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use workload_distributor::config::ServerConfig;
use workload_distributor::generator::TestDataGenerator;
use workload_distributor::models::{AllocationResult, SystemState};
use workload_distributor::{DistributionKpi, WorkloadDistributor};

#[derive(Parser, Debug)]
#[command(name = "workload-distributor")]
#[command(version)]
#[command(about = "Priority-aware workload distribution simulator")]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the HTTP service
    Serve(ServeArgs),

    /// Distribute a generated process set and print the result as JSON
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to bind (IP literal)
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value = "8000")]
    port: u16,

    /// Allowed CORS origin (repeatable)
    #[arg(long = "allow-origin", default_value = "http://localhost:3000")]
    allow_origins: Vec<String>,

    /// Largest process set the test-data endpoint will generate
    #[arg(long, default_value = "10000")]
    max_generated_processes: usize,

    /// Largest processor pool any endpoint accepts
    #[arg(long, default_value = "1024")]
    max_processors: usize,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Number of processes to generate
    #[arg(long, default_value = "10")]
    processes: usize,

    /// Number of processors in the pool
    #[arg(long, default_value = "4")]
    processors: usize,

    /// Seed for reproducible process sets
    #[arg(long)]
    seed: Option<u64>,

    /// Include summary metrics in the output
    #[arg(long)]
    kpi: bool,
}

#[derive(Serialize)]
struct SimulationOutput {
    system_state: SystemState,
    allocation_result: AllocationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    kpi: Option<DistributionKpi>,
}

async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_host_port(&args.host, args.port)?
        .with_allowed_origins(args.allow_origins)
        .with_max_generated_processes(args.max_generated_processes)
        .with_max_processors(args.max_processors);

    tracing::info!(
        addr = %config.listen_addr,
        origins = ?config.allowed_origins,
        "Configured workload distributor"
    );

    workload_distributor::server::serve(config).await?;
    Ok(())
}

fn run_simulate(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let state = match args.seed {
        Some(seed) => TestDataGenerator::from_seed(seed),
        None => TestDataGenerator::from_entropy(),
    }
    .generate_state(args.processes, args.processors);

    let result = WorkloadDistributor::new().distribute(&state.processes, state.num_processors)?;
    let kpi = args.kpi.then(|| DistributionKpi::calculate(&result));

    let output = SimulationOutput {
        system_state: state,
        allocation_result: result,
        kpi,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Serve(serve_args) => run_serve(serve_args).await,
        Commands::Simulate(simulate_args) => run_simulate(simulate_args),
    }
}
