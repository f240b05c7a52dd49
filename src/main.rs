use clap::{Parser, Subcommand};
use serde_json::json;
use specguard::contract::{load_contract, FileSource};
use specguard::runtime_config::{EnforcementMode, RuntimeConfig};
use specguard::server::{ContractService, HandlerResponse, HttpServer, ParsedRequest};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "specguard")]
#[command(about = "Contract enforcement demo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the hello handler behind the contract enforcer
    Serve {
        #[arg(short, long)]
        contract: PathBuf,

        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: String,

        #[arg(long, env = "SPECGUARD_MODE", default_value = "permissive")]
        mode: EnforcementMode,
    },
    /// Print the operations a contract document declares
    Inspect {
        #[arg(short, long)]
        contract: PathBuf,
    },
}

fn hello(req: &ParsedRequest) -> anyhow::Result<HandlerResponse> {
    let name = req.query_param("name").unwrap_or("world");
    Ok(HandlerResponse::json(200, json!({ "hello": name })))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve {
            contract,
            addr,
            mode,
        } => {
            // Fail early on an unloadable document instead of 500ing every request
            load_contract(&contract)?;
            let source = Arc::new(FileSource::new(&contract));
            let service = ContractService::new(source, hello, RuntimeConfig { mode });
            let handle = HttpServer(service).start(&addr)?;
            println!("specguard listening on {addr} ({mode} mode)");
            handle
                .join()
                .map_err(|_| anyhow::anyhow!("server terminated abnormally"))?;
        }
        Commands::Inspect { contract } => {
            let doc = load_contract(&contract)?;
            if !doc.schemes.is_empty() {
                println!("schemes: {}", doc.schemes.join(", "));
            }
            for (path, item) in &doc.paths {
                for (method, op) in item {
                    let produces = if op.produces.is_empty() {
                        "unconstrained".to_string()
                    } else {
                        op.produces.join(", ")
                    };
                    println!(
                        "{:7} {}  [{} parameter(s), produces: {}]",
                        method.to_uppercase(),
                        path,
                        op.parameters.len(),
                        produces
                    );
                }
            }
        }
    }
    Ok(())
}
