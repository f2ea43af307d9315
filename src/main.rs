//! Orchestrator CLI: run a workflow, print its report as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use estate_orchestrator::config::loader::load_config;
use estate_orchestrator::config::schema::{
    BUYER_KEY_ENV_VAR, DEPLOYER_KEY_ENV_VAR, SELLER_KEY_ENV_VAR,
};
use estate_orchestrator::contract::client::ContractClient;
use estate_orchestrator::documents::client::DocumentApiClient;
use estate_orchestrator::ledger::client::LedgerClient;
use estate_orchestrator::ledger::signer::TxnSigner;
use estate_orchestrator::lifecycle::Shutdown;
use estate_orchestrator::observability::init_logging;
use estate_orchestrator::pipeline::{ContractPipeline, DocumentPipeline};
use estate_orchestrator::workflow::poller::ConfirmationPoller;

#[derive(Parser)]
#[command(name = "estate-orchestrator")]
#[command(about = "Land-registry verification and transfer workflows", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "estate.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch documents and run verify-then-transfer per document
    Documents,
    /// Deploy the land-verification app and drive its methods
    Contract {
        /// Document hash to submit for verification.
        #[arg(long)]
        document_hash: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability.log_level);

    tracing::info!(
        config_path = %cli.config.display(),
        ledger_url = %config.ledger.base_url,
        "estate-orchestrator starting"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let ledger = LedgerClient::new(&config.ledger)?;
    let poller = ConfirmationPoller::new(
        ledger.clone(),
        config.poller.max_attempts,
        std::time::Duration::from_millis(config.poller.interval_ms),
    );

    let completed = match cli.command {
        Commands::Documents => {
            let buyer = TxnSigner::from_env(config.parties.buyer_address.clone(), BUYER_KEY_ENV_VAR)?;
            let seller =
                TxnSigner::from_env(config.parties.seller_address.clone(), SELLER_KEY_ENV_VAR)?;
            let documents = DocumentApiClient::new(&config.document_api)?;

            let pipeline = DocumentPipeline::new(
                config.clone(),
                ledger,
                documents,
                buyer,
                seller,
                shutdown.clone(),
            );
            let summary = pipeline.run().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            summary.all_completed()
        }
        Commands::Contract { document_hash } => {
            let deployer = TxnSigner::from_env(
                config.contract.deployer_address.clone(),
                DEPLOYER_KEY_ENV_VAR,
            )?;
            let contract = ContractClient::new(
                ledger,
                poller,
                deployer,
                config.contract.clone(),
                shutdown.clone(),
            );

            let report = ContractPipeline::new(contract, config.clone())
                .run(&document_hash)
                .await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            report.is_completed()
        }
    };

    if !completed {
        // Partial progress is already in the printed report.
        std::process::exit(1);
    }
    Ok(())
}
