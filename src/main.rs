use aviator_pay::application::lifecycle::OrderLifecycleManager;
use aviator_pay::application::predictions::{HISTORY_PAGE_SIZE, PredictionService};
use aviator_pay::config::{Credentials, GatewayConfig};
use aviator_pay::domain::order::{PaymentRequest, VerificationQuery};
use aviator_pay::domain::ports::PredictionStoreBox;
use aviator_pay::infrastructure::csv_file::CsvPredictionStore;
use aviator_pay::infrastructure::in_memory::InMemoryPredictionStore;
use aviator_pay::infrastructure::pesapal::PesapalGateway;
use aviator_pay::interfaces::csv::history_writer::HistoryWriter;
use clap::{Parser, Subcommand};
use aviator_pay::error::Result;
use miette::IntoDiagnostic;
use rust_decimal::Decimal;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a payment order and print the redirect URL and tracking id
    Initiate {
        /// Payer email, passed to the gateway as-is
        #[arg(long)]
        email: String,
        /// Amount to charge (defaults to 99.0)
        #[arg(long)]
        amount: Option<Decimal>,
        /// ISO currency code (defaults to KES)
        #[arg(long)]
        currency: Option<String>,
    },
    /// Check whether a submitted order has been paid
    Verify {
        /// Tracking id returned by `initiate`
        order_tracking_id: String,
    },
    /// Generate predictions and print the recent history as CSV
    Predict {
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// CSV file to keep history in. If omitted, history lives in memory.
        #[arg(long)]
        history_file: Option<PathBuf>,
    },
    /// Print stored prediction history as CSV, newest first
    History {
        #[arg(long)]
        history_file: PathBuf,
        #[arg(long, default_value_t = HISTORY_PAGE_SIZE)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    run(cli.command).await.into_diagnostic()
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Initiate {
            email,
            amount,
            currency,
        } => {
            let manager = lifecycle_manager()?;
            let request = PaymentRequest {
                email,
                amount,
                currency,
            };
            let submission = manager.initiate_payment(&request).await?;
            print_json(&submission)?;
        }
        Command::Verify { order_tracking_id } => {
            let manager = lifecycle_manager()?;
            let query = VerificationQuery::new(order_tracking_id);
            let result = manager.verify_payment(&query).await?;
            print_json(&result)?;
        }
        Command::Predict {
            count,
            history_file,
        } => {
            let store: PredictionStoreBox = match history_file {
                Some(path) => Box::new(CsvPredictionStore::open(path)),
                None => Box::new(InMemoryPredictionStore::new()),
            };
            let service = PredictionService::new(store);
            for _ in 0..count {
                let prediction = service.next_prediction().await;
                tracing::info!(%prediction, "generated prediction");
            }
            let history = service.history().await?;
            HistoryWriter::new(io::stdout().lock()).write_predictions(history)?;
        }
        Command::History {
            history_file,
            limit,
        } => {
            let service = PredictionService::new(Box::new(CsvPredictionStore::open(history_file)));
            let history = service.history_with_limit(limit).await?;
            HistoryWriter::new(io::stdout().lock()).write_predictions(history)?;
        }
    }

    Ok(())
}

fn lifecycle_manager() -> Result<OrderLifecycleManager> {
    let credentials = Credentials::from_env()?;
    let config = GatewayConfig::from_env()?;
    tracing::debug!(?credentials, ?config, "loaded gateway configuration");

    let urls = config.order_urls();
    let gateway = PesapalGateway::new(config)?;
    Ok(OrderLifecycleManager::new(credentials, urls, Box::new(gateway)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    println!("{json}");
    Ok(())
}
