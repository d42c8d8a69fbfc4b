use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vendorq_api::RestApi;
use vendorq_similarity::{QualificationConfig, VendorQualifier};
use vendorq_storage::CorpusStore;

/// Vendor qualification service
#[derive(Parser, Debug)]
#[command(name = "vendorq")]
#[command(about = "Ranks software vendors against desired capabilities", long_about = None)]
struct Args {
    /// Path to the vendor dataset (JSON array of vendor rows)
    #[arg(short, long, default_value = "./data/vendors.json")]
    dataset: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    http_port: u16,

    /// Default similarity threshold for feature matches
    #[arg(long, default_value_t = 0.5)]
    similarity_threshold: f32,

    /// Weight of feature similarity in the rank score
    #[arg(long, default_value_t = 0.7)]
    feature_weight: f32,

    /// Weight of vendor rating in the rank score
    #[arg(long, default_value_t = 0.3)]
    rating_weight: f32,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting vendorq v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {:?}", args.dataset);
    info!("HTTP API port: {}", args.http_port);

    let store = Arc::new(CorpusStore::open(&args.dataset)?);
    info!("Corpus loaded: {} vendors", store.snapshot().len());

    let config = QualificationConfig {
        similarity_threshold: args.similarity_threshold,
        feature_weight: args.feature_weight,
        rating_weight: args.rating_weight,
        ..QualificationConfig::default()
    };
    let qualifier = Arc::new(VendorQualifier::new(config)?);
    info!(
        "Scoring: threshold {}, weights {} / {}",
        args.similarity_threshold, args.feature_weight, args.rating_weight
    );

    let store_http = store.clone();
    let qualifier_http = qualifier.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(store_http, qualifier_http, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("vendorq started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
