use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ringdesign_core::{AppConfig, VendorRegistry};
use ringdesign_scraper::{ImportError, ImportedRing, RingImporter};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ringdesign-cli")]
#[command(about = "Ring Designer import command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import a ring product page and print the result as JSON
    Import {
        /// Product page URL on a supported vendor
        url: String,
        /// Override the page fetch timeout
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,
    },
    /// List supported vendors as `name<TAB>domain`
    Vendors,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = ringdesign_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let registry = ringdesign_core::load_vendor_registry(config.vendors_path.as_deref())?;

    match cli.command {
        Commands::Import { url, timeout_secs } => {
            run_import(config, registry, &url, timeout_secs).await
        }
        Commands::Vendors => {
            for line in vendor_lines(&registry) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_import(
    mut config: AppConfig,
    registry: VendorRegistry,
    url: &str,
    timeout_secs: Option<u64>,
) -> anyhow::Result<ExitCode> {
    if let Some(secs) = timeout_secs {
        config.fetch_timeout_secs = secs;
    }

    let importer = RingImporter::from_app_config(&config, registry)?;
    match importer.import(url).await {
        Ok(ring) => {
            println!("{}", serde_json::to_string_pretty(&success_body(&ring))?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::warn!(error = %error, "import failed");
            let body = failure_body(&error, importer.registry());
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn success_body(ring: &ImportedRing) -> Value {
    json!({
        "success": true,
        "vendor": ring.vendor,
        "url": ring.url,
        "images": ring.images,
        "metadata": ring.metadata,
    })
}

fn failure_body(error: &ImportError, registry: &VendorRegistry) -> Value {
    let mut body = json!({
        "error": error.code(),
        "message": error.user_message(),
    });
    if matches!(error, ImportError::UnsupportedVendor { .. }) {
        body["supportedVendors"] = json!(registry.names());
    }
    body
}

fn vendor_lines(registry: &VendorRegistry) -> Vec<String> {
    registry
        .vendors()
        .iter()
        .map(|v| format!("{}\t{}", v.name, v.domain))
        .collect()
}
