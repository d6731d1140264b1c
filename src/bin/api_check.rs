//! Connectivity check against the backend without starting the TUI.
//!
//! Usage: cargo run --bin api_check [-- --base-url http://host:5001]

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use har_ghar_munga::api::{FamilyRepository, HgmApiClient};
use har_ghar_munga::models::Config;

#[derive(Parser, Debug)]
#[command(name = "api_check", about = "Probe the Har Ghar Munga backend")]
struct Args {
    /// Backend base URL (defaults to HGM_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Also fetch the family list after the probe
    #[arg(long)]
    families: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(base_url) = args.base_url {
        config.api_base_url = base_url;
    }

    println!("🔍 Probing {}", config.api_base_url);
    let client = HgmApiClient::new(&config)?;

    match client.probe().await {
        Ok(ack) if ack.success => println!("✅ {}", ack.message),
        Ok(ack) => println!("⚠️ {}", ack.message),
        Err(e) => {
            eprintln!("❌ Probe failed: {}", e);
            std::process::exit(1);
        }
    }

    if args.families {
        match client.families(None).await {
            Ok(families) => {
                println!("✅ Fetched {} families", families.len());
                for family in families.iter().take(5) {
                    println!(
                        "   {} - {} ({})",
                        family.id, family.child_name, family.village
                    );
                }
            }
            Err(e) => {
                eprintln!("❌ Family fetch failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
