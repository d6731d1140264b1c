use anyhow::Result;
use std::sync::Arc;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use har_ghar_munga::api::{FamilyRepository, FixtureRepository, HgmApiClient};
use har_ghar_munga::models::Config;
use har_ghar_munga::ui::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Suppress most logs so they do not corrupt the TUI
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::ERROR)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {}", e);
            eprintln!("❌ Configuration Error: {}", e);
            eprintln!("Set HGM_API_BASE_URL / HGM_DEMO_MODE / HGM_TIMEOUT_SECS or use a .env file.");
            std::process::exit(1);
        }
    };

    let repo: Arc<dyn FamilyRepository> = if config.demo_mode {
        Arc::new(FixtureRepository::new())
    } else {
        match HgmApiClient::new(&config) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                error!("failed to build API client: {}", e);
                eprintln!("❌ API Client Error: {}", e);
                std::process::exit(1);
            }
        }
    };

    let mut app = App::new(repo, config.demo_mode);
    match app.run().await {
        Ok(_) => {
            println!("हर घर मुंगा का उपयोग करने के लिए धन्यवाद!");
        }
        Err(e) => {
            eprintln!("❌ TUI Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
