use color_eyre::eyre::Result;
use dotenv::dotenv;
use tutorcal_api::config::ApiConfig;
use tutorcal_store::create_store;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Open the slot file; it is created or repaired on first access
    let store = create_store(&config.slots_file);

    // Start API server
    tutorcal_api::start_server(config, store).await?;

    Ok(())
}
