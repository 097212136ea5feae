use clap::Parser;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use tutorcal_api::config::ApiConfig;
use tutorcal_store::{FileSlotStore, seed::initialize_store};

#[derive(Parser)]
#[command(name = "seed-slots")]
#[command(about = "Create or repair the slot file", long_about = None)]
struct Cli {
    /// Overwrite the file with a freshly generated week even if it is valid
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();
    let config = ApiConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Seeding slots in {}", config.slots_file.display());
    let store = FileSlotStore::new(&config.slots_file);
    let slots = initialize_store(&store, cli.force).await?;
    info!("Slot file holds {} slots", slots.len());

    Ok(())
}
