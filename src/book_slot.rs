use std::sync::Arc;

use chrono::{Duration, Local};
use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use tutorcal_client::{
    BookingCalendar, HttpSlotApi, TracingNotifier, config::ClientConfig, render::render_week,
};
use tutorcal_core::{BookingFormData, ViewMode};

#[derive(Parser)]
#[command(name = "book-slot")]
#[command(about = "Browse the tutor's week and book a slot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the weekly grid
    Show {
        /// Show who booked each slot
        #[arg(long)]
        tutor: bool,
        /// Weeks relative to the current one, e.g. 1 for next week
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        week_offset: i64,
    },
    /// Book an available slot (usage: book --day Monday --time "11:00 AM" --name Zoe --subject Art)
    Book {
        #[arg(long)]
        day: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        subject: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let api = Arc::new(HttpSlotApi::new(&config.api_url));
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Show { tutor, week_offset } => {
            let mut calendar = BookingCalendar::new(
                api,
                Arc::new(TracingNotifier),
                today + Duration::weeks(week_offset),
            );
            calendar.load_week().await;
            if tutor {
                calendar.switch_view_mode(ViewMode::Tutor);
            }
            println!("{}", render_week(calendar.state()));
        }
        Commands::Book {
            day,
            time,
            name,
            subject,
        } => {
            let mut calendar = BookingCalendar::new(api, Arc::new(TracingNotifier), today);
            calendar.load_week().await;

            if !calendar.select_slot(&day, &time) {
                return Err(eyre!("{} at {} is not available", day, time));
            }

            let handle = calendar.confirm_booking(&BookingFormData::new(name, subject))?;
            let outcome = handle.await?;
            calendar.settle(&outcome);
            println!("{}", render_week(calendar.state()));

            if let Err(err) = outcome.result {
                return Err(eyre!("Booking was not saved: {}", err));
            }
            info!("Booked {}", outcome.slot_id);
        }
    }

    Ok(())
}
