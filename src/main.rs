use booking_assist::channels::CliChannel;
use booking_assist::config::BookingConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the chat on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run().await?;
    Ok(())
}

async fn run() -> booking_assist::error::Result<()> {
    let config = BookingConfig::from_env()?;
    let today = chrono::Local::now().date_naive();

    eprintln!("📅 Booking Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Date format: {}", config.locale);
    eprintln!(
        "   Booking window: {} months from {}",
        config.horizon_months, today
    );
    eprintln!("   Type a message or a choice number and press Enter. /help for commands.\n");

    let mut cli = CliChannel::new(config, today);
    cli.run().await?;

    if cli.session().is_complete() {
        tracing::info!(
            name = %cli.session().state().name,
            "Appointment booked"
        );
    }
    Ok(())
}
