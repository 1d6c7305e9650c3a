use clap::Parser;
use collage_plate::cli::{Cli, Command};
use collage_plate::config::{CollageConfig, PlateConfig};
use collage_plate::{collage, engines, plate, preview};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is kept for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("collage-plate v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Collage(args) => {
            let config = CollageConfig::from(args);
            let preview = preview::select(config.preview);
            let outcome = collage::run(&config, preview.as_ref())?;

            if !outcome.skipped.is_empty() {
                println!("Skipped {} unreadable file(s):", outcome.skipped.len());
                for path in &outcome.skipped {
                    println!("  {}", path.display());
                }
            }
            println!(
                "Collage created ({}x{}) and saved as '{}'",
                outcome.width,
                outcome.height,
                outcome.output_path.display()
            );
        }
        Command::Plate(args) => {
            let json = args.json;
            let config = PlateConfig::from(args);
            let engine = engines::create(&config.ocr)?;
            let preview = preview::select(config.preview);
            let reading = plate::run(&config, engine.as_ref(), preview.as_ref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reading)?);
            } else {
                println!("Recognized plate: {}", reading.text);
            }
        }
    }

    Ok(())
}
