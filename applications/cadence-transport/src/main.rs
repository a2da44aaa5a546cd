/// Cadence Transport - command-line transport bar
use anyhow::Context;
use cadence_core::format_time;
use cadence_playback::{PlaybackController, RepeatMode};
use cadence_transport::{
    catalog::Catalog,
    config::{OutputFormat, TransportConfig},
    device::LoggingDevice,
    script::{parse_script, ScriptRunner},
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence-transport")]
#[command(about = "Drive a Cadence playback session from the command line", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./cadence.toml when present)
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a transport script and print every published snapshot
    Run {
        /// Catalog JSON file
        #[arg(short = 'C', long)]
        catalog: PathBuf,

        /// Script file, one command per line
        script: PathBuf,

        /// Initial volume (0-100)
        #[arg(long)]
        volume: Option<u8>,

        /// Initial repeat mode
        #[arg(long, value_parser = parse_repeat)]
        repeat: Option<RepeatMode>,

        /// Start with shuffle on
        #[arg(long)]
        shuffle: bool,

        /// Output format: snapshot or bar
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },
    /// List the tracks in a catalog
    Catalog {
        /// Catalog JSON file
        path: PathBuf,
    },
    /// Print the effective configuration
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = TransportConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run {
            catalog,
            script,
            volume,
            repeat,
            shuffle,
            format,
            pretty,
        } => {
            if let Some(volume) = volume {
                config.playback.volume = volume;
            }
            if let Some(repeat) = repeat {
                config.playback.repeat = repeat;
            }
            if shuffle {
                config.playback.shuffle = true;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if pretty {
                config.output.pretty = true;
            }
            config.validate()?;

            run(&config, &catalog, &script)?;
        }
        Commands::Catalog { path } => {
            list_catalog(&path)?;
        }
        Commands::ShowConfig => {
            config.validate()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn run(config: &TransportConfig, catalog_path: &Path, script_path: &Path) -> anyhow::Result<()> {
    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    let text = std::fs::read_to_string(script_path)
        .with_context(|| format!("reading script {}", script_path.display()))?;
    let script = parse_script(&text)?;

    tracing::info!(
        commands = script.len(),
        volume = config.playback.volume,
        repeat = ?config.playback.repeat,
        shuffle = config.playback.shuffle,
        "starting playback session"
    );

    let mut controller =
        PlaybackController::new(config.playback.clone()).with_device(Box::new(LoggingDevice));

    let runner = ScriptRunner::new(&catalog, config.output.format, config.output.pretty);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = runner.run(&mut controller, &script, &mut out)?;

    controller.shutdown();

    tracing::info!(
        published = summary.published,
        ignored = summary.ignored,
        "playback session closed"
    );
    Ok(())
}

fn list_catalog(path: &Path) -> anyhow::Result<()> {
    let catalog = Catalog::load(path)?;

    for album in &catalog.albums {
        println!("{} - {} ({})", album.artist, album.name, album.id);
        for track in catalog.album_tracks(&album.id)? {
            println!(
                "  {:<12} {:>6}  {}",
                track.id.as_str(),
                format_time(track.duration_seconds),
                track.title
            );
        }
    }

    Ok(())
}

fn parse_repeat(value: &str) -> Result<RepeatMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "off" => Ok(RepeatMode::Off),
        "all" => Ok(RepeatMode::All),
        "one" => Ok(RepeatMode::One),
        other => Err(format!(
            "unknown repeat mode {:?} (expected off, all or one)",
            other
        )),
    }
}
