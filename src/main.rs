/*
 * Particle Field
 *
 * Desktop rendition of an animated portfolio background: geometric particles
 * drift across the window, lean toward the cursor and link up with faint
 * lines when they pass close to each other.
 *
 * Keys: T toggles the theme, D the debug overlay, Space pauses, Esc quits.
 */

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use particle_field::app::{self, LaunchOptions};
use particle_field::FieldConfig;

#[derive(Debug, Parser)]
#[command(name = "particle-field", version, about = "Pointer-reactive particle field")]
struct Cli {
    /// TOML file overriding the default field settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the dark/light theme preference is kept
    #[arg(long, default_value = "theme.json")]
    theme_file: PathBuf,

    /// Seed for a reproducible field
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over the -v flags when set
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut config = match &cli.config {
        Some(path) => FieldConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => FieldConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    app::launch(LaunchOptions {
        config,
        theme_file: cli.theme_file,
    });

    Ok(())
}
