// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "terrain-nav")]
#[command(about = "Terrain-aware camera navigation demo", long_about = None)]
pub struct Cli {
    /// Demo scene to load (courtyard, town)
    #[arg(long = "scene", default_value = "courtyard")]
    pub scene: String,

    /// JSON settings file overriding the stock navigation tuning
    #[arg(long = "settings")]
    pub settings: Option<PathBuf>,

    /// Start in orbit mode instead of first-person
    #[arg(long = "orbit", default_value = "false")]
    pub orbit: bool,
}
