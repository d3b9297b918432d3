use std::time::Duration;

use clap::Parser;
use food_core::config::{ClientConfig, API_URL_ENV, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(name = "food-check", version, about = "Analyze food safety by barcode or ingredients")]
pub struct Cli {
    /// Barcode number, e.g. 3017620422003
    #[arg(short, long)]
    pub barcode: Option<String>,

    /// Ingredients separated by commas, e.g. "Water, Sugar, Salt"
    #[arg(short, long)]
    pub ingredients: Option<String>,

    /// Base URL of the analysis service
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Give up on the request after this many seconds
    #[arg(long, env = "FOOD_API_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Output machine-readable JSON
    #[arg(long)]
    pub json: bool,

    /// Never color the status badge
    #[arg(long)]
    pub no_color: bool,

    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Neither field was given on the command line.
    pub fn is_blank(&self) -> bool {
        self.barcode.is_none() && self.ingredients.is_none()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::from_lookup(|key| (key == API_URL_ENV).then(|| self.api_url.clone()))
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}
