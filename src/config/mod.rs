pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, FetcherKind, Locator};
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_port, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_URL: &str = "http://www.google.com/";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "file.txt";

/// Resolves the target locator, letting an explicit port win over the URL's.
pub fn locator_from<C: ConfigProvider + ?Sized>(config: &C) -> Result<Locator> {
    let mut locator = Locator::parse(config.target_url())?;
    if let Some(port) = config.port_override() {
        locator.set_port(port);
    }
    Ok(locator)
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "http-getter")]
#[command(about = "Fetch one HTTP resource over a raw socket or a managed connection")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    #[arg(long, help = "Port to connect to, overriding the URL's")]
    pub port: Option<u16>,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    #[arg(long, value_enum, help = "Fetcher to use [default: socket]")]
    pub fetcher: Option<FetcherKind>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn target_url(&self) -> &str {
        &self.url
    }

    fn port_override(&self) -> Option<u16> {
        self.port
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn output_file(&self) -> &str {
        &self.output
    }

    fn fetcher(&self) -> FetcherKind {
        self.fetcher.unwrap_or_default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.url)?;
        validate_port("port", self.port)?;
        validate_path("output-dir", &self.output_dir)?;
        validate_path("output", &self.output)?;
        Ok(())
    }
}
