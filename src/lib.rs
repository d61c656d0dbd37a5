pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    connection_fetcher::ConnectionFetcher, engine::FetchEngine, socket_fetcher::SocketFetcher,
};
pub use domain::model::{FetchReport, FetcherKind, Locator};
pub use domain::ports::{ConfigProvider, Fetcher, Storage};
pub use utils::error::{FetchError, Result};
