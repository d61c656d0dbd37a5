pub mod connection_fetcher;
pub mod engine;
pub mod lines;
pub mod socket_fetcher;

pub use crate::domain::model::{FetchReport, FetcherKind, Locator};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Storage};
pub use crate::utils::error::Result;
