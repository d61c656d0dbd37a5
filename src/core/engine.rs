use crate::config::cli::LocalStorage;
use crate::config::locator_from;
use crate::core::connection_fetcher::ConnectionFetcher;
use crate::core::socket_fetcher::SocketFetcher;
use crate::core::{ConfigProvider, Fetcher, FetchReport, FetcherKind};
use crate::utils::error::Result;

pub struct FetchEngine<F: Fetcher> {
    fetcher: F,
}

impl<F: Fetcher> FetchEngine<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn run(&self, output: &str) -> Result<FetchReport> {
        tracing::info!(
            "Fetching {} with the {} fetcher",
            self.fetcher.locator(),
            self.fetcher.kind()
        );

        match self.fetcher.fetch(output).await {
            Ok(report) => {
                tracing::info!(
                    "Fetched {} header lines, {} body lines ({} bytes)",
                    report.header_lines.len(),
                    report.body_lines,
                    report.body_bytes
                );
                tracing::info!("Output saved to: {}", report.output_path.display());
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Fetch from {} abandoned: {}", self.fetcher.locator(), e);
                Err(e)
            }
        }
    }
}

impl FetchEngine<Box<dyn Fetcher>> {
    /// Builds the fetcher variant the configuration selects, writing under its output dir.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let locator = locator_from(config)?;
        let storage = LocalStorage::new(config.output_dir().to_string());

        let fetcher: Box<dyn Fetcher> = match config.fetcher() {
            FetcherKind::Socket => Box::new(SocketFetcher::new(locator, storage)),
            FetcherKind::Connection => Box::new(ConnectionFetcher::new(locator, storage)),
        };

        Ok(Self::new(fetcher))
    }
}
