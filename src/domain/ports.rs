use crate::domain::model::{FetchReport, FetcherKind, Locator};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWrite;

pub trait Storage: Send + Sync {
    type Writer: AsyncWrite + Unpin + Send;

    fn resolve(&self, name: &str) -> PathBuf;

    /// Creates or truncates `name`. Nothing is touched until this is called.
    fn create(&self, name: &str) -> impl std::future::Future<Output = Result<Self::Writer>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn target_url(&self) -> &str;
    fn port_override(&self) -> Option<u16>;
    fn output_dir(&self) -> &str;
    fn output_file(&self) -> &str;
    fn fetcher(&self) -> FetcherKind;
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    fn kind(&self) -> FetcherKind;
    fn locator(&self) -> &Locator;
    async fn fetch(&self, output: &str) -> Result<FetchReport>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Box<T> {
    fn kind(&self) -> FetcherKind {
        (**self).kind()
    }

    fn locator(&self) -> &Locator {
        (**self).locator()
    }

    async fn fetch(&self, output: &str) -> Result<FetchReport> {
        (**self).fetch(output).await
    }
}
