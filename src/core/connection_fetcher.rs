use crate::core::lines::LineSplitter;
use crate::core::{Fetcher, FetchReport, FetcherKind, Locator, Result, Storage};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

/// Fetches through a managed `reqwest` connection, which owns the protocol handshake.
pub struct ConnectionFetcher<S: Storage> {
    locator: Locator,
    storage: S,
    client: Client,
}

impl<S: Storage> ConnectionFetcher<S> {
    pub fn new(locator: Locator, storage: S) -> Self {
        Self {
            locator,
            storage,
            client: Client::new(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

fn header_lines(headers: &HeaderMap) -> Vec<String> {
    headers
        .keys()
        .map(|name| {
            let values: Vec<String> = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect();
            format!("{}: {}", name, values.join(", "))
        })
        .collect()
}

#[async_trait]
impl<S: Storage> Fetcher for ConnectionFetcher<S> {
    fn kind(&self) -> FetcherKind {
        FetcherKind::Connection
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn fetch(&self, output: &str) -> Result<FetchReport> {
        let url = self.locator.url();
        tracing::debug!("Opening connection to {}", url);
        let mut response = self.client.get(&url).send().await?;

        let mut report = FetchReport::new(FetcherKind::Connection, self.storage.resolve(output));

        let status_line = format!("{:?} {}", response.version(), response.status());
        tracing::info!("{}", status_line);
        report.header_lines.push(status_line);
        for line in header_lines(response.headers()) {
            tracing::info!("{}", line);
            report.header_lines.push(line);
        }

        // The body is written whether or not a length was declared.
        report.content_length = response.content_length();
        if let Some(length) = report.content_length {
            tracing::debug!("Content-Length is {}, streaming body regardless", length);
        }

        let mut writer = self.storage.create(output).await?;
        let mut splitter = LineSplitter::new();
        while let Some(chunk) = response.chunk().await? {
            for line in splitter.push(&chunk) {
                writer.write_all(&line).await?;
                report.record_body_line(&line);
            }
        }
        if let Some(line) = splitter.finish() {
            writer.write_all(&line).await?;
            report.record_body_line(&line);
        }
        writer.flush().await?;

        Ok(report)
    }
}
