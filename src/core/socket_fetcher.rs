use crate::core::lines::LineReader;
use crate::core::{Fetcher, FetchReport, FetcherKind, Locator, Result, Storage};
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

/// Speaks HTTP/1.1 by hand over a plain TCP connection.
pub struct SocketFetcher<S: Storage> {
    locator: Locator,
    storage: S,
}

impl<S: Storage> SocketFetcher<S> {
    pub fn new(locator: Locator, storage: S) -> Self {
        Self { locator, storage }
    }

    /// Request line, `Host` header and the blank line closing the header section.
    pub fn generate_request(&self) -> String {
        format!(
            "GET {} HTTP/1.1\nHost: {}\n\n",
            self.locator.path(),
            self.locator.host()
        )
    }

    /// Runs one request/response exchange over an already open stream.
    ///
    /// The output is created only after the header section has been consumed,
    /// so a stream that fails mid-headers leaves no file behind.
    pub async fn exchange<T>(&self, stream: T, output: &str) -> Result<FetchReport>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        let mut lines = LineReader::new(BufReader::new(stream));

        let request = self.generate_request();
        tracing::debug!("Sending request to {}:\n{}", self.locator, request);
        let stream = lines.get_mut();
        stream.write_all(request.as_bytes()).await?;
        stream.write_all(b"\n").await?;
        stream.flush().await?;

        let mut report = FetchReport::new(FetcherKind::Socket, self.storage.resolve(output));

        while let Some(line) = lines.next_line().await? {
            if line.is_empty() {
                break;
            }
            let line = String::from_utf8_lossy(line).into_owned();
            tracing::info!("{}", line);
            report.header_lines.push(line);
        }

        let mut writer = self.storage.create(output).await?;
        while let Some(line) = lines.next_line().await? {
            writer.write_all(line).await?;
            report.record_body_line(line);
        }
        writer.flush().await?;

        Ok(report)
    }
}

#[async_trait]
impl<S: Storage> Fetcher for SocketFetcher<S> {
    fn kind(&self) -> FetcherKind {
        FetcherKind::Socket
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn fetch(&self, output: &str) -> Result<FetchReport> {
        tracing::debug!(
            "Connecting to {}:{}",
            self.locator.host(),
            self.locator.port()
        );
        let stream = TcpStream::connect((self.locator.host(), self.locator.port())).await?;
        self.exchange(stream, output).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;

    #[test]
    fn test_generate_request() {
        let storage = LocalStorage::new(".".to_string());
        let fetcher = SocketFetcher::new(Locator::new("example.com", "/index.html"), storage);

        assert_eq!(
            fetcher.generate_request(),
            "GET /index.html HTTP/1.1\nHost: example.com\n\n"
        );
    }

    #[test]
    fn test_request_sends_no_extra_headers() {
        let storage = LocalStorage::new(".".to_string());
        let fetcher = SocketFetcher::new(Locator::new("example.com", "/").with_port(8080), storage);
        let request = fetcher.generate_request();

        let lines: Vec<&str> = request.split('\n').collect();
        assert_eq!(lines, vec!["GET / HTTP/1.1", "Host: example.com", "", ""]);
        assert!(!request.contains("Connection"));
        assert!(!request.contains("User-Agent"));
    }
}
