//! Byte-level line handling shared by both fetchers.
//!
//! A line ends at `\n`, `\r` or `\r\n`; the terminator is never part of the line.
//! Bytes are never decoded, so bodies in any charset pass through untouched.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

fn is_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Pulls terminator-stripped lines out of a buffered stream.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    line: Vec<u8>,
    // Set after a `\r`, so the `\n` of a split `\r\n` is dropped on the next read.
    skip_lf: bool,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: Vec::new(),
            skip_lf: false,
        }
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// `None` means end of stream; a final unterminated line is still returned.
    pub async fn next_line(&mut self) -> std::io::Result<Option<&[u8]>> {
        self.line.clear();
        let mut read_any = false;

        loop {
            let available = self.inner.fill_buf().await?;
            if available.is_empty() {
                return Ok(read_any.then_some(&self.line[..]));
            }

            let mut start = 0;
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    start = 1;
                }
            }

            match available[start..].iter().position(|&b| is_terminator(b)) {
                Some(offset) => {
                    let end = start + offset;
                    self.skip_lf = available[end] == b'\r';
                    self.line.extend_from_slice(&available[start..end]);
                    self.inner.consume(end + 1);
                    return Ok(Some(&self.line[..]));
                }
                None => {
                    let len = available.len();
                    read_any |= len > start;
                    self.line.extend_from_slice(&available[start..]);
                    self.inner.consume(len);
                }
            }
        }
    }
}

/// Reassembles lines from chunks whose boundaries fall anywhere.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
    skip_lf: bool,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();

        for &byte in chunk {
            if self.skip_lf {
                self.skip_lf = false;
                if byte == b'\n' {
                    continue;
                }
            }
            if is_terminator(byte) {
                self.skip_lf = byte == b'\r';
                lines.push(std::mem::take(&mut self.pending));
            } else {
                self.pending.push(byte);
            }
        }

        lines
    }

    pub fn finish(self) -> Option<Vec<u8>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_next_line_until_eof() {
        let mut reader = LineReader::new(&b"first\r\nsecond\nthird\rlast"[..]);

        assert_eq!(reader.next_line().await.unwrap(), Some(&b"first"[..]));
        assert_eq!(reader.next_line().await.unwrap(), Some(&b"second"[..]));
        assert_eq!(reader.next_line().await.unwrap(), Some(&b"third"[..]));
        assert_eq!(reader.next_line().await.unwrap(), Some(&b"last"[..]));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_next_line_lone_carriage_return() {
        let mut reader = LineReader::new(&b"hello\rworld\r\n\r\n"[..]);

        assert_eq!(reader.next_line().await.unwrap(), Some(&b"hello"[..]));
        assert_eq!(reader.next_line().await.unwrap(), Some(&b"world"[..]));
        assert_eq!(reader.next_line().await.unwrap(), Some(&b""[..]));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_next_line_crlf_split_across_reads() {
        let stream = Builder::new().read(b"one\r").read(b"\ntwo\r").read(b"\n").build();
        let mut reader = LineReader::new(tokio::io::BufReader::new(stream));

        assert_eq!(reader.next_line().await.unwrap(), Some(&b"one"[..]));
        assert_eq!(reader.next_line().await.unwrap(), Some(&b"two"[..]));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[test]
    fn test_splitter_joins_chunk_boundaries() {
        let mut splitter = LineSplitter::new();

        assert!(splitter.push(b"hel").is_empty());
        assert_eq!(splitter.push(b"lo\r"), vec![b"hello".to_vec()]);
        assert_eq!(splitter.push(b"\nwor"), Vec::<Vec<u8>>::new());
        assert_eq!(splitter.push(b"ld\n\nx"), vec![b"world".to_vec(), Vec::new()]);
        assert_eq!(splitter.finish(), Some(b"x".to_vec()));
    }

    #[test]
    fn test_splitter_lone_carriage_return() {
        let mut splitter = LineSplitter::new();

        assert_eq!(
            splitter.push(b"hello\rworld\r\n"),
            vec![b"hello".to_vec(), b"world".to_vec()]
        );
        assert_eq!(splitter.push(b"\r\r"), vec![Vec::<u8>::new(), Vec::<u8>::new()]);
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn test_splitter_finish_without_remainder() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.push(b"only\n"), vec![b"only".to_vec()]);
        assert_eq!(splitter.finish(), None);
    }
}
