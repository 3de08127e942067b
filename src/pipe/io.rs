//! Byte- and line-oriented primitives on the pipe channels.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::ChildStdin;

use crate::{Error, Result};

/// The write channel bound to a child's standard input.
///
/// Writes are buffered; call [`flush`](Self::flush) before waiting on the
/// child, otherwise data the child is blocked reading may still be sitting
/// in the parent's buffer.
#[derive(Debug)]
pub struct WriteChannel {
    inner: BufWriter<ChildStdin>,
}

impl WriteChannel {
    pub(crate) fn new(stdin: ChildStdin) -> Self {
        Self {
            inner: BufWriter::new(stdin),
        }
    }

    /// Write a buffer to the child's input.
    ///
    /// If the child has already closed its input, this returns a broken-pipe
    /// IO error rather than raising a signal.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data).await.map_err(Error::io)
    }

    /// Write a single byte to the child's input.
    pub async fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.inner.write_u8(byte).await.map_err(Error::io)
    }

    /// Write a line to the child's input, appending a newline.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        self.inner.write_all(line.as_bytes()).await.map_err(Error::io)?;
        self.inner.write_u8(b'\n').await.map_err(Error::io)
    }

    /// Flush buffered writes through to the child.
    pub async fn flush(&mut self) -> Result<()> {
        self.inner.flush().await.map_err(Error::io)
    }

    /// Flush and close the channel, signaling end-of-input to the child.
    pub(crate) async fn shutdown(mut self) -> Result<()> {
        self.inner.shutdown().await.map_err(Error::io)
    }
}

/// A read channel bound to a child's standard output or error.
#[derive(Debug)]
pub struct ReadChannel<R> {
    inner: BufReader<R>,
}

impl<R: AsyncRead + Unpin> ReadChannel<R> {
    pub(crate) fn new(stream: R) -> Self {
        Self {
            inner: BufReader::new(stream),
        }
    }

    /// Read up to `buf.len()` bytes from the channel.
    ///
    /// Returns the number of bytes read; zero means the child closed its
    /// end of the channel.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.inner.read(buf).await.map_err(Error::io)
    }

    /// Read a single byte, or `None` at end-of-stream.
    pub async fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.inner.read(&mut byte).await.map_err(Error::io)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    /// Read one line, without the trailing newline, or `None` at
    /// end-of-stream.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let bytes = self.inner.read_line(&mut line).await.map_err(Error::io)?;
        if bytes == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Read everything remaining on the channel until the child closes it.
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.inner.read_to_end(&mut data).await.map_err(Error::io)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_channel_over_buffer() {
        // ReadChannel is generic over any AsyncRead, so an in-memory cursor
        // stands in for a child stream.
        let data: &[u8] = b"first line\nsecond\nrest";
        let mut channel = ReadChannel::new(data);

        assert_eq!(channel.read_line().await.unwrap().as_deref(), Some("first line"));
        assert_eq!(channel.read_byte().await.unwrap(), Some(b's'));
        assert_eq!(channel.read_to_end().await.unwrap(), b"econd\nrest");
        assert_eq!(channel.read_byte().await.unwrap(), None);
        assert_eq!(channel.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn read_channel_strips_crlf() {
        let data: &[u8] = b"windows line\r\n";
        let mut channel = ReadChannel::new(data);
        assert_eq!(
            channel.read_line().await.unwrap().as_deref(),
            Some("windows line")
        );
    }

    #[tokio::test]
    async fn zero_length_read_at_eof() {
        let data: &[u8] = b"abc";
        let mut channel = ReadChannel::new(data);
        let mut buf = [0u8; 16];
        assert_eq!(channel.read(&mut buf).await.unwrap(), 3);
        assert_eq!(channel.read(&mut buf).await.unwrap(), 0);
        assert_eq!(channel.read(&mut buf).await.unwrap(), 0);
    }
}
