use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::http::response::{Body, Response};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Chunk size for streamed file bodies.
const CHUNK_SIZE: usize = 8192;

/// Serializes the status line and header block, including the blank line
/// that separates headers from the body.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Writes one complete response onto a connection.
pub struct ResponseWriter {
    response: Response,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self { response }
    }

    /// Writes the head and then the body.
    ///
    /// File bodies are streamed in [`CHUNK_SIZE`] pieces, capped at the
    /// length declared in Content-Length. A file that shrank since the
    /// length was queried yields a short body; one that grew is truncated
    /// at the declared length.
    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        let head = serialize_head(&self.response);
        stream.write_all(&head).await?;

        match &self.response.body {
            Body::Bytes(bytes) => {
                stream.write_all(bytes).await?;
            }
            Body::File { path, len } => {
                let mut file = File::open(path).await?;
                let mut buf = vec![0u8; CHUNK_SIZE];
                let mut remaining = *len;

                while remaining > 0 {
                    let want = remaining.min(CHUNK_SIZE as u64) as usize;
                    let n = file.read(&mut buf[..want]).await?;
                    if n == 0 {
                        break;
                    }
                    stream.write_all(&buf[..n]).await?;
                    remaining -= n as u64;
                }
            }
        }

        stream.flush().await?;
        Ok(())
    }
}
