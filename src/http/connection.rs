use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::anyhow;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::fs::resolver::{self, ResolvedTarget};
use crate::http::parser::{self, MAX_HEADER_BYTES};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::ServerState;

/// Handles one accepted connection end to end: read the request head,
/// resolve it, write exactly one response, close.
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    state: Arc<ServerState>,
    buffer: BytesMut,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, state: Arc<ServerState>) -> Self {
        Self {
            stream,
            peer,
            state,
            buffer: BytesMut::with_capacity(4096),
        }
    }

    /// Drives the full request/response lifecycle.
    ///
    /// Every outcome, including a malformed request, produces one response;
    /// only an I/O failure or a timeout cuts the connection short. Errors
    /// stay contained in this connection's task.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let io_timeout = self.state.config.io_timeout();

        let within_cap = timeout(io_timeout, self.read_headers())
            .await
            .map_err(|_| anyhow!("timed out reading request from {}", self.peer))??;

        let mut request = None;
        let response = if !within_cap {
            tracing::warn!(peer = %self.peer, "request head exceeds {} bytes", MAX_HEADER_BYTES);
            Response::not_implemented()
        } else {
            match parser::parse_request(&self.buffer) {
                Ok(req) => {
                    let response = if req.is_get() {
                        self.respond_to_get(&req)
                    } else {
                        Response::not_implemented()
                    };
                    request = Some(req);
                    response
                }
                Err(e) => {
                    tracing::debug!(peer = %self.peer, error = ?e, "malformed request");
                    Response::not_implemented()
                }
            }
        };

        let mut writer = ResponseWriter::new(response);
        timeout(io_timeout, writer.write_to_stream(&mut self.stream))
            .await
            .map_err(|_| anyhow!("timed out writing response to {}", self.peer))??;

        // The peer may already be gone; a failed shutdown is not worth
        // dropping the access record over.
        let _ = self.stream.shutdown().await;

        self.access_record(request.as_ref());

        Ok(())
    }

    /// Accumulates bytes until the `\r\n\r\n` terminator or EOF.
    ///
    /// Returns `Ok(false)` when the header cap was hit first; the buffer is
    /// then treated as a malformed request.
    async fn read_headers(&mut self) -> anyhow::Result<bool> {
        loop {
            if parser::find_headers_end(&self.buffer).is_some() {
                return Ok(true);
            }
            if self.buffer.len() > MAX_HEADER_BYTES {
                return Ok(false);
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;
            if n == 0 {
                // Peer closed; parse whatever arrived.
                return Ok(true);
            }
        }
    }

    fn respond_to_get(&self, request: &Request) -> Response {
        match resolver::resolve(&self.state.config, &request.path) {
            ResolvedTarget::File(path) => match std::fs::metadata(&path) {
                Ok(meta) => {
                    let content_type = self.state.mime.classify(&path);
                    Response::file(path, meta.len(), content_type)
                }
                // The file vanished between resolution and here.
                Err(_) => Response::not_found(),
            },
            ResolvedTarget::AutoIndex { listing, .. } => Response::auto_index(listing),
            ResolvedTarget::Redirect(location) => Response::redirect(&location),
            ResolvedTarget::NotFound => {
                tracing::debug!(peer = %self.peer, path = %request.path, "no such resource");
                Response::not_found()
            }
        }
    }

    /// One structured line per completed request, when enabled.
    fn access_record(&self, request: Option<&Request>) {
        if !self.state.config.log_requests {
            return;
        }

        tracing::info!(
            client = %self.peer.ip(),
            method = request.map(|r| r.method.as_str()).unwrap_or(""),
            path = request.map(|r| r.path.as_str()).unwrap_or(""),
            host = request.and_then(|r| r.host.as_deref()).unwrap_or(""),
            user_agent = request.and_then(|r| r.user_agent.as_deref()).unwrap_or(""),
            accept = request.and_then(|r| r.accept.as_deref()).unwrap_or(""),
            "request complete"
        );
    }
}
