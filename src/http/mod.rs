//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 surface of the server: one GET request
//! per connection, one response, then the connection closes.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection handler driving the request-response lifecycle
//! - **`parser`**: Parses an incoming HTTP request from the read buffer
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with canned error/redirect pages
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: Content-type classification from file extensions
//!
//! # Connection Lifecycle
//!
//! Each client connection moves through a fixed sequence of phases:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate bytes until the header terminator
//!        └──────┬──────┘
//!               │ Headers received (or peer closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Resolving      │ ← Parse request, map path to a target
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send exactly one response
//!        └──────┬───────────┘
//!               │ Response sent
//!               └─ Close (no keep-alive)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use staticd::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, peer) = listener.accept().await?;
//!         let state = state.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, peer, state);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
