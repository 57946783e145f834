use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Server configuration, built once at startup and never mutated.
///
/// Every connection task sees this through a shared read-only reference.
#[derive(Debug, Clone, Parser)]
#[command(name = "staticd")]
#[command(about = "Minimal static-file HTTP server")]
#[command(version)]
pub struct ServerConfig {
    /// TCP port to listen on
    #[arg(short, long, default_value_t = 8080, env = "STATICD_PORT")]
    pub port: u16,

    /// Web root directory; all request paths resolve beneath it
    #[arg(short, long, default_value = ".", env = "STATICD_ROOT")]
    pub root: PathBuf,

    /// Index file served for directory requests
    #[arg(short, long, default_value = "index.html", env = "STATICD_INDEX")]
    pub index: String,

    /// Extra MIME map file in mime.types format
    #[arg(short, long, env = "STATICD_MIME_MAP")]
    pub mime_map: Option<PathBuf>,

    /// Serve a generated directory listing when the index file is missing
    #[arg(short, long, env = "STATICD_AUTO_INDEX")]
    pub auto_index: bool,

    /// Log one line per completed request
    #[arg(short, long, env = "STATICD_LOG")]
    pub log_requests: bool,

    /// Per-connection read/write timeout in seconds
    #[arg(long, default_value_t = 30, env = "STATICD_TIMEOUT")]
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// The socket address the listener binds: all interfaces, configured port.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Deadline applied separately to the read and write phase of a connection.
    pub fn io_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
