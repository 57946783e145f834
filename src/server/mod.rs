//! TCP listening and shared server state.

pub mod listener;

use crate::config::ServerConfig;
use crate::http::mime::MimeMap;

/// Read-only state shared by every connection task.
///
/// Built once at startup; never mutated afterwards, so no locking is
/// involved anywhere in request handling.
pub struct ServerState {
    pub config: ServerConfig,
    pub mime: MimeMap,
}
