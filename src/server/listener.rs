use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpSocket};
use tracing::info;

use crate::http::connection::Connection;
use crate::server::ServerState;

/// Creates the listening socket with address reuse enabled.
pub fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = TcpSocket::new_v4()?;
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    Ok(socket.listen(128)?)
}

/// Accepts connections and hands each one to its own task.
///
/// The loop never handles a request itself, so one slow or malformed client
/// only ever ties up its own task. Finished tasks are reclaimed by the
/// runtime.
pub async fn serve(listener: TcpListener, state: Arc<ServerState>) -> anyhow::Result<()> {
    info!("Listening on {}", listener.local_addr()?);

    loop {
        let (socket, peer) = listener.accept().await?;
        tracing::debug!("Accepted connection from {}", peer);

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, peer, state);
            if let Err(e) = conn.run().await {
                tracing::warn!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
