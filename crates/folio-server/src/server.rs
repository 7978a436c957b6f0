//! TCP accept loop. One task per connection, one request per connection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use folio_types::error::{FolioError, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

use crate::http::{self, HttpResponse};
use crate::routes::ServerState;

/// How long a client may take to send a complete request.
const READ_TIMEOUT: Duration = Duration::from_secs(15);

/// A bound, not yet running, server.
pub struct SaveServer {
    listener: TcpListener,
    state: Arc<ServerState>,
}

impl SaveServer {
    pub async fn bind(addr: impl ToSocketAddrs, state: ServerState) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            state: Arc::new(state),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails.
    pub async fn run(self) -> Result<()> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            let state = Arc::clone(&self.state);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, state).await {
                    log::warn!("Connection from {peer}: {e}");
                }
            });
        }
    }
}

async fn handle_connection(mut stream: TcpStream, state: Arc<ServerState>) -> Result<()> {
    let request = match tokio::time::timeout(READ_TIMEOUT, read_request(&mut stream)).await {
        Ok(Ok(Some(request))) => request,
        Ok(Ok(None)) => return Ok(()),
        Ok(Err(e)) => {
            let resp = HttpResponse::text(400, &e.to_string());
            stream.write_all(&resp.to_bytes(true)).await?;
            return Ok(());
        },
        Err(_) => return Err(FolioError::Http("read timed out".to_string())),
    };

    let include_body = request.method != "HEAD";
    // File I/O happens inside the handler.
    let response = tokio::task::spawn_blocking(move || state.handle(&request))
        .await
        .map_err(|e| FolioError::Http(format!("handler failed: {e}")))?;
    log::debug!("-> {}", response.status);

    stream.write_all(&response.to_bytes(include_body)).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Read until a full request has arrived. `None` if the peer closed first.
async fn read_request(stream: &mut TcpStream) -> Result<Option<http::HttpRequest>> {
    let mut buf = Vec::with_capacity(8192);
    let mut chunk = [0u8; 8192];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(request) = http::parse_request(&buf)? {
            return Ok(Some(request));
        }
    }
}
