use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::buffer::BufferLimits;
use crate::http::connection::{Connection, ConnectionError};
use crate::server::handler::Handler;

/// A running server. Accepts connections in a background task until
/// [`close`](Server::close) is called.
pub struct Server {
    local_addr: SocketAddr,
    is_open: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    accept_task: JoinHandle<()>,
}

impl Server {
    /// Binds `cfg.listen_addr` and starts accepting connections.
    ///
    /// Failing to bind is the only fatal error; everything after that is
    /// handled per connection.
    pub async fn serve<H: Handler>(cfg: &Config, handler: H) -> anyhow::Result<Server> {
        let listener = TcpListener::bind(&cfg.listen_addr)
            .await
            .with_context(|| format!("error creating listener on {}", cfg.listen_addr))?;
        let local_addr = listener.local_addr()?;
        info!("Listening on {}", local_addr);

        let is_open = Arc::new(AtomicBool::new(true));
        let shutdown = Arc::new(Notify::new());

        let accept_task = tokio::spawn(accept_loop(
            listener,
            Arc::clone(&is_open),
            Arc::clone(&shutdown),
            Arc::new(handler),
            cfg.buffer_limits(),
        ));

        Ok(Server {
            local_addr,
            is_open,
            shutdown,
            accept_task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections. Connections already accepted run to
    /// completion.
    pub fn close(&self) {
        self.is_open.store(false, Ordering::Release);
        self.shutdown.notify_one();
    }

    /// Waits for the accept loop to exit after [`close`](Server::close).
    pub async fn closed(self) -> anyhow::Result<()> {
        self.accept_task.await.context("accept loop panicked")
    }
}

/// Accepts until the shutdown notification fires, which is how `close`
/// normally ends the loop. The `is_open` check only covers an accept that
/// fails while a close is already in progress; any other accept error is
/// logged and the loop keeps going.
async fn accept_loop(
    listener: TcpListener,
    is_open: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    handler: Arc<dyn Handler>,
    limits: BufferLimits,
) {
    loop {
        let accepted = tokio::select! {
            res = listener.accept() => res,
            _ = shutdown.notified() => {
                info!("Listener closed");
                return;
            }
        };

        let (socket, peer) = match accepted {
            Ok(conn) => conn,
            Err(e) => {
                if !is_open.load(Ordering::Acquire) {
                    return;
                }
                error!(error = %e, "Error accepting connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, limits);
            match conn.run(handler.as_ref()).await {
                Ok(()) => {}
                Err(ConnectionError::Parse(e)) => {
                    warn!(peer = %peer, error = %e, "Error parsing request");
                }
                Err(e) => {
                    error!(peer = %peer, error = %e, "Connection error");
                }
            }
        });
    }
}
