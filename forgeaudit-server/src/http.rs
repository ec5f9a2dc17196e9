//! HTTP listener for the report API
//!
//! Thin hyper wrapper around the [`api`](crate::api) router: binds a
//! TCP listener, serves HTTP/1 connections, and forwards each request
//! as (method, path, session, body) to the handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use forgeaudit_core::report::DEFAULT_SESSION;

use crate::api::{self, AppState};

/// Clients editing concurrently pass this header to keep separate
/// working copies; absent, everything shares the default session.
const SESSION_HEADER: &str = "x-session-id";

/// HTTP server owning the accept loop for the report API.
pub struct HttpServer {
    port: u16,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _task: JoinHandle<()>,
}

impl HttpServer {
    /// Bind `127.0.0.1:port` and spawn the accept loop. Pass port 0 to
    /// let the OS assign one; read it back with [`port()`](Self::port).
    pub async fn start(state: Arc<AppState>, port: u16) -> Result<Self> {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let port = local_addr.port();

        debug!("report API listening on {}", local_addr);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            Self::accept_loop(listener, state, shutdown_rx).await;
        });

        Ok(Self {
            port,
            shutdown_tx: Some(shutdown_tx),
            _task: task,
        })
    }

    /// The full URL of the running server (e.g. `http://127.0.0.1:3000`).
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// The port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Gracefully shut down the server.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Accept loop that runs until shutdown is signalled.
    async fn accept_loop(
        listener: TcpListener,
        state: Arc<AppState>,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            debug!("connection from {}", addr);
                            let state = Arc::clone(&state);
                            tokio::spawn(async move {
                                let io = TokioIo::new(stream);
                                let service = service_fn(move |req| {
                                    let state = Arc::clone(&state);
                                    handle_request(state, req)
                                });
                                if let Err(e) = http1::Builder::new()
                                    .serve_connection(io, service)
                                    .await
                                {
                                    error!("connection error: {}", e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("accept error: {}", e);
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    debug!("report API shutting down");
                    break;
                }
            }
        }
    }
}

/// Handle a single HTTP request by dispatching to the API router.
async fn handle_request(
    state: Arc<AppState>,
    req: Request<hyper::body::Incoming>,
) -> std::result::Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let session = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SESSION)
        .to_string();

    let body = req.collect().await?.to_bytes();

    Ok(api::route(state, &method, &path, &session, body).await)
}
