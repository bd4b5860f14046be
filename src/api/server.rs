//! HTTP server lifecycle: serving, shutdown signals and draining.

use std::future::Future;
use std::io;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{info, warn};

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// After the signal, in-flight requests get `grace` to finish. Connections
/// still open when it expires are dropped and the call returns `Ok`.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
    grace: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (drain_tx, drain_rx) = oneshot::channel::<()>();

    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = drain_rx.await;
            })
            .await
    });

    tokio::select! {
        res = &mut server => return res.map_err(io::Error::other)?,
        () = shutdown => info!("Shutdown signal received, draining connections"),
    }

    let _ = drain_tx.send(());

    match tokio::time::timeout(grace, &mut server).await {
        Ok(res) => res.map_err(io::Error::other)?,
        Err(_) => {
            warn!(grace_secs = grace.as_secs_f64(), "Grace period elapsed, dropping open connections");
            server.abort();
            Ok(())
        }
    }
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
