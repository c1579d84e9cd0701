//! Process lifecycle: two supervised listeners and a bounded drain.
//!
//! Both servers share one `watch` shutdown channel. On signal (or if either
//! server exits on its own) the exporter is marked draining, both servers stop
//! accepting and finish in-flight requests, and the supervisor waits at most
//! `shutdown.drain_timeout_ms` for them.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;

use statsbridge_core::error::{BridgeError, Result};

use crate::app_state::{ExporterState, TargetState};
use crate::config::BridgeConfig;
use crate::router::{build_exporter_router, build_target_router};

/// Bound sockets for both listeners.
pub struct Listeners {
    pub target: TcpListener,
    pub exporter: TcpListener,
}

impl Listeners {
    pub async fn bind(cfg: &BridgeConfig) -> Result<Self> {
        Ok(Self {
            target: bind(cfg.target.listen_addr()?).await?,
            exporter: bind(cfg.exporter.listen_addr()?).await?,
        })
    }
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| BridgeError::ListenerBind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })
}

/// Bind both listeners from config and serve until `shutdown` resolves.
pub async fn run<F>(cfg: BridgeConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    cfg.validate()?;
    let listeners = Listeners::bind(&cfg).await?;
    serve(cfg, listeners, shutdown).await
}

/// Serve on already-bound listeners until `shutdown` resolves, then drain.
pub async fn serve<F>(cfg: BridgeConfig, listeners: Listeners, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let target_state = TargetState::from_config(&cfg);
    let exporter_state = ExporterState::from_config(&cfg)?;

    let (tx, rx) = watch::channel(false);
    let mut tasks = JoinSet::new();

    tasks.spawn(serve_one(
        "target",
        listeners.target,
        build_target_router(target_state),
        rx.clone(),
    ));
    tasks.spawn(serve_one(
        "exporter",
        listeners.exporter,
        build_exporter_router(exporter_state.clone()),
        rx,
    ));
    tracing::info!(target_url = %cfg.exporter.target_url, "statsbridge started");

    let mut result = Ok(());
    tokio::select! {
        _ = shutdown => {
            tracing::info!("shutdown requested, draining");
        }
        Some(res) = tasks.join_next() => {
            tracing::warn!("server exited before shutdown was requested");
            result = fold_exit(res);
        }
    }

    exporter_state.set_draining();
    let _ = tx.send(true);

    let drain = cfg.shutdown.drain_timeout();
    let drained = tokio::time::timeout(drain, async {
        let mut result = Ok(());
        while let Some(res) = tasks.join_next().await {
            if let Err(e) = fold_exit(res) {
                result = Err(e);
            }
        }
        result
    })
    .await;

    match drained {
        Ok(Err(e)) if result.is_ok() => result = Err(e),
        Ok(_) => {}
        Err(_) => {
            tracing::warn!(?drain, "drain deadline elapsed, aborting in-flight requests");
            tasks.abort_all();
        }
    }

    tracing::info!("statsbridge stopped");
    result
}

fn fold_exit(res: std::result::Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    match res {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "server task failed");
            Err(BridgeError::Network(format!("server task failed: {e}")))
        }
    }
}

async fn serve_one(
    name: &'static str,
    listener: TcpListener,
    app: Router,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    match listener.local_addr() {
        Ok(addr) => tracing::info!(server = name, listen = %addr, "listening"),
        Err(e) => tracing::warn!(server = name, error = %e, "listening (address unknown)"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await
        .map_err(|e| BridgeError::Network(format!("{name} server failed: {e}")))?;

    tracing::info!(server = name, "server stopped");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "signal received"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "signal received"),
    }
}
