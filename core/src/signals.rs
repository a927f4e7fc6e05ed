//! OS signal handling for graceful shutdown.

/// Completes when the process receives a termination signal.
///
/// On Unix this is SIGINT (Ctrl-C) or SIGTERM (systemd/Kubernetes stop);
/// elsewhere only Ctrl-C is handled.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
    }
    Ok(())
}

#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
