use log::{debug, error};
use tokio::sync::watch::Sender;

#[cfg(windows)]
async fn wait_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("error, ctrl_c, {:?}", e);
    }
    debug!("recv ctrl_c signal");
}

#[cfg(unix)]
async fn wait_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(v) => v,
        Err(e) => {
            error!("error, signal, {:?}", e);
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = terminate.recv() => {
            debug!("recv unix terminate signal");
        },
        s = tokio::signal::ctrl_c() => {
            debug!("recv unix ctrl_c signal, {:?}", s);
        }
    }
}

/// Waits for SIGTERM or ctrl-c, then flips the watch so every socket task exits.
pub async fn wait_shutdown(signal_tx: Sender<bool>) {
    wait_signal().await;

    if let Err(e) = signal_tx.send(true) {
        error!("error, send shutdown, {:?}", e);
    }
}
