use log::{error, info, warn};
use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Exit status when a second Ctrl+C interrupts a stop in progress.
const EXIT_INTERRUPTED: i32 = 130;

/// Cancels the upload session on Ctrl+C, or once a fixed run time is over.
struct StopTrigger {
    shutdown: CancellationToken,
}

impl StopTrigger {
    fn new(shutdown: CancellationToken) -> Self {
        Self { shutdown }
    }

    async fn ctrl_c() {
        loop {
            match signal::ctrl_c().await {
                Ok(()) => return,
                Err(e) => error!("Error while waiting for Ctrl+C: {}", e),
            }
        }
    }

    async fn listen(&self, run_for_millis: Option<u64>) {
        match run_for_millis {
            Some(millis) => {
                tokio::time::sleep(Duration::from_millis(millis)).await;
                info!("Run time of {} ms over. Stopping upload session...", millis);
                self.shutdown.cancel();
            }
            None => {
                Self::ctrl_c().await;
                info!("Ctrl+C received. Stopping upload session...");
                self.shutdown.cancel();

                // The signal handler stays installed, so a stuck stop would
                // otherwise ignore every further Ctrl+C.
                Self::ctrl_c().await;
                warn!("Second Ctrl+C received. Exiting immediately.");
                std::process::exit(EXIT_INTERRUPTED);
            }
        }
    }
}

/// Spawns a task cancelling `shutdown` on Ctrl+C or after `run_for_millis`.
///
/// Cancellation is sticky: a session started after the request still sees it.
pub fn listen_for_shutdown(
    shutdown: CancellationToken,
    run_for_millis: Option<u64>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        StopTrigger::new(shutdown).listen(run_for_millis).await;
    })
}
