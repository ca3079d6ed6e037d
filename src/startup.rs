/*!
 * Deferred start of the augmentation pass.
 *
 * The pass runs once the surrounding content is in place. Hosts that know
 * when that happens hand over a readiness signal; everyone else gets a fixed
 * delay. A signal always carries a fallback delay so a host that never
 * signals still gets its tooltips.
 */

use log::debug;
use std::time::Duration;
use tokio::sync::oneshot;

/// When the augmentation pass may start
#[derive(Debug)]
pub enum Readiness {
    /// Start after a fixed delay
    Delay(Duration),
    /// Start when the host signals, or after `fallback` at the latest
    Signal {
        /// Fires when the host's content is in place
        ready: oneshot::Receiver<()>,
        /// Upper bound on the wait
        fallback: Duration,
    },
}

/// What ended the wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyCause {
    /// The delay elapsed
    Timer,
    /// The host signalled readiness
    Signal,
}

impl Readiness {
    /// Start immediately
    pub fn immediate() -> Self {
        Self::Delay(Duration::ZERO)
    }

    /// Readiness driven by a host signal, plus the sender to fire it
    pub fn signal(fallback: Duration) -> (oneshot::Sender<()>, Self) {
        let (tx, ready) = oneshot::channel();
        (tx, Self::Signal { ready, fallback })
    }

    /// Wait until the pass may start
    pub async fn wait(self) -> ReadyCause {
        match self {
            Self::Delay(delay) => {
                if !delay.is_zero() {
                    debug!("Waiting {:?} before adding tooltips", delay);
                    tokio::time::sleep(delay).await;
                }
                ReadyCause::Timer
            }
            Self::Signal { ready, fallback } => {
                let deadline = tokio::time::Instant::now() + fallback;
                tokio::select! {
                    result = ready => match result {
                        Ok(()) => ReadyCause::Signal,
                        Err(_) => {
                            // Sender dropped without signalling
                            debug!("Readiness signal dropped, waiting for fallback timer");
                            tokio::time::sleep_until(deadline).await;
                            ReadyCause::Timer
                        }
                    },
                    _ = tokio::time::sleep_until(deadline) => ReadyCause::Timer,
                }
            }
        }
    }
}
