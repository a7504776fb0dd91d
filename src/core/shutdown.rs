//! Process signal handling for interrupting runs
//!
//! The first SIGINT/SIGTERM/SIGHUP (or Ctrl-C) is broadcast to subscribers so
//! the running benchmark can shut its queue down cleanly; a second one exits
//! the process immediately with status 130.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Broadcasts a one-shot "stop now" request to any number of listeners
#[derive(Clone)]
pub struct ShutdownSignal {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(8);
        let signal = Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        };
        (signal, shutdown_rx)
    }

    /// Create a signal wired to the process's termination signals
    ///
    /// Must be called from within a tokio runtime.
    pub fn install() -> (Self, broadcast::Receiver<()>) {
        let (signal, shutdown_rx) = Self::new();
        setup_signal_handlers(
            signal.shutdown_tx.clone(),
            Arc::clone(&signal.shutdown_requested),
        );
        (signal, shutdown_rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }
}

fn setup_signal_handlers(shutdown_tx: broadcast::Sender<()>, shutdown_requested: Arc<AtomicBool>) {
    let signal_count = Arc::new(AtomicUsize::new(0));

    let notify = move |tx: &broadcast::Sender<()>, requested: &AtomicBool, count: &AtomicUsize| {
        let prev = count.fetch_add(1, Ordering::AcqRel);
        requested.store(true, Ordering::Release);
        let _ = tx.send(());
        if prev >= 1 {
            log::warn!("second interrupt received; exiting");
            std::process::exit(130);
        }
    };

    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }

        use tokio::signal::unix::{signal, SignalKind};
        for kind in [
            SignalKind::terminate(),
            SignalKind::hangup(),
            SignalKind::quit(),
        ] {
            let tx = shutdown_tx.clone();
            let requested = Arc::clone(&shutdown_requested);
            let count = Arc::clone(&signal_count);
            tokio::spawn(async move {
                if let Ok(mut sig) = signal(kind) {
                    while sig.recv().await.is_some() {
                        notify(&tx, &requested, &count);
                    }
                }
            });
        }
    }

    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            notify(&shutdown_tx, &shutdown_requested, &signal_count);
        }
    });
}
