use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Cancelled by user")]
pub struct Cancelled;

/// Shared flag tripped by the escape key and checked before every
/// network call and git subprocess.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// True for the keys that abort the run
pub fn is_cancel_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Background reader of terminal key presses.
///
/// Cancel keys trip the shared [`Cancellation`]; every press is also
/// forwarded so the selector can consume it.
pub struct KeyListener {
    rx: mpsc::UnboundedReceiver<KeyEvent>,
    task: Option<JoinHandle<()>>,
}

impl KeyListener {
    pub fn spawn(cancel: Cancellation) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();

            while let Some(event) = reader.next().await {
                let event = match event {
                    Ok(event) => event,
                    Err(e) => {
                        debug!(error = %e, "terminal input unavailable, key listener stopped");
                        break;
                    }
                };
                let crossterm::event::Event::Key(key) = event else {
                    continue;
                };
                // Filter for Press only (Windows reports releases too)
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_cancel_key(&key) {
                    debug!("cancel key pressed");
                    cancel.cancel();
                }
                if tx.send(key).is_err() {
                    break;
                }
            }
        });

        Self {
            rx,
            task: Some(task),
        }
    }

    /// Listener fed by an existing channel instead of the terminal
    pub fn from_receiver(rx: mpsc::UnboundedReceiver<KeyEvent>) -> Self {
        Self { rx, task: None }
    }

    /// Next key press, or None once the listener has stopped
    pub async fn next_key(&mut self) -> Option<KeyEvent> {
        self.rx.recv().await
    }

    /// Throw away presses queued before now, returning how many were dropped.
    ///
    /// Keys typed while the search was loading must not act on the picker.
    /// A queued Esc has already tripped the [`Cancellation`].
    pub fn discard_pending(&mut self) -> usize {
        let mut dropped = 0;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        dropped
    }

    /// Stop reading the terminal so child processes can own it
    pub fn stop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
        self.rx.close();
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}
