//! Poll-ready asset loading.
//!
//! Loads run on a background thread and resolve into an immutable
//! value; the frame loop polls `is ready` instead of nesting logic in
//! completion callbacks. A failed load is reported once and the handle
//! stays empty; callers just keep skipping the missing object.

use std::fmt::Display;
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread;

use tracing::error;

enum State<T> {
    Pending(Receiver<Result<T, String>>),
    Ready(T),
    Failed,
}

pub struct Loading<T> {
    state: State<T>,
}

impl<T: Send + 'static> Loading<T> {
    /// Run `load` on a background thread.
    pub fn spawn<E, F>(load: F) -> Self
    where
        E: Display,
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        let (tx, rx) = channel();
        thread::spawn(move || {
            let _ = tx.send(load().map_err(|e| e.to_string()));
        });
        Self {
            state: State::Pending(rx),
        }
    }

    /// Immediately-ready handle, for scenes built in process.
    pub fn ready(value: T) -> Self {
        Self {
            state: State::Ready(value),
        }
    }

    /// Non-blocking: `Some` once the load resolved, `None` while it is
    /// still in flight or after it failed.
    pub fn poll(&mut self) -> Option<&T> {
        let settled = match &self.state {
            State::Pending(rx) => match rx.try_recv() {
                Ok(Ok(value)) => Some(State::Ready(value)),
                Ok(Err(msg)) => {
                    error!("asset load failed: {msg}");
                    Some(State::Failed)
                }
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    error!("asset loader thread died before delivering");
                    Some(State::Failed)
                }
            },
            _ => None,
        };
        if let Some(state) = settled {
            self.state = state;
        }
        match &self.state {
            State::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn failed(&self) -> bool {
        matches!(self.state, State::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn poll_until<T: Send + 'static>(handle: &mut Loading<T>) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if handle.poll().is_some() || handle.failed() {
                return handle.poll().is_some();
            }
            thread::sleep(Duration::from_millis(1));
        }
        panic!("load never settled");
    }

    #[test]
    fn successful_load_becomes_ready() {
        let mut handle = Loading::spawn(|| Ok::<_, String>(42u32));
        assert!(poll_until(&mut handle));
        assert_eq!(handle.poll(), Some(&42));
    }

    #[test]
    fn failed_load_reports_and_stays_empty() {
        let mut handle = Loading::<u32>::spawn(|| Err("no such file".to_string()));
        assert!(!poll_until(&mut handle));
        assert!(handle.failed());
        assert_eq!(handle.poll(), None);
    }

    #[test]
    fn ready_handle_needs_no_thread() {
        let mut handle = Loading::ready("scene");
        assert_eq!(handle.poll(), Some(&"scene"));
    }
}
