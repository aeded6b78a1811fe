//! One gateway call running on a background thread.
//!
//! The main loop polls with `try_recv` every tick; nothing blocks the UI.

use crate::gateway::GatewayError;
use std::sync::mpsc;

pub enum Poll<T> {
    Pending,
    Ready(Result<T, GatewayError>),
}

pub struct Task<T> {
    rx: mpsc::Receiver<Result<T, GatewayError>>,
}

impl<T: Send + 'static> Task<T> {
    /// Run `f` on its own thread. Dropping the task drops the receiver;
    /// the worker's late send then fails silently.
    pub fn spawn<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, GatewayError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(f());
        });
        Self { rx }
    }

    pub fn poll(&self) -> Poll<T> {
        match self.rx.try_recv() {
            Ok(result) => Poll::Ready(result),
            Err(mpsc::TryRecvError::Empty) => Poll::Pending,
            Err(mpsc::TryRecvError::Disconnected) => Poll::Ready(Err(GatewayError::Service(
                "background worker exited without a result".into(),
            ))),
        }
    }
}

/// Poll an optional task slot, clearing it once resolved.
pub fn poll_slot<T: Send + 'static>(slot: &mut Option<Task<T>>) -> Option<Result<T, GatewayError>> {
    let result = match slot.as_ref()?.poll() {
        Poll::Pending => return None,
        Poll::Ready(result) => result,
    };
    *slot = None;
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::wait_for;

    #[test]
    fn test_task_delivers_result() {
        let mut slot = Some(Task::spawn(|| Ok(42)));
        let mut got = None;
        assert!(wait_for(|| {
            got = poll_slot(&mut slot);
            got.is_some()
        }));
        assert_eq!(got, Some(Ok(42)));
        assert!(slot.is_none());
    }

    #[test]
    fn test_panicking_worker_is_service_error() {
        let mut slot: Option<Task<u8>> = Some(Task::spawn(|| panic!("boom")));
        let mut got = None;
        assert!(wait_for(|| {
            got = poll_slot(&mut slot);
            got.is_some()
        }));
        assert!(matches!(got, Some(Err(GatewayError::Service(_)))));
    }
}
