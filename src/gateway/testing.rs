//! Scripted in-memory model for tests.

use super::gemini::{GenerateRequest, TextModel};
use super::Gateway;
use std::collections::VecDeque;
use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};

/// Replies are handed out in order; `Err` becomes a transport failure.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<GenerateRequest>>,
    gate: Mutex<Option<mpsc::Receiver<()>>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        })
    }

    /// Every call blocks until the returned sender fires once.
    pub fn gated(replies: Vec<Result<String, String>>) -> (Arc<Self>, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let model = Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            gate: Mutex::new(Some(rx)),
        });
        (model, tx)
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl TextModel for ScriptedModel {
    fn generate(&self, request: &GenerateRequest) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(rx) = self.gate.lock().unwrap().as_ref() {
            let _ = rx.recv_timeout(Duration::from_secs(5));
        }
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(e)) => Err(anyhow::anyhow!(e)),
            None => Err(anyhow::anyhow!("no scripted reply left")),
        }
    }
}

pub fn gateway(model: &Arc<ScriptedModel>) -> Gateway {
    Gateway::new(Arc::clone(model) as Arc<dyn TextModel>, "test-model")
}

/// Poll `cond` until it holds or two seconds pass.
pub fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}
