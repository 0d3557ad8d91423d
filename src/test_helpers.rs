use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::itinerary::MatchCriteria;
use crate::error::{FlightError, Result};
use crate::ports::diagnostics::DiagnosticSink;
use crate::ports::render::{RenderContext, RenderSource};

/// One scripted render pass: the blocks a context renders, the address
/// it reports, optional post-commit blocks, and injectable faults.
#[derive(Debug, Clone, Default)]
pub struct StageScript {
    pub blocks: Vec<String>,
    /// Blocks rendered after `commit_row`; falls back to `blocks`.
    pub blocks_after_commit: Option<Vec<String>>,
    pub address: String,
    pub fail_on_goto: bool,
    pub fail_on_ready: bool,
    pub fail_on_blocks: bool,
}

#[derive(Default)]
struct SharedState {
    scripts: Mutex<VecDeque<StageScript>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
    committed_rows: Mutex<Vec<usize>>,
}

/// Deterministic `RenderSource` replaying scripted render passes in
/// place of a live browser. Clones share state so tests can assert on
/// context and commit accounting after the session consumed the source.
///
/// Compiled for unit tests only; the `tests/` suite cannot see this
/// module and carries its own slimmer replay double.
#[derive(Clone, Default)]
pub struct ScriptedRender {
    shared: Arc<SharedState>,
}

impl ScriptedRender {
    #[must_use]
    pub fn with_stage(self, script: StageScript) -> Self {
        self.shared.scripts.lock().unwrap().push_back(script);
        self
    }

    pub fn contexts_opened(&self) -> usize {
        self.shared.opened.load(Ordering::SeqCst)
    }

    pub fn contexts_closed(&self) -> usize {
        self.shared.closed.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.shared.committed_rows.lock().unwrap().len()
    }

    pub fn committed_rows(&self) -> Vec<usize> {
        self.shared.committed_rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RenderSource for ScriptedRender {
    async fn open(&self) -> Result<Box<dyn RenderContext>> {
        self.shared.opened.fetch_add(1, Ordering::SeqCst);
        let script = self
            .shared
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Ok(Box::new(ScriptedContext {
            script,
            committed: false,
            closed: false,
            shared: Arc::clone(&self.shared),
        }))
    }
}

struct ScriptedContext {
    script: StageScript,
    committed: bool,
    closed: bool,
    shared: Arc<SharedState>,
}

/// Matches the live adapter's contract: dropping an un-closed context
/// still counts as a release.
impl Drop for ScriptedContext {
    fn drop(&mut self) {
        if !self.closed {
            self.shared.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl RenderContext for ScriptedContext {
    async fn goto(&mut self, _url: &str) -> Result<()> {
        if self.script.fail_on_goto {
            return Err(FlightError::Browser {
                reason: "scripted navigation fault".into(),
            });
        }
        Ok(())
    }

    async fn wait_ready(&mut self) -> Result<()> {
        // Suspension point so tests can abandon a stage mid-flight
        tokio::task::yield_now().await;
        if self.script.fail_on_ready {
            return Err(FlightError::RenderTimeout {
                what: "result container".into(),
            });
        }
        Ok(())
    }

    async fn render_blocks(&mut self) -> Result<Vec<String>> {
        if self.script.fail_on_blocks {
            return Err(FlightError::Browser {
                reason: "scripted render fault".into(),
            });
        }
        if self.committed
            && let Some(after) = &self.script.blocks_after_commit
        {
            return Ok(after.clone());
        }
        Ok(self.script.blocks.clone())
    }

    async fn current_address(&mut self) -> Result<String> {
        Ok(self.script.address.clone())
    }

    async fn commit_row(&mut self, index: usize) -> Result<()> {
        self.committed = true;
        self.shared.committed_rows.lock().unwrap().push(index);
        Ok(())
    }

    async fn wait_settle(&mut self) -> Result<()> {
        Ok(())
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>> {
        // PNG magic is enough for sink tests
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn close(&mut self) {
        self.closed = true;
        self.shared.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Sink counting captures, for asserting failure-path behavior.
#[derive(Default)]
pub struct CountingSink {
    captures: AtomicUsize,
}

impl CountingSink {
    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DiagnosticSink for CountingSink {
    async fn capture(&self, _label: &str, _png: &[u8]) {
        self.captures.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn jetblue_criteria() -> MatchCriteria {
    MatchCriteria {
        airline: Some("jetblue".into()),
        departure_time: Some("4:52 PM".into()),
        arrival_time: Some("8:07 PM".into()),
        price: Some(653.0),
        stops: Some("Nonstop".into()),
    }
}
