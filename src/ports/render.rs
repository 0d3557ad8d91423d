use async_trait::async_trait;

use crate::error::Result;

/// Capability that yields isolated browsing contexts. One context is
/// opened per protocol stage and released before the stage returns.
#[async_trait]
pub trait RenderSource: Send + Sync {
    async fn open(&self) -> Result<Box<dyn RenderContext>>;
}

/// One isolated browsing context. Implementations must tolerate the
/// owning stage being abandoned mid-flight: dropping a context releases
/// its resources just as `close` does.
#[async_trait]
pub trait RenderContext: Send {
    /// Navigate to an address (initial query or continuation reference).
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Wait until the result container is visible, bounded by the
    /// configured timeout. Not a fixed sleep.
    async fn wait_ready(&mut self) -> Result<()>;

    /// Opaque text of each visible result row, in render order.
    async fn render_blocks(&mut self) -> Result<Vec<String>>;

    /// The page's current canonical address — the continuation
    /// reference that re-enters this result set.
    async fn current_address(&mut self) -> Result<String>;

    /// Simulate selecting the row at `index` (same indexing as the last
    /// `render_blocks` call).
    async fn commit_row(&mut self, index: usize) -> Result<()>;

    /// Give the post-commit transition time to begin (bounded fixed
    /// grace period), then wait for readiness again.
    async fn wait_settle(&mut self) -> Result<()>;

    /// Best-effort PNG capture for the diagnostic sink.
    async fn screenshot(&mut self) -> Result<Vec<u8>>;

    /// Release the context. Infallible; called on every exit path.
    async fn close(&mut self);
}
