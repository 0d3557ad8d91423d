use async_trait::async_trait;

/// Failure-path capture. The session calls this on stage faults but
/// never depends on it succeeding; implementations log and swallow
/// their own errors.
#[async_trait]
pub trait DiagnosticSink: Send + Sync {
    async fn capture(&self, label: &str, png: &[u8]);
}

/// Sink that discards everything. Useful default for callers that do
/// not want snapshots.
pub struct NullSink;

#[async_trait]
impl DiagnosticSink for NullSink {
    async fn capture(&self, _label: &str, _png: &[u8]) {}
}
