use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::ports::diagnostics::DiagnosticSink;

/// Writes failure screenshots to a directory so a broken run can be
/// inspected after the fact. Write failures are logged and swallowed —
/// diagnostics must never make a failing stage fail harder.
pub struct FileSnapshotSink {
    dir: PathBuf,
}

impl FileSnapshotSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DiagnosticSink for FileSnapshotSink {
    async fn capture(&self, label: &str, png: &[u8]) {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
        let path = self.dir.join(format!("{label}-{stamp}.png"));

        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            warn!(error = %e, dir = %self.dir.display(), "snapshot dir unavailable");
            return;
        }
        match std::fs::write(&path, png) {
            Ok(()) => debug!(path = %path.display(), "failure snapshot written"),
            Err(e) => warn!(error = %e, "failed to write snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_png_with_label_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSnapshotSink::new(dir.path());

        sink.capture("outbound-failure", &[0x89, b'P', b'N', b'G'])
            .await;

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with("outbound-failure-"));
        assert!(entries[0].ends_with(".png"));
    }

    #[tokio::test]
    async fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs/deep");
        let sink = FileSnapshotSink::new(&nested);

        sink.capture("finalize-failure", b"png").await;

        assert!(nested.exists());
    }

    #[tokio::test]
    async fn unwritable_directory_does_not_panic() {
        let sink = FileSnapshotSink::new("/proc/definitely/not/writable");
        sink.capture("x", b"png").await;
    }
}
