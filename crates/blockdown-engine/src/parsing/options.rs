use serde::{Deserialize, Serialize};

/// Per-parse switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Recognise GitHub extensions (tables). Task checkboxes are always read.
    pub github_extensions: bool,
    /// Input size in bytes above which callers should prefer a streaming
    /// strategy. The engine itself only carries the value.
    pub streaming_threshold: usize,
}

impl ParseOptions {
    pub const DEFAULT_STREAMING_THRESHOLD: usize = 1024 * 1024;

    /// Whether an input of `len` bytes crosses the streaming threshold.
    pub fn prefers_streaming(&self, len: usize) -> bool {
        len >= self.streaming_threshold
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            github_extensions: true,
            streaming_threshold: Self::DEFAULT_STREAMING_THRESHOLD,
        }
    }
}
