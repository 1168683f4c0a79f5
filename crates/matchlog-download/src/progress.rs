//! Per-file progress reporting.

use std::sync::Arc;

/// Called with `(basename, bytes_so_far, total_bytes)`.
///
/// `total_bytes` is `None` while the server has not announced a length.
/// Every file ends with one call where `bytes_so_far == total_bytes`.
pub type ProgressCallback = Arc<dyn Fn(&str, u64, Option<u64>) + Send + Sync>;

/// Tracks one file's transfer and forwards updates to a callback.
pub(crate) struct FileProgress<'a> {
    name: &'a str,
    total: Option<u64>,
    so_far: u64,
    callback: Option<&'a ProgressCallback>,
}

impl<'a> FileProgress<'a> {
    pub(crate) const fn new(
        name: &'a str,
        total: Option<u64>,
        callback: Option<&'a ProgressCallback>,
    ) -> Self {
        Self {
            name,
            total,
            so_far: 0,
            callback,
        }
    }

    pub(crate) fn advance(&mut self, bytes: usize) {
        self.so_far += bytes as u64;
        if let Some(cb) = self.callback {
            cb(self.name, self.so_far, self.total);
        }
    }

    pub(crate) const fn so_far(&self) -> u64 {
        self.so_far
    }

    /// Emit the completion call unless the last update already was one.
    pub(crate) fn finish(&self) {
        let Some(cb) = self.callback else {
            return;
        };
        if self.so_far == 0 || self.total != Some(self.so_far) {
            cb(self.name, self.so_far, Some(self.so_far));
        }
    }
}
