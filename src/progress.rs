//! Progress reporting.
//!
//! Both pipelines report one event per frame they finish: each grayscale file
//! written by the extractor, each frame handed to the encoder by the
//! synthesizer. Callbacks observe; they cannot stop the run.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use avpipes::{EncoderOptions, ProgressCallback, ProgressInfo, VideoSynthesizer};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("[{:?}] {pct:.1}% complete", info.operation);
//!         }
//!     }
//! }
//!
//! let options = EncoderOptions::new().with_progress(Arc::new(PrintProgress));
//! VideoSynthesizer::new(options).run()?;
//! # Ok::<(), avpipes::AvPipesError>(())
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// The kind of pipeline currently reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Decoding frames to grayscale files.
    FrameExtraction,
    /// Synthesizing and encoding frames.
    Encoding,
}

/// A snapshot of pipeline progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Which pipeline is reporting.
    pub operation: OperationType,
    /// Frames completed so far.
    pub current: u64,
    /// Frames expected, if known ahead of time.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time since the pipeline started its loop.
    pub elapsed: Duration,
    /// Estimated time remaining, based on current throughput.
    pub estimated_remaining: Option<Duration>,
}

/// Trait for receiving progress updates.
///
/// Implementations must be [`Send`] and [`Sync`] so one callback can be
/// shared through an [`Arc`].
pub trait ProgressCallback: Send + Sync {
    /// Called once per completed frame.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. Used when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Tracks timing for one pipeline run and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    operation: OperationType,
    total: Option<u64>,
    current: u64,
    start_time: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        operation: OperationType,
        total: Option<u64>,
    ) -> Self {
        Self {
            callback,
            operation,
            total,
            current: 0,
            start_time: Instant::now(),
        }
    }

    /// Record one completed frame and notify the callback.
    pub(crate) fn advance(&mut self) {
        self.current += 1;

        let elapsed = self.start_time.elapsed();
        let percentage = self
            .total
            .filter(|&t| t > 0)
            .map(|t| (self.current as f32 / t as f32) * 100.0);
        let estimated_remaining = self.total.map(|t| {
            let remaining = t.saturating_sub(self.current);
            elapsed.mul_f64(remaining as f64 / self.current as f64)
        });

        self.callback.on_progress(&ProgressInfo {
            operation: self.operation,
            current: self.current,
            total: self.total,
            percentage,
            elapsed,
            estimated_remaining,
        });
    }

    pub(crate) fn current(&self) -> u64 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(u64, Option<f32>)>>,
    }

    impl ProgressCallback for Recorder {
        fn on_progress(&self, info: &ProgressInfo) {
            self.seen
                .lock()
                .unwrap()
                .push((info.current, info.percentage));
        }
    }

    #[test]
    fn tracker_reports_every_frame() {
        let recorder = Arc::new(Recorder::default());
        let mut tracker =
            ProgressTracker::new(recorder.clone(), OperationType::Encoding, Some(4));

        for _ in 0..4 {
            tracker.advance();
        }

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], (1, Some(25.0)));
        assert_eq!(seen[3], (4, Some(100.0)));
        assert_eq!(tracker.current(), 4);
    }

    #[test]
    fn unknown_total_has_no_percentage() {
        let recorder = Arc::new(Recorder::default());
        let mut tracker =
            ProgressTracker::new(recorder.clone(), OperationType::FrameExtraction, None);
        tracker.advance();

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0], (1, None));
    }
}
