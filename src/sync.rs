#[cfg(not(all(test, feature = "loom")))]
use core::sync::atomic::{Ordering, AtomicU8};

#[cfg(all(test, feature = "loom"))]
use loom::sync::atomic::{Ordering, AtomicU8};

use lazy_static::lazy_static;

use crate::levels::LogLevel;

/// Threshold in effect until the embedding application sets one.
pub(crate) const DEFAULT_THRESHOLD: LogLevel = LogLevel::Print;

/// Process-wide verbosity cell.
///
/// Loads and stores are `Relaxed`: a stale read can only delay or hasten
/// suppression of a message, never corrupt one.
pub(crate) struct ThresholdCell {
    raw: AtomicU8,
}

impl ThresholdCell {
    pub(crate) fn new(level: LogLevel) -> Self {
        Self {
            raw: AtomicU8::new(level.ordinal()),
        }
    }

    pub(crate) fn get(&self) -> LogLevel {
        LogLevel::from_raw(self.raw.load(Ordering::Relaxed))
    }

    pub(crate) fn set(&self, level: LogLevel) {
        self.raw.store(level.ordinal(), Ordering::Relaxed);
    }
}

/// The one process-global cell, created on first use with
/// [`DEFAULT_THRESHOLD`].
pub(crate) fn threshold_cell() -> &'static ThresholdCell {
    lazy_static! {
        static ref THRESHOLD: ThresholdCell = ThresholdCell::new(DEFAULT_THRESHOLD);
    }

    &THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "loom")]
    use loom::thread;
    #[cfg(feature = "loom")]
    use loom::sync::Arc;

    #[cfg(not(feature = "loom"))]
    #[test]
    fn fresh_cell_reads_back_its_initial_level() {
        let cell = ThresholdCell::new(DEFAULT_THRESHOLD);
        assert_eq!(cell.get(), LogLevel::Print);
    }

    #[cfg(not(feature = "loom"))]
    #[test]
    fn set_overwrites_the_previous_level() {
        let cell = ThresholdCell::new(LogLevel::Print);
        for level in [
            LogLevel::Quiet,
            LogLevel::Error,
            LogLevel::Print,
            LogLevel::Debug,
        ] {
            cell.set(level);
            assert_eq!(cell.get(), level);
        }
    }

    #[cfg(feature = "loom")]
    #[test]
    fn concurrent_reader_sees_old_or_new_level() {
        loom::model(|| {
            let cell = Arc::new(ThresholdCell::new(LogLevel::Print));
            let writer = cell.clone();

            let t1 = thread::spawn(move || {
                writer.set(LogLevel::Quiet);
            });

            let seen = cell.get();
            assert!(seen == LogLevel::Print || seen == LogLevel::Quiet);

            t1.join().unwrap();
            assert_eq!(cell.get(), LogLevel::Quiet);
        });
    }

    #[cfg(feature = "loom")]
    #[test]
    fn concurrent_writers_settle_on_one_written_level() {
        loom::model(|| {
            let cell = Arc::new(ThresholdCell::new(LogLevel::Print));
            let first = cell.clone();
            let second = cell.clone();

            let t1 = thread::spawn(move || first.set(LogLevel::Error));
            let t2 = thread::spawn(move || second.set(LogLevel::Debug));

            t1.join().unwrap();
            t2.join().unwrap();

            let settled = cell.get();
            assert!(settled == LogLevel::Error || settled == LogLevel::Debug);
        });
    }
}
