//! In-memory `log` sink for asserting on emitted records

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;

static CAPTURE: Lazy<Capture> = Lazy::new(|| Capture {
    records: Mutex::new(Vec::new()),
});

pub struct Capture {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

/// Install the capturing logger; safe to call from every test
pub fn capture() -> &'static Capture {
    let capture: &'static Capture = &CAPTURE;
    if log::set_logger(capture).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
    capture
}

impl Capture {
    /// Number of captured records at `level` whose message equals `message`
    pub fn count(&self, level: Level, message: &str) -> usize {
        self.records
            .lock()
            .map(|records| {
                records
                    .iter()
                    .filter(|(l, m)| *l == level && m == message)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Whether any record at `level` contains `fragment`
    pub fn contains(&self, level: Level, fragment: &str) -> bool {
        self.records
            .lock()
            .map(|records| {
                records
                    .iter()
                    .any(|(l, m)| *l == level && m.contains(fragment))
            })
            .unwrap_or(false)
    }
}
