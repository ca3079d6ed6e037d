/*!
 * Per-thread capture of `log` records
 *
 * `#[tokio::test]` runs every future of a test on the test's own thread, so
 * a thread-local buffer keeps records of concurrently running tests apart.
 */

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()));
        });
    }

    fn flush(&self) {}
}

/// Install the capture logger and clear this thread's records
pub fn start() {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Records captured on this thread since `start`
pub fn records() -> Vec<(Level, String)> {
    RECORDS.with(|records| records.borrow().clone())
}

/// Captured records at exactly `level`
pub fn at_level(level: Level) -> Vec<String> {
    records()
        .into_iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, message)| message)
        .collect()
}
