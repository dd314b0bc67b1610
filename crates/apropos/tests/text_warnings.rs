use grasp_apropos::{Apropos, PredicateKind, SearchOptions};
use grasp_object::{TypeRegistry, Value};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

/// Keeps warnings emitted by the search crate
struct Capture {
    warnings: Mutex<Vec<String>>,
}

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) && record.target().starts_with("grasp_apropos") {
            self.warnings
                .lock()
                .expect("capture lock")
                .push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    warnings: Mutex::new(Vec::new()),
};

fn take_warnings() -> Vec<String> {
    std::mem::take(&mut *CAPTURE.warnings.lock().expect("capture lock"))
}

// Single test in this binary: the logger is process-wide.
#[test]
fn undecodable_text_warns_once_per_walk() {
    log::set_logger(&CAPTURE).expect("install logger");
    log::set_max_level(LevelFilter::Warn);

    let root = Value::list([
        Value::bytes([0xff]),
        Value::bytes([0xfe]),
        Value::str("needle"),
        Value::bytes([0xfd, 0xff]),
    ]);
    let options = SearchOptions::default().predicate(PredicateKind::Value);
    let registry = TypeRegistry::default();
    let apropos = Apropos::new(&registry);

    let report = apropos.walk("needle", &root, &options).unwrap();
    assert_eq!(report.paths, vec!["arg[2]"]);
    assert_eq!(report.stats.text_failures, 3);
    let first = take_warnings();
    assert_eq!(first.len(), 1, "{first:?}");
    assert!(first[0].contains("arg[0]"), "{}", first[0]);

    apropos.walk("needle", &root, &options).unwrap();
    assert_eq!(take_warnings().len(), 1);

    let clean = Value::list([Value::str("needle")]);
    apropos.walk("needle", &clean, &options).unwrap();
    assert!(take_warnings().is_empty());
}
