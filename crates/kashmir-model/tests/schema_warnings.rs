//! Warnings emitted while parsing schemas leniently.

use std::io;
use std::sync::{Arc, Mutex};

use kashmir_model::{AttributeName, Schema};

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock").clone();
        String::from_utf8(bytes).expect("utf-8 log output")
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn extract_with_log(text: &str) -> (Schema, String) {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .without_time()
        .finish();
    let schema = tracing::subscriber::with_default(subscriber, || Schema::extract(text));
    (schema, log.contents())
}

#[test]
fn blank_segment_is_logged_as_warning() {
    let (schema, output) = extract_with_log("a,,b");
    assert_eq!(schema.len(), 3);
    assert!(schema.get(1).is_some_and(AttributeName::is_blank));

    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("blank attribute name in schema"), "{output}");
    assert!(output.contains("position=1"), "{output}");
    assert_eq!(output.lines().count(), 1, "{output}");
}

#[test]
fn trailing_comma_warns_at_last_position() {
    let (_, output) = extract_with_log("a, b,");
    assert!(output.contains("position=2"), "{output}");
}

#[test]
fn well_formed_schema_logs_nothing() {
    let (schema, output) = extract_with_log("full_name, language, reg_age");
    assert_eq!(schema.len(), 3);
    assert!(output.is_empty(), "{output}");
}
