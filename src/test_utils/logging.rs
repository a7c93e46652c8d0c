use std::time::Instant;

use crate::aiken::ParsedResults;
use crate::bank::ImportSummary;

/// Step-by-step logger for tests. Also routes `tracing` output through the
/// test harness so `cargo test -- --nocapture` shows parser and import logs.
pub struct TestLogger {
    test_name: String,
    start_time: Instant,
}

impl TestLogger {
    pub fn new(test_name: &str) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("qbank=debug")
            .with_test_writer()
            .try_init();

        println!("\n[TEST START] {test_name}");
        Self {
            test_name: test_name.to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn log_input<T: std::fmt::Debug>(&self, name: &str, value: &T) {
        println!("[INPUT] {name}: {value:?}");
    }

    pub fn log_parse(&self, results: &ParsedResults) {
        println!(
            "[PARSE] {} valid, {} invalid",
            results.valid_count(),
            results.failed_count
        );
        for error in &results.errors {
            println!("[PARSE]   line {} {}: {}", error.line, error.kind, error.text);
        }
    }

    pub fn log_import(&self, summary: &ImportSummary) {
        println!(
            "[IMPORT] {}/{} succeeded, {} failed",
            summary.succeeded, summary.total, summary.failed
        );
    }

    pub fn pass(&self) {
        println!(
            "[RESULT] {} PASSED in {:?}\n",
            self.test_name,
            self.start_time.elapsed()
        );
    }
}
