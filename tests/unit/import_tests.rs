use qbank::aiken::parse_aiken;
use qbank::bank::{
    CreatedQuestion, Difficulty, ImportObserver, ImportProgress, ImportTarget, NewQuestion,
    QuestionSink, import_questions,
};
use qbank::test_utils::fixtures::TWO_VALID;
use qbank::test_utils::logging::TestLogger;
use qbank::{QbError, Result};

/// Sink that rejects records whose prompt contains a marker.
struct PickySink {
    reject: &'static str,
    seen: Vec<String>,
}

impl QuestionSink for PickySink {
    fn create_question(&mut self, record: &NewQuestion) -> Result<CreatedQuestion> {
        self.seen.push(record.question_text.clone());
        if record.question_text.contains(self.reject) {
            return Err(QbError::Api {
                status: Some(409),
                message: "duplicate".to_string(),
            });
        }
        Ok(CreatedQuestion {
            id: Some(format!("q-{}", self.seen.len())),
        })
    }
}

#[derive(Default)]
struct LastProgress(Option<ImportProgress>);

impl ImportObserver for LastProgress {
    fn on_progress(&mut self, progress: &ImportProgress) {
        self.0 = Some(*progress);
    }
}

#[test]
fn parsed_bank_imports_through_sink() {
    let log = TestLogger::new("parsed_bank_imports_through_sink");
    let results = parse_aiken(TWO_VALID);
    log.log_parse(&results);

    let mut sink = PickySink {
        reject: "France",
        seen: Vec::new(),
    };
    let mut observer = LastProgress::default();
    let target = ImportTarget::new("folder-7", Difficulty::Easy, 1.5);

    let summary = import_questions(&mut sink, &results.questions, &target, &mut observer).unwrap();
    log.log_import(&summary);

    assert_eq!(sink.seen, vec!["What is 2+2?", "Capital of France?"]);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.created_ids, vec!["q-1"]);
    assert_eq!(
        observer.0,
        Some(ImportProgress {
            current: 2,
            total: 2,
            succeeded: 1,
            failed: 1
        })
    );
    log.pass();
}

#[test]
fn sink_is_untouched_when_no_questions_are_valid() {
    let results = parse_aiken("ANSWER: A\nA. orphan\n");
    let mut sink = PickySink {
        reject: "",
        seen: Vec::new(),
    };
    let target = ImportTarget::new("folder-7", Difficulty::Easy, 1.0);
    let mut observer = LastProgress::default();

    let err = import_questions(&mut sink, &results.questions, &target, &mut observer).unwrap_err();

    assert!(matches!(err, QbError::Precondition(_)));
    assert!(sink.seen.is_empty());
    assert!(observer.0.is_none());
}
