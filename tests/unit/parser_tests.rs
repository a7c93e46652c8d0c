use qbank::aiken::{AikenParser, ParseErrorKind, ParsedBlock, normalize_line_endings};
use qbank::test_utils::logging::TestLogger;

#[test]
fn mixed_bank_keeps_valid_questions_and_reports_the_rest() {
    let log = TestLogger::new("mixed_bank_keeps_valid_questions_and_reports_the_rest");
    let input = "\
A. stray option
What is 2+2?
A. 3
B. 4
ANSWER: B
Unfinished prompt
Next prompt
A. yes
ANSWER: A
ANSWER: A
Dangling at end
";
    log.log_input("input", &input);

    let results = AikenParser::new().parse(input);
    log.log_parse(&results);

    assert_eq!(results.valid_count(), 2);
    assert_eq!(results.questions[0].question, "What is 2+2?");
    assert_eq!(results.questions[1].question, "Next prompt");

    let kinds: Vec<ParseErrorKind> = results.errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ParseErrorKind::OrphanOption,
            ParseErrorKind::InterruptedQuestion,
            ParseErrorKind::OrphanAnswer,
            ParseErrorKind::UnterminatedQuestion,
        ]
    );
    assert_eq!(
        results.error_blocks,
        vec![
            "A. stray option",
            "Unfinished prompt",
            "ANSWER: A",
            "Dangling at end"
        ]
    );
    let lines: Vec<usize> = results.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![1, 6, 10, 11]);
    assert_eq!(results.failed_count, results.error_blocks.len());
    log.pass();
}

#[test]
fn block_stream_preserves_source_order() {
    let blocks = AikenParser::new().parse_blocks("ANSWER: A\nQ?\nA. x\nANSWER: A\nB. orphan\n");
    let tags: Vec<&str> = blocks
        .iter()
        .map(|b| match b {
            ParsedBlock::Question(_) => "question",
            ParsedBlock::Error(_) => "error",
        })
        .collect();
    assert_eq!(tags, vec!["error", "question", "error"]);
}

#[test]
fn line_endings_do_not_change_results() {
    let unix = "Q?\nA. one\nB. two\nANSWER: B\n";
    let windows = unix.replace('\n', "\r\n");
    let mac = unix.replace('\n', "\r");

    let parser = AikenParser::new();
    let expected = parser.parse(unix);
    assert_eq!(parser.parse(&windows), expected);
    assert_eq!(parser.parse(&mac), expected);
    assert_eq!(normalize_line_endings(&windows), unix);
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let results = AikenParser::new().parse("   Q?  \n\t A.   one  \n B) two\n  answer:   a  \n");
    assert_eq!(results.valid_count(), 1);
    let question = &results.questions[0];
    assert_eq!(question.question, "Q?");
    assert_eq!(question.options[0].text, "one");
    assert_eq!(question.answer, 'A');
}
