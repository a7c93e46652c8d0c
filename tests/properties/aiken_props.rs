use proptest::prelude::*;

use qbank::aiken::{AikenParser, normalize_line_endings};
use qbank::bank::{Difficulty, ImportTarget, NAME_MAX_CHARS, NewQuestion, display_name};

/// (prompt, option texts, answer index)
type QuestionParts = (String, Vec<String>, usize);

fn arb_question() -> impl Strategy<Value = QuestionParts> {
    (
        "[a-z][a-z0-9 ?]{0,80}",
        prop::collection::vec("[a-z0-9][a-z0-9 ]{0,20}", 1..6),
    )
        .prop_flat_map(|(prompt, options)| {
            let len = options.len();
            (Just(prompt), Just(options), 0..len)
        })
}

fn render(questions: &[QuestionParts], eol: &str) -> String {
    let mut out = String::new();
    for (prompt, options, answer) in questions {
        out.push_str(prompt);
        out.push_str(eol);
        for (idx, text) in options.iter().enumerate() {
            let key = char::from(b'A' + u8::try_from(idx).unwrap());
            out.push_str(&format!("{key}. {text}{eol}"));
        }
        let key = char::from(b'A' + u8::try_from(*answer).unwrap());
        out.push_str(&format!("ANSWER: {key}{eol}{eol}"));
    }
    out
}

proptest! {
    #[test]
    fn normalization_is_idempotent(input in "[a-z\r\n ]{0,200}") {
        let once = normalize_line_endings(&input).into_owned();
        let twice = normalize_line_endings(&once).into_owned();
        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.contains('\r'));
    }

    #[test]
    fn well_formed_blocks_all_parse(questions in prop::collection::vec(arb_question(), 0..8)) {
        let results = AikenParser::new().parse(&render(&questions, "\n"));

        prop_assert_eq!(results.failed_count, 0);
        prop_assert_eq!(results.valid_count(), questions.len());
        for (parsed, (prompt, options, answer)) in results.questions.iter().zip(&questions) {
            prop_assert_eq!(&parsed.question, prompt.trim());
            prop_assert_eq!(parsed.options.len(), options.len());
            let expected = char::from(b'A' + u8::try_from(*answer).unwrap());
            prop_assert_eq!(parsed.answer, expected);
            prop_assert!(parsed.correct_option().is_some());
        }
    }

    #[test]
    fn crlf_input_matches_lf_input(questions in prop::collection::vec(arb_question(), 0..5)) {
        let parser = AikenParser::new();
        prop_assert_eq!(
            parser.parse(&render(&questions, "\r\n")),
            parser.parse(&render(&questions, "\n"))
        );
    }

    #[test]
    fn exactly_one_option_gets_full_credit(parts in arb_question()) {
        let results = AikenParser::new().parse(&render(std::slice::from_ref(&parts), "\n"));
        let target = ImportTarget::new("f", Difficulty::Medium, 1.0);
        let record = NewQuestion::from_aiken(&results.questions[0], &target);

        let full: Vec<usize> = record
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.grade == 100)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(full, vec![parts.2]);
        prop_assert!(record.options.iter().all(|o| o.grade == 100 || o.grade == 0));
    }

    #[test]
    fn display_name_is_bounded(prompt in ".{0,120}") {
        let name = display_name(&prompt);
        prop_assert!(name.chars().count() <= NAME_MAX_CHARS + 3);
        if prompt.chars().count() <= NAME_MAX_CHARS {
            prop_assert_eq!(name, prompt);
        } else {
            prop_assert!(name.ends_with("..."));
        }
    }
}
