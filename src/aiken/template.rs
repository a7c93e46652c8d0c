//! Sample Aiken file shown to operators preparing an import.

/// A small, valid Aiken question bank.
pub const SAMPLE_AIKEN: &str = "\
What is the capital of France?
A. London
B. Paris
C. Berlin
D. Madrid
ANSWER: B

Which keyword declares an immutable binding in Rust?
A) let
B) mut
C) const fn
D) static mut
ANSWER: A

What is 2 + 2?
A. 3
B. 4
C. 5
ANSWER: B
";

/// Format rules printed next to the sample.
pub const FORMAT_NOTES: &[&str] = &[
    "Write the question text on a single line.",
    "List options as an uppercase letter followed by '.' or ')' and a space (A. text / B) text).",
    "Finish each question with 'ANSWER: <letter>' naming one of its options.",
    "Separate questions with a blank line (recommended, not required).",
];
