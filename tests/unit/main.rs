//! Unit test suite entry point.

mod import_tests;
mod parser_tests;
