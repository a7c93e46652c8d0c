//! Property test suite entry point.

mod aiken_props;
