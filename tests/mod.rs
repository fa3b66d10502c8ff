// tests/mod.rs
// Test framework for Amazon Q CLI automatic naming feature

mod path_handling_tests;
mod error_handling_tests;
