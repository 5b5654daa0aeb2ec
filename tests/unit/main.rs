//! Unit tests for the flagrun CLI
//!
//! These tests use mocked ports and run fast without external I/O.

mod machine_watch;
mod property_tests;
