//! Integration tests for the buildvm CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! None of them needs multipass to be installed.
