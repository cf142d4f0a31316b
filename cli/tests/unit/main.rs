//! Unit tests for the buildvm library
//!
//! These tests use recording fakes of the ports and run fast without
//! spawning processes.

mod architecture;
mod bootstrap;
mod commands;
mod provider;
