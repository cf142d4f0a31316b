//! Command implementations

pub mod config;
pub mod copy_files;
pub mod delete;
pub mod exec;
pub mod info;
pub mod launch;
pub mod mount;
pub mod setup;
pub mod shell;
pub mod stop;
