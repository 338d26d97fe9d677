//! Internal modules for the console client.
//!
//! This library provides command parsing, rendering and the stdin-backed
//! decision source used by the pt_cli binary.

pub mod commands;
pub mod console;
pub mod render;
