//! Command-line interface: argument definitions and call-file input.

pub mod commands;
pub mod input;
