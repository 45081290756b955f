//! CLI module for the hexo-source-tool command-line interface
//!
//! Argument parsing and the handlers that turn a library result into the
//! process outcome.

pub mod args;
pub mod commands;
