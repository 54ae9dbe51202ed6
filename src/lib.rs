//! Turns plain-language requests into one vetted shell command.
//!
//! A request flows through [`environment`] and [`prompt`] into a model
//! ([`llm`]), is decoded by [`parser`], gated by [`safety`] and finally run
//! by [`executor`]. [`pipeline`] ties the steps together; [`repl`] drives
//! it interactively.

pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod files;
pub mod interrupt;
pub mod llm;
pub mod parser;
pub mod personas;
pub mod pipeline;
pub mod prompt;
pub mod repl;
pub mod safety;
pub mod session;
pub mod types;
pub mod ui;
