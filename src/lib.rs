// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod specs;
pub mod store;

pub mod csv;
pub mod file;
pub mod json;
pub mod progress;
pub mod runner;
pub mod scrape;

pub use error::{AipError, Result};
