// src/pipeline/mod.rs

//! Pipeline entry points for the CLI.

pub mod crawl;

pub use crawl::run_crawl;
