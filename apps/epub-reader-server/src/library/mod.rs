//! Library module for locally served publications
//!
//! Resolves EPUB files inside the public directory and lists what is available.

mod scanner;

pub use scanner::*;
