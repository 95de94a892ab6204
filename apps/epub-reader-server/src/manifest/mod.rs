//! Readium Web Publication Manifest module
//!
//! Synthesizes the minimal manifest a Readium navigator needs to open a
//! single EPUB stream.

mod webpub;

pub use webpub::*;
