//! vidgate library crate.
//!
//! An HTTP gateway that resolves social-media video URLs through an external
//! extraction tool and delivers the media to the caller by one of three
//! transfer strategies: local download & stream, direct link, or proxy stream.

pub mod api;
pub mod config;
pub mod error;
pub mod extractor;
pub mod transfer;
pub mod utils;

pub use error::{Error, Result};
