// Main library entry point for json2dot.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use error::{Json2DotError, Result};
