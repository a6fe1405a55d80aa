//! GDE field extraction: label lookup, identifier parsers, and the
//! document reader that ties them together.

pub mod locator;
mod reader;
pub mod rules;

pub use locator::{locate_value, Locator};
pub use reader::GdeDocument;
