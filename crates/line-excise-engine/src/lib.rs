pub mod document;
pub mod excise;
pub mod io;
pub mod range;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use document::Document;
pub use excise::{ExciseError, ExciseOptions, ExcisionReport, excise, excise_file};
pub use io::{IoError, read_document, write_document};
pub use range::{ExcisionRange, RangeError, RangePolicy};
