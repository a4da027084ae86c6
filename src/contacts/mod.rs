//! Derivation of phone destinations from beneficiary records.

mod extractor;

pub use extractor::ContactExtractor;
