//! Binary upload service adapters.

mod fs;
mod key;

pub use fs::FsBlobStore;
pub use key::{KeyError, validate_key};
