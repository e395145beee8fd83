pub mod error;
pub mod selector_source;
