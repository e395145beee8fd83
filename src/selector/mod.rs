pub mod identity;
pub mod selector_model;
