pub mod editor;
pub mod editor_model;
