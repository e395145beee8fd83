//! Selector authoring for form automation.
//!
//! An editor requests generated CSS selectors for a page from an external
//! service, lets the user edit the label/value pairs, and saves the result
//! as a named form into an in-memory store that a viewer renders.

pub mod cli;
pub mod editor;
pub mod selector;
pub mod source;
pub mod store;
pub mod trace;
pub mod viewer;

pub use editor::editor::SelectorEditor;
pub use selector::selector_model::{Form, SelectorMap, SelectorPair};
pub use source::selector_source::{HttpSelectorSource, MockSelectorSource, SelectorSource};
pub use store::selector_store::SelectorStore;
pub use viewer::console::SavedFormsViewer;
