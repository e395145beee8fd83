pub mod console;
pub mod export;
