pub mod file;

pub use file::{load_items, save_items};
