pub mod date;
pub mod item;

pub use item::Item;
