pub mod grid;
pub mod history;
pub mod paste;
pub mod value;
