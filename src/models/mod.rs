//! Core domain records shared across the engine.

pub mod lookup;
pub mod swing;
pub mod value;

pub use lookup::find_field;
pub use swing::Swing;
pub use value::{CellValue, RawRow};
