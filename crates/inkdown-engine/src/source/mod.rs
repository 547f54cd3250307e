pub mod cursor;
pub mod region;

pub use cursor::Cursor;
pub use region::{Region, Span};
