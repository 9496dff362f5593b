mod rect;
mod vector;

pub use rect::*;
pub use vector::*;
