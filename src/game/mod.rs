mod flappy;
mod space;

pub use flappy::*;
pub use space::*;
