pub mod collections;
pub mod engine;
pub mod game;
pub mod math;
pub mod util;
