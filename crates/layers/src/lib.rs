pub mod markers;

pub use markers::*;
