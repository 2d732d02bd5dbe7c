pub mod geotag;
pub mod html;

pub use geotag::*;
