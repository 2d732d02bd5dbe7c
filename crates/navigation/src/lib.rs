pub mod chapters;
pub mod render;
pub mod route;
pub mod router;
pub mod sequence;

pub use chapters::*;
pub use route::*;
pub use router::*;
pub use sequence::*;
