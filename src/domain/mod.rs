pub mod result;
pub mod team;

pub use result::*;
pub use team::*;
