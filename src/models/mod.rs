pub mod catalog;
pub mod retrieval;

pub use catalog::*;
pub use retrieval::*;
