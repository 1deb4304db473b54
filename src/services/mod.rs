pub mod corpus_builder;
pub mod fallback;
pub mod orchestrator;
pub mod renderer;
pub mod retriever;

pub use corpus_builder::*;
pub use fallback::*;
pub use orchestrator::*;
pub use renderer::*;
pub use retriever::*;
