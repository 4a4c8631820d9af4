pub mod error;
pub mod visitor;

pub use error::EngineError;
pub use visitor::{Visitor, VisitorMut};

pub type Result<T> = std::result::Result<T, EngineError>;
