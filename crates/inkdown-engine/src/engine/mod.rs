pub mod context;
pub mod parser;
pub mod processor;
pub mod rule;

pub use context::{Context, MediaDef, Transform};
pub use parser::Parser;
pub use processor::{Document, Processor};
pub use rule::{DelegateRule, Rule};
