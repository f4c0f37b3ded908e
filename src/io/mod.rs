pub mod export;
pub mod journal;

pub use export::*;
pub use journal::*;
