mod category;
mod chart;
mod money;
pub mod text;
mod transaction;

pub use category::*;
pub use chart::*;
pub use money::*;
pub use transaction::*;
