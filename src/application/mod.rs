// Application layer - use cases over named categories.
// Clients (CLI, journal replay) go through `Budget` rather than touching
// `Category` values directly.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
