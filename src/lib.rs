pub mod bend;
pub mod curve;
pub mod error;
pub mod grid;
pub mod math;

pub use error::{CorribendError, Result};
