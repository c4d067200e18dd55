mod error;
pub use crate::error::{IOError, ParseError};

pub mod io;

pub mod parents;
