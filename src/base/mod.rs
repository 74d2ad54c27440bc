//! Implements the base structures for material-point stress updates

mod parameters;
mod validation;
pub use crate::base::parameters::*;
pub use crate::base::validation::*;
