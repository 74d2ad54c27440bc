//! Makes available the most common structures needed to run a stress update
//!
//! You may write `use matpoint::prelude::*` in your code and obtain
//! access to the commonly used functionality.

pub use crate::base::{InvalidParams, ParamStressStrain};
pub use crate::material::{
    DruckerPrager, ElasticStiffness, LinearElastic, LocalState, ModelStressStrain, StressStrainTrait,
};
pub use crate::StrError;
