//! Implements the stress-update models for a material point

mod drucker_prager;
mod elastic_stiffness;
mod invariants;
mod linear_elastic;
mod local_state;
mod model_stress_strain;
pub use crate::material::drucker_prager::*;
pub use crate::material::elastic_stiffness::*;
pub use crate::material::invariants::*;
pub use crate::material::linear_elastic::*;
pub use crate::material::local_state::*;
pub use crate::material::model_stress_strain::*;
