//! Matpoint implements stress-update (constitutive) models for material-point simulators
//!
//! Given a prior stress, a strain-rate increment, and a persistent per-point
//! state, the models in [material] produce an updated stress, an updated
//! state, and a tangent operator. The main model is
//! [material::DruckerPrager], a pressure-dependent plasticity model with a
//! closed-form return mapping over a conical yield surface, including the
//! degenerate apex case. Tensors use the Mandel basis of
//! [russell_tensor](https://docs.rs/russell_tensor).

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod material;
pub mod prelude;
