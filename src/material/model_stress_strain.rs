use super::{DruckerPrager, LinearElastic, LocalState};
use crate::base::{InvalidParams, ParamStressStrain};
use crate::StrError;
use russell_tensor::{Mandel, Tensor2, Tensor4};

/// Specifies the essential functions for stress-strain models
pub trait StressStrainTrait: Send {
    /// Indicates that the stiffness matrix is symmetric
    fn symmetric_stiffness(&self) -> bool;

    /// Initializes the state for this model (zeroes plastic strain and diagnostics)
    fn initialize_state(&self, state: &mut LocalState) -> Result<(), StrError>;

    /// Computes the tangent stiffness for the current state
    fn stiffness(&mut self, dd: &mut Tensor4, state: &LocalState) -> Result<(), StrError>;

    /// Updates the stress tensor given the strain increment tensor
    fn update_stress(&mut self, state: &mut LocalState, delta_strain: &Tensor2) -> Result<(), StrError>;
}

/// Holds the actual stress-strain model implementation
///
/// This is the entry point for a time-stepping driver: allocate it once per
/// material, then call [ModelStressStrain::update_state] at every step for
/// every material point.
pub struct ModelStressStrain {
    /// Holds the actual model implementation
    pub actual: Box<dyn StressStrainTrait>,

    /// Scratch strain increment Δε = Δt d
    delta_strain: Tensor2,
}

impl std::fmt::Debug for ModelStressStrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelStressStrain").finish_non_exhaustive()
    }
}

impl ModelStressStrain {
    /// Allocates a model, resolving and validating its parameters
    ///
    /// Validation aggregates all admissibility violations into the returned
    /// [InvalidParams]. The plasticity models (including the degenerate
    /// elastic and von Mises reductions) are handled by [DruckerPrager].
    pub fn new(param: &ParamStressStrain, two_dim: bool) -> Result<Self, InvalidParams> {
        let actual: Box<dyn StressStrainTrait> = match *param {
            ParamStressStrain::LinearElastic { kk, gg } => Box::new(LinearElastic::new(kk, gg, two_dim)?),
            _ => Box::new(DruckerPrager::new(param, two_dim)?),
        };
        let mandel = if two_dim { Mandel::Symmetric2D } else { Mandel::Symmetric };
        Ok(ModelStressStrain {
            actual,
            delta_strain: Tensor2::new(mandel),
        })
    }

    /// Updates the stress and state given a strain-rate increment over a time step
    ///
    /// Forms Δε = Δt d and delegates to the actual model. The strain-rate
    /// increment is not retained. The inputs must be finite; no runtime error
    /// is raised for validated parameters and finite inputs.
    ///
    /// # Panics
    ///
    /// A panic will occur if the tensors have different [Mandel].
    pub fn update_state(&mut self, state: &mut LocalState, dt: f64, strain_rate: &Tensor2) -> Result<(), StrError> {
        assert_eq!(strain_rate.mandel(), self.delta_strain.mandel());
        let d = strain_rate.vector();
        let deps = self.delta_strain.vector_mut();
        for i in 0..deps.dim() {
            deps[i] = dt * d[i];
        }
        self.actual.update_stress(state, &self.delta_strain)
    }

    /// Computes the tangent stiffness for the current state
    pub fn stiffness(&mut self, dd: &mut Tensor4, state: &LocalState) -> Result<(), StrError> {
        self.actual.stiffness(dd, state)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
