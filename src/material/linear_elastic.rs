use super::{root_jj2, ElasticStiffness, LocalState, StressStrainTrait};
use crate::base::InvalidParams;
use crate::StrError;
use russell_tensor::{Tensor2, Tensor4};

/// Implements a linear elastic model
///
/// No yield surface exists; every update is elastic and the invariant
/// diagnostics are still recomputed for the caller.
#[derive(Debug)]
pub struct LinearElastic {
    /// Elastic stiffness operator
    stiffness: ElasticStiffness,
}

impl LinearElastic {
    /// Allocates a new instance, validating the elastic moduli
    pub fn new(kk: f64, gg: f64, two_dim: bool) -> Result<Self, InvalidParams> {
        let mut bad = InvalidParams::new();
        bad.check_bulk_shear(kk, gg);
        bad.into_result()?;
        Ok(LinearElastic {
            stiffness: ElasticStiffness::new(kk, gg, two_dim),
        })
    }
}

impl StressStrainTrait for LinearElastic {
    /// Indicates that the stiffness matrix is symmetric and constant
    fn symmetric_stiffness(&self) -> bool {
        true
    }

    /// Re-zeroes the plastic strain and the diagnostics
    fn initialize_state(&self, state: &mut LocalState) -> Result<(), StrError> {
        state.plastic_strain.clear();
        state.i1 = 0.0;
        state.rootj2 = 0.0;
        state.yield_rootj2 = 0.0;
        state.elastic = true;
        Ok(())
    }

    /// Computes the tangent stiffness (the constant elastic operator)
    fn stiffness(&mut self, dd: &mut Tensor4, _state: &LocalState) -> Result<(), StrError> {
        dd.set_tensor(1.0, self.stiffness.modulus());
        Ok(())
    }

    /// Updates the stress tensor given the strain increment tensor
    fn update_stress(&mut self, state: &mut LocalState, delta_strain: &Tensor2) -> Result<(), StrError> {
        self.stiffness.apply_update(&mut state.stress, delta_strain); // σ += D : Δε
        state.elastic = true;
        state.i1 = state.stress.trace();
        state.rootj2 = root_jj2(&state.stress);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LinearElastic;
    use crate::material::{LocalState, StressStrainTrait};
    use russell_lab::approx_eq;
    use russell_tensor::{Mandel, Tensor2};

    #[test]
    fn new_validates_moduli() {
        assert!(LinearElastic::new(1e10, 3.75e9, false).is_ok());
        let err = LinearElastic::new(0.0, -1.0, false).unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn update_stress_works() {
        let mut model = LinearElastic::new(1e10, 3.75e9, false).unwrap();
        let mut state = LocalState::new(Mandel::Symmetric);
        #[rustfmt::skip]
        let deps = Tensor2::from_matrix(&[
            [1e-4, 2e-4, 0.0],
            [2e-4, 1e-4, 0.0],
            [0.0, 0.0, 1e-4],
        ], Mandel::Symmetric).unwrap();
        model.update_stress(&mut state, &deps).unwrap();
        // σ = 3K iso(ε) + 2G dev(ε) with iso(ε) = 1e-4 I and zero normal deviator
        approx_eq(state.stress.get(0, 0), 3e6, 1e-6);
        approx_eq(state.stress.get(0, 1), 2.0 * 3.75e9 * 2e-4, 1e-6);
        assert!(state.elastic);
        approx_eq(state.i1, 9e6, 1e-6);
        assert_eq!(state.plastic_strain.vector().as_data(), &[0.0; 6]);
    }
}
