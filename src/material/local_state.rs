use russell_tensor::{Mandel, Tensor2};
use serde::{Deserialize, Serialize};

/// Holds the persistent state of a material point
///
/// This data is associated with one integration (Gauss) point and is owned
/// by the caller; the models mutate it in place at every step. The plastic
/// strain accumulates across steps, while the invariant diagnostics and the
/// elastic flag always refer to the last update.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalState {
    /// Holds the stress tensor σ
    pub stress: Tensor2,

    /// Holds the accumulated plastic strain tensor εᵖ
    pub plastic_strain: Tensor2,

    /// Holds the first invariant I1 = tr(σ) of the updated stress
    pub i1: f64,

    /// Holds √J2 of the updated stress
    pub rootj2: f64,

    /// Holds the yield-surface radius A1 − A4 I1 evaluated at the updated stress
    pub yield_rootj2: f64,

    /// Holds the elastic (vs elastoplastic) flag of the last update
    pub elastic: bool,
}

impl LocalState {
    /// Allocates a new instance with zeroed stress, plastic strain, and diagnostics
    pub fn new(mandel: Mandel) -> Self {
        LocalState {
            stress: Tensor2::new(mandel),
            plastic_strain: Tensor2::new(mandel),
            i1: 0.0,
            rootj2: 0.0,
            yield_rootj2: 0.0,
            elastic: true,
        }
    }

    /// Returns the Mandel representation of the tensors
    pub fn mandel(&self) -> Mandel {
        self.stress.mandel()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
