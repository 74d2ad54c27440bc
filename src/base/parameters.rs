use serde::{Deserialize, Serialize};

/// Holds parameters for the stress-strain models of a material point
///
/// The variant selects the yield behavior once, at setup time. All variants
/// are accepted by [crate::material::DruckerPrager::new], which resolves
/// them into the four constants of the conical yield surface: the
/// [ParamStressStrain::LinearElastic] variant disables yielding altogether
/// and [ParamStressStrain::VonMises] degenerates the cone into a cylinder
/// (pressure-independent radius).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamStressStrain {
    /// Linear elastic model
    LinearElastic {
        /// Bulk modulus K
        kk: f64,

        /// Shear modulus G
        gg: f64,
    },

    /// Pressure-dependent plasticity model (Drucker-Prager-like cone)
    DruckerPrager {
        /// Bulk modulus K
        kk: f64,

        /// Shear modulus G
        gg: f64,

        /// Intercept of the yield surface with the √J2 axis (pure shear)
        a1: f64,

        /// Pressure-dependence slope: A4 = −d(√J2)/d(I1) (always positive)
        a4: f64,
    },

    /// Pressure-independent plasticity model (von Mises cylinder)
    VonMises {
        /// Bulk modulus K
        kk: f64,

        /// Shear modulus G
        gg: f64,

        /// von Mises yield stress Y0 (yield radius √J2 = Y0/√3)
        y0: f64,

        /// Hardening modulus (must be zero; hardening is not supported)
        hh: f64,
    },
}

impl ParamStressStrain {
    /// Returns sample parameters for the linear elastic model
    pub fn sample_linear_elastic() -> Self {
        ParamStressStrain::LinearElastic { kk: 1e10, gg: 3.75e9 }
    }

    /// Returns sample parameters for the pressure-dependent model
    pub fn sample_drucker_prager() -> Self {
        ParamStressStrain::DruckerPrager {
            kk: 1e10,
            gg: 3.75e9,
            a1: 1e6,
            a4: 0.2,
        }
    }

    /// Returns sample parameters for the pressure-independent model
    pub fn sample_von_mises() -> Self {
        ParamStressStrain::VonMises {
            kk: 1e10,
            gg: 3.75e9,
            y0: 1e6,
            hh: 0.0,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
