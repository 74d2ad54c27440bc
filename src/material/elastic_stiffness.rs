use russell_tensor::{t4_ddot_t2, t4_ddot_t2_update, LinElasticity, Tensor2, Tensor4};

/// Implements the isotropic linear elastic stiffness operator
///
/// ```text
/// D : T = 3 K iso(T) + 2 G dev(T)
/// ```
///
/// parameterized by the bulk modulus K and the shear modulus G. The very
/// same operator maps strain increments into trial stress increments and
/// plastic flow directions into stress space, which is what allows the
/// return mapping of [crate::material::DruckerPrager] to be closed-form.
pub struct ElasticStiffness {
    /// Rigidity modulus Dₑ (constant)
    lin_elasticity: LinElasticity,

    /// Bulk modulus K
    kk: f64,

    /// Shear modulus G
    gg: f64,
}

impl std::fmt::Debug for ElasticStiffness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticStiffness")
            .field("kk", &self.kk)
            .field("gg", &self.gg)
            .finish_non_exhaustive()
    }
}

impl ElasticStiffness {
    /// Allocates a new instance from the bulk and shear moduli
    pub fn new(kk: f64, gg: f64, two_dim: bool) -> Self {
        let young = 9.0 * kk * gg / (3.0 * kk + gg);
        let poisson = (3.0 * kk - 2.0 * gg) / (6.0 * kk + 2.0 * gg);
        ElasticStiffness {
            lin_elasticity: LinElasticity::new(young, poisson, two_dim, false),
            kk,
            gg,
        }
    }

    /// Returns the bulk modulus K
    pub fn bulk(&self) -> f64 {
        self.kk
    }

    /// Returns the shear modulus G
    pub fn shear(&self) -> f64 {
        self.gg
    }

    /// Returns the constant rigidity modulus Dₑ
    pub fn modulus(&self) -> &Tensor4 {
        self.lin_elasticity.get_modulus()
    }

    /// Calculates out = Dₑ : T
    ///
    /// # Panics
    ///
    /// A panic will occur if the tensors have different [russell_tensor::Mandel].
    pub fn apply(&self, out: &mut Tensor2, tt: &Tensor2) {
        t4_ddot_t2(out, 1.0, self.lin_elasticity.get_modulus(), tt);
    }

    /// Updates sigma += Dₑ : T
    ///
    /// # Panics
    ///
    /// A panic will occur if the tensors have different [russell_tensor::Mandel].
    pub fn apply_update(&self, sigma: &mut Tensor2, tt: &Tensor2) {
        t4_ddot_t2_update(sigma, 1.0, self.lin_elasticity.get_modulus(), tt, 1.0);
    }

    /// Calculates the compliance application out = Dₑ⁻¹ : T
    ///
    /// ```text
    /// Dₑ⁻¹ : T = iso(T)/(3 K) + dev(T)/(2 G)
    /// ```
    ///
    /// # Panics
    ///
    /// A panic will occur if the tensors have different [russell_tensor::Mandel].
    pub fn apply_inverse(&self, out: &mut Tensor2, tt: &Tensor2) {
        assert_eq!(out.mandel(), tt.mandel());
        let mean = tt.trace() / 3.0;
        let dim = tt.dim();
        let v = tt.vector();
        let o = out.vector_mut();
        for i in 0..3 {
            o[i] = (v[i] - mean) / (2.0 * self.gg) + mean / (3.0 * self.kk);
        }
        for i in 3..dim {
            o[i] = v[i] / (2.0 * self.gg);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
