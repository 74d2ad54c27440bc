use super::{root_jj2, ElasticStiffness, LocalState, StressStrainTrait};
use crate::base::{InvalidParams, ParamStressStrain};
use crate::StrError;
use russell_tensor::{Mandel, Tensor2, Tensor4, IDENTITY2, SQRT_2, SQRT_3};

/// Defines an alias to IDENTITY2
const I: &[f64; 9] = &IDENTITY2;

/// Holds a yield-surface intercept large enough to disable yielding altogether
///
/// With this intercept, f = √J2 − (A1 − A4 I1) stays negative for any
/// representable stress, so the model behaves as linear elastic.
pub const A1_UNBOUNDED: f64 = 1e99;

/// Implements a pressure-dependent plasticity model with closed-form return mapping
///
/// The yield surface is a cone in stress space, linear in the invariants:
///
/// ```text
/// f = √J2 − (A1 − A4 I1)
/// ```
///
/// where A1 is the intercept with the √J2 axis (pure shear) and A4 is the
/// pressure-dependence slope. Because both the surface and the (associated)
/// flow direction are linear in the invariants, an inadmissible trial stress
/// is corrected by a single linear return with a closed-form plastic
/// multiplier; no local iteration is performed. Trial states lying past the
/// cone's apex, where a linear return would overshoot, collapse onto the
/// purely isotropic apex stress instead.
///
/// The tangent operator is always the constant elastic stiffness; no
/// hardening integration, rate dependence, or consistent elastoplastic
/// tangent is performed.
#[derive(Debug)]
pub struct DruckerPrager {
    /// Elastic stiffness operator (maps both strain increments and flow directions)
    stiffness: ElasticStiffness,

    /// Intercept of the yield surface with the √J2 axis
    a1: f64,

    /// Pressure-dependence slope
    a4: f64,

    /// Deviatoric trial stress: s = dev(σ_trial) (also apex-return scratch)
    s: Tensor2,

    /// Flow direction N (unit outward normal of the cone)
    nn: Tensor2,

    /// Stress-space flow direction P = Dₑ : N
    pp: Tensor2,

    /// Distance from the apex state to the trial stress
    aux: Tensor2,
}

impl DruckerPrager {
    /// Allocates a new instance, resolving and validating the parameters
    ///
    /// Every [ParamStressStrain] variant is accepted and resolved once, here:
    ///
    /// * `DruckerPrager` -- A1 and A4 are taken as given; A1 = 0 is the
    ///   degenerate request for no yielding and becomes [A1_UNBOUNDED]
    /// * `LinearElastic` -- yielding is disabled ([A1_UNBOUNDED], A4 = 0)
    /// * `VonMises` -- the cone degenerates into the pressure-independent
    ///   cylinder √J2 = Y0/√3 (A4 = 0); a nonzero hardening modulus is
    ///   rejected because hardening is not supported
    ///
    /// All admissibility violations are aggregated into a single [InvalidParams].
    pub fn new(param: &ParamStressStrain, two_dim: bool) -> Result<Self, InvalidParams> {
        let mut bad = InvalidParams::new();
        let (kk, gg, a1, a4) = match *param {
            ParamStressStrain::LinearElastic { kk, gg } => (kk, gg, A1_UNBOUNDED, 0.0),
            ParamStressStrain::VonMises { kk, gg, y0, hh } => {
                if hh != 0.0 {
                    bad.push("cannot reduce to a von Mises surface with nonzero hardening");
                }
                if y0 <= 0.0 {
                    bad.push("yield stress Y0 must be positive");
                }
                (kk, gg, y0 / SQRT_3, 0.0)
            }
            ParamStressStrain::DruckerPrager { kk, gg, a1, a4 } => {
                let a1 = if a1 == 0.0 { A1_UNBOUNDED } else { a1 };
                if a1 <= 0.0 {
                    bad.push("A1 must be positive");
                }
                if a4 <= 0.0 {
                    bad.push("A4 must be positive");
                }
                (kk, gg, a1, a4)
            }
        };
        bad.check_bulk_shear(kk, gg);
        bad.into_result()?;
        let mandel = if two_dim { Mandel::Symmetric2D } else { Mandel::Symmetric };
        Ok(DruckerPrager {
            stiffness: ElasticStiffness::new(kk, gg, two_dim),
            a1,
            a4,
            s: Tensor2::new(mandel),
            nn: Tensor2::new(mandel),
            pp: Tensor2::new(mandel),
            aux: Tensor2::new(mandel),
        })
    }

    /// Evaluates the yield function f = √J2 − (A1 − A4 I1) at a stress state
    pub fn yield_function(&self, sigma: &Tensor2) -> f64 {
        root_jj2(sigma) - (self.a1 - self.a4 * sigma.trace())
    }

    /// Recalculates the invariant diagnostics of the updated stress
    fn update_diagnostics(&self, state: &mut LocalState) {
        state.i1 = state.stress.trace();
        state.rootj2 = root_jj2(&state.stress);
        state.yield_rootj2 = self.a1 - self.a4 * state.i1;
    }
}

impl StressStrainTrait for DruckerPrager {
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

    /// Computes the tangent stiffness (always the constant elastic operator)
    fn stiffness(&mut self, dd: &mut Tensor4, _state: &LocalState) -> Result<(), StrError> {
        dd.set_tensor(1.0, self.stiffness.modulus());
        Ok(())
    }

    /// Updates the stress tensor given the strain increment tensor
    ///
    /// # Panics
    ///
    /// A panic will occur if the tensors have different [Mandel].
    fn update_stress(&mut self, state: &mut LocalState, delta_strain: &Tensor2) -> Result<(), StrError> {
        assert_eq!(delta_strain.mandel(), state.mandel());

        // trial stress: σ += Dₑ : Δε
        self.stiffness.apply_update(&mut state.stress, delta_strain);
        let i1_trial = state.stress.trace();
        let rj2_trial = root_jj2(&state.stress);

        // elastic update: accept the trial stress
        if rj2_trial - (self.a1 - self.a4 * i1_trial) <= 0.0 {
            state.elastic = true;
            self.update_diagnostics(state);
            return Ok(());
        }

        // flow direction: N = (√2 A4 I + s/‖s‖) / √(6 A4² + 1)
        // (‖s‖ cannot vanish here: f > 0 with admissible A1 and A4 implies √J2 > 0)
        state.stress.deviator(&mut self.s);
        let norm_s = self.s.norm();
        let cf = 1.0 / f64::sqrt(6.0 * self.a4 * self.a4 + 1.0);
        let dim = self.s.dim();
        {
            let s = self.s.vector();
            let nn = self.nn.vector_mut();
            for i in 0..dim {
                nn[i] = cf * (SQRT_2 * self.a4 * I[i] + s[i] / norm_s);
            }
        }
        self.stiffness.apply(&mut self.pp, &self.nn); // P = Dₑ : N

        // vertex test: a trial state past the apex cannot be returned linearly
        let beyond_apex = self.a4 != 0.0
            && i1_trial > self.a1 / self.a4
            && rj2_trial / (i1_trial - self.a1 / self.a4) < root_jj2(&self.pp) / self.pp.trace();

        if beyond_apex {
            // collapse onto the apex; all excess strain becomes plastic
            let sigma_m_apex = self.a1 / self.a4 / 3.0;
            {
                let sig = state.stress.vector();
                let aux = self.aux.vector_mut();
                for i in 0..dim {
                    aux[i] = sig[i] - sigma_m_apex * I[i]; // d = σ_trial − (A1/A4/3) I
                }
            }
            self.stiffness.apply_inverse(&mut self.s, &self.aux); // Δεᵖ = Dₑ⁻¹ : d
            {
                let deps_p = self.s.vector();
                let ep = state.plastic_strain.vector_mut();
                for i in 0..dim {
                    ep[i] += deps_p[i];
                }
            }
            let sig = state.stress.vector_mut();
            for i in 0..dim {
                sig[i] = sigma_m_apex * I[i];
            }
        } else {
            // single linear return with closed-form plastic multiplier
            let lambda = (rj2_trial - self.a1 + self.a4 * i1_trial)
                / (self.a4 * self.pp.trace() + root_jj2(&self.pp));
            let pp = self.pp.vector();
            let nn = self.nn.vector();
            let sig = state.stress.vector_mut();
            let ep = state.plastic_strain.vector_mut();
            for i in 0..dim {
                sig[i] -= lambda * pp[i]; // σ = σ_trial − λ P
                ep[i] += lambda * nn[i]; // εᵖ += λ N
            }
        }

        state.elastic = false;
        self.update_diagnostics(state);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{DruckerPrager, A1_UNBOUNDED};
    use crate::base::ParamStressStrain;
    use crate::material::{root_jj2, LocalState, StressStrainTrait};
    use russell_lab::approx_eq;
    use russell_tensor::{Mandel, Tensor2, Tensor4};

    /// Returns the worked sample parameters: K=1e10, G=3.75e9, A1=1e6, A4=0.2
    fn sample_model() -> DruckerPrager {
        DruckerPrager::new(&ParamStressStrain::sample_drucker_prager(), false).unwrap()
    }

    /// Builds a strain increment producing a trial ΔI1 = 3 K Δεv and Δ√J2 = 2 G Δεxy
    fn strain_increment(eps_v: f64, eps_xy: f64) -> Tensor2 {
        let e = eps_v / 3.0;
        #[rustfmt::skip]
        let deps = Tensor2::from_matrix(&[
            [e, eps_xy, 0.0],
            [eps_xy, e, 0.0],
            [0.0, 0.0, e],
        ], Mandel::Symmetric).unwrap();
        deps
    }

    #[test]
    fn new_resolves_and_validates_parameters() {
        // all violations are reported at once
        let err = DruckerPrager::new(
            &ParamStressStrain::DruckerPrager {
                kk: -1.0,
                gg: 0.0,
                a1: -2.0,
                a4: 0.0,
            },
            false,
        )
        .unwrap_err();
        assert_eq!(
            err.errors,
            &[
                "A1 must be positive",
                "A4 must be positive",
                "bulk modulus K must be positive",
                "shear modulus G must be positive",
            ]
        );

        // hardening cannot be combined with the von Mises reduction
        let err = DruckerPrager::new(
            &ParamStressStrain::VonMises {
                kk: 1e10,
                gg: 3.75e9,
                y0: 1e6,
                hh: 800.0,
            },
            false,
        )
        .unwrap_err();
        assert_eq!(err.errors, &["cannot reduce to a von Mises surface with nonzero hardening"]);

        // A1 = 0 disables yielding instead of failing
        let model = DruckerPrager::new(
            &ParamStressStrain::DruckerPrager {
                kk: 1e10,
                gg: 3.75e9,
                a1: 0.0,
                a4: 0.2,
            },
            false,
        )
        .unwrap();
        assert_eq!(model.a1, A1_UNBOUNDED);
    }

    #[test]
    fn elastic_update_accepts_trial_stress() {
        let mut model = sample_model();
        let mut state = LocalState::new(Mandel::Symmetric);
        // trial I1 = 0.3e6, √J2 = 0.2e6 → f = 0.2e6 − (1e6 − 0.06e6) < 0
        let deps = strain_increment(1e-5, 0.2e6 / 7.5e9);
        model.update_stress(&mut state, &deps).unwrap();
        assert!(state.elastic);
        approx_eq(state.stress.get(0, 0), 0.1e6, 1e-7);
        approx_eq(state.stress.get(0, 1), 0.2e6, 1e-7);
        approx_eq(state.i1, 0.3e6, 1e-7);
        approx_eq(state.rootj2, 0.2e6, 1e-7);
        approx_eq(state.yield_rootj2, 1e6 - 0.2 * 0.3e6, 1e-7);
        assert_eq!(state.plastic_strain.vector().as_data(), &[0.0; 6]);
    }

    #[test]
    fn regular_return_matches_worked_scenario() {
        // trial state: I1 = 3e6, √J2 = 2e6 → f = 1.6e6 > 0; apex at I1 = 5e6 (not reached)
        let mut model = sample_model();
        let mut state = LocalState::new(Mandel::Symmetric);
        let deps = strain_increment(1e-4, 2e6 / 7.5e9);
        model.update_stress(&mut state, &deps).unwrap();
        assert!(!state.elastic);

        // corrected stress (closed-form, λ = 1.71406974128...e-4)
        for i in 0..3 {
            approx_eq(state.stress.get(i, i), -306122.44897959195, 1e-6);
        }
        approx_eq(state.stress.get(0, 1), 1183673.4693877553, 1e-6);
        approx_eq(state.stress.get(1, 2), 0.0, 1e-12);

        // plastic strain εᵖ = λ N
        for i in 0..3 {
            approx_eq(state.plastic_strain.get(i, i), 4.35374149659864e-5, 1e-15);
        }
        approx_eq(state.plastic_strain.get(0, 1), 1.0884353741496596e-4, 1e-15);

        // diagnostics land exactly on the yield surface
        approx_eq(state.i1, -918367.3469387759, 1e-6);
        approx_eq(state.rootj2, 1183673.4693877553, 1e-6);
        approx_eq(state.yield_rootj2, 1183673.4693877553, 1e-6);
        approx_eq(model.yield_function(&state.stress), 0.0, 1e-7);
    }

    #[test]
    fn vertex_return_collapses_onto_apex() {
        // nearly hydrostatic trial past the apex: I1 = 18e6 > A1/A4 = 5e6, √J2 = 0.1e6
        let mut model = sample_model();
        let mut state = LocalState::new(Mandel::Symmetric);
        let deps = strain_increment(18e6 / 3e10, 0.1e6 / 7.5e9);
        model.update_stress(&mut state, &deps).unwrap();
        assert!(!state.elastic);

        // apex stress is purely isotropic: σ = (A1/A4/3) I exactly
        let sigma_m_apex = 1e6 / 0.2 / 3.0;
        for i in 0..3 {
            approx_eq(state.stress.get(i, i), sigma_m_apex, 1e-9);
        }
        assert_eq!(state.stress.get(0, 1), 0.0);
        assert_eq!(state.stress.get(1, 2), 0.0);
        assert_eq!(state.stress.get(0, 2), 0.0);
        approx_eq(state.rootj2, 0.0, 1e-9);
        approx_eq(state.yield_rootj2, 0.0, 1e-9);

        // all excess strain became plastic
        for i in 0..3 {
            approx_eq(state.plastic_strain.get(i, i), 1.4444444444444444e-4, 1e-15);
        }
        approx_eq(state.plastic_strain.get(0, 1), 1.3333333333333333e-5, 1e-15);
    }

    #[test]
    fn plastic_return_is_consistent_with_elastic_split() {
        // after a regular return, σ = Dₑ : (ε − εᵖ)
        let mut model = sample_model();
        let mut state = LocalState::new(Mandel::Symmetric);
        let deps = strain_increment(1e-4, 2e6 / 7.5e9);
        model.update_stress(&mut state, &deps).unwrap();

        let mut eps_e = Tensor2::new(Mandel::Symmetric);
        let mut sigma = Tensor2::new(Mandel::Symmetric);
        for i in 0..6 {
            eps_e.vector_mut()[i] = deps.vector()[i] - state.plastic_strain.vector()[i];
        }
        model.stiffness.apply(&mut sigma, &eps_e);
        for i in 0..3 {
            for j in i..3 {
                approx_eq(sigma.get(i, j), state.stress.get(i, j), 1e-6);
            }
        }
    }

    #[test]
    fn pressure_independent_surface_never_takes_vertex_branch() {
        // von Mises reduction: yield at √J2 = Y0/√3 regardless of I1
        let param = ParamStressStrain::VonMises {
            kk: 1e10,
            gg: 3.75e9,
            y0: 1e6,
            hh: 0.0,
        };
        let mut model = DruckerPrager::new(&param, false).unwrap();
        let rj2_yield = 1e6 / f64::sqrt(3.0);

        // large hydrostatic compression plus shear beyond yield
        let mut state = LocalState::new(Mandel::Symmetric);
        let deps = strain_increment(-50e6 / 3e10, 2e6 / 7.5e9);
        model.update_stress(&mut state, &deps).unwrap();
        assert!(!state.elastic);
        approx_eq(state.rootj2, rj2_yield, 1e-6);
        // the return is purely deviatoric (A4 = 0): the mean stress is kept
        approx_eq(state.i1, -50e6, 1e-5);

        // large hydrostatic tension: same yield radius, no apex collapse
        let mut state = LocalState::new(Mandel::Symmetric);
        let deps = strain_increment(50e6 / 3e10, 2e6 / 7.5e9);
        model.update_stress(&mut state, &deps).unwrap();
        assert!(!state.elastic);
        approx_eq(state.rootj2, rj2_yield, 1e-6);
        approx_eq(state.i1, 50e6, 1e-5);
    }

    #[test]
    fn elastic_reduction_never_yields() {
        let param = ParamStressStrain::LinearElastic { kk: 1e10, gg: 3.75e9 };
        let mut model = DruckerPrager::new(&param, false).unwrap();
        let mut state = LocalState::new(Mandel::Symmetric);
        // enormous strain increment; yielding is disabled by the unbounded intercept
        let deps = strain_increment(1e3, 1e3);
        for _ in 0..3 {
            model.update_stress(&mut state, &deps).unwrap();
            assert!(state.elastic);
            assert_eq!(state.plastic_strain.vector().as_data(), &[0.0; 6]);
        }
    }

    #[test]
    fn surface_containment_holds_after_plastic_steps() {
        let mut model = sample_model();
        let mut state = LocalState::new(Mandel::Symmetric);
        let deps = strain_increment(2e-5, 1.5e-4);
        for _ in 0..10 {
            model.update_stress(&mut state, &deps).unwrap();
            let f = model.yield_function(&state.stress);
            assert!(f <= 1e-6, "yield function must be non-positive after the return; f = {}", f);
        }
        assert!(!state.elastic);
    }

    #[test]
    fn stiffness_is_always_the_elastic_operator() {
        let mut model = sample_model();
        let mut state = LocalState::new(Mandel::Symmetric);
        let mut dd_before = Tensor4::new(Mandel::Symmetric);
        let mut dd_after = Tensor4::new(Mandel::Symmetric);
        assert!(model.symmetric_stiffness());
        model.stiffness(&mut dd_before, &state).unwrap();

        // go plastic; the tangent stays the constant elastic operator
        let deps = strain_increment(1e-4, 2e6 / 7.5e9);
        model.update_stress(&mut state, &deps).unwrap();
        assert!(!state.elastic);
        model.stiffness(&mut dd_after, &state).unwrap();
        assert_eq!(dd_before.matrix().as_data(), dd_after.matrix().as_data());
    }

    #[test]
    fn initialize_state_zeroes_history() {
        let mut model = sample_model();
        let mut state = LocalState::new(Mandel::Symmetric);
        let deps = strain_increment(1e-4, 2e6 / 7.5e9);
        model.update_stress(&mut state, &deps).unwrap();
        assert!(!state.elastic);

        model.initialize_state(&mut state).unwrap();
        assert_eq!(state.plastic_strain.vector().as_data(), &[0.0; 6]);
        assert_eq!(state.i1, 0.0);
        assert_eq!(state.rootj2, 0.0);
        assert_eq!(state.yield_rootj2, 0.0);
        assert!(state.elastic);
    }

    #[test]
    fn works_in_2d() {
        let mut model = DruckerPrager::new(&ParamStressStrain::sample_drucker_prager(), true).unwrap();
        let mut state = LocalState::new(Mandel::Symmetric2D);
        let e = 1e-4 / 3.0;
        let g = 2e6 / 7.5e9;
        #[rustfmt::skip]
        let deps = Tensor2::from_matrix(&[
            [e, g, 0.0],
            [g, e, 0.0],
            [0.0, 0.0, e],
        ], Mandel::Symmetric2D).unwrap();
        model.update_stress(&mut state, &deps).unwrap();
        assert!(!state.elastic);
        approx_eq(state.stress.get(0, 1), 1183673.4693877553, 1e-6);
        approx_eq(root_jj2(&state.stress), state.yield_rootj2, 1e-6);
    }
}
