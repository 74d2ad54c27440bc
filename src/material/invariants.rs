use russell_tensor::{Tensor2, SQRT_3};

/// Calculates √J2, the root of the second invariant of the deviator
///
/// ```text
/// √J2 = ‖dev(T)‖ / √2 = σd / √3
/// ```
///
/// where σd is the octahedral (von Mises) invariant. √J2 measures the
/// shear-stress magnitude and is the radius coordinate of conical yield
/// surfaces expressed in the (I1, √J2) invariant plane.
///
/// Note: the Mandel basis stores shear components scaled by √2, so the
/// tensor norm already accounts for the double-counting of the off-diagonal
/// components of a symmetric tensor.
pub fn root_jj2(tt: &Tensor2) -> f64 {
    tt.invariant_sigma_d() / SQRT_3
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
