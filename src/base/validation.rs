use std::error::Error;
use std::fmt;

/// Holds all parameter admissibility violations detected at model setup
///
/// Violations are collected instead of failing fast, so a single setup call
/// surfaces the complete list of problems with a parameter set.
#[derive(Clone, Debug, PartialEq)]
pub struct InvalidParams {
    /// Holds one message per violation
    pub errors: Vec<String>,
}

impl InvalidParams {
    /// Allocates a new instance with no violations recorded yet
    pub(crate) fn new() -> Self {
        InvalidParams { errors: Vec::new() }
    }

    /// Records a violation
    pub(crate) fn push(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    /// Checks the admissibility of the elastic moduli
    ///
    /// Records violations of K > 0, G > 0, and ν = (3K−2G)/(6K+2G) ∈ (−1, 0.5].
    /// A negative Poisson ratio is unusual but admissible; it only emits a warning.
    pub(crate) fn check_bulk_shear(&mut self, kk: f64, gg: f64) {
        if kk <= 0.0 {
            self.push("bulk modulus K must be positive");
        }
        if gg <= 0.0 {
            self.push("shear modulus G must be positive");
        }
        let poisson = (3.0 * kk - 2.0 * gg) / (6.0 * kk + 2.0 * gg);
        if poisson > 0.5 {
            self.push("Poisson's ratio must not exceed 0.5");
        }
        if poisson < -1.0 {
            self.push("Poisson's ratio must be greater than -1");
        }
        if poisson < 0.0 {
            log::warn!("negative Poisson's ratio: {}", poisson);
        }
    }

    /// Returns Ok if no violation has been recorded
    pub(crate) fn into_result(self) -> Result<(), InvalidParams> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for InvalidParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid parameters: {}", self.errors.join("; "))
    }
}

impl Error for InvalidParams {}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
