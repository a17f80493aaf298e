/// Policy for deciding when a divisor is too singular to invert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivideConfig {
    /// A divisor is rejected when `|det| <= singular_tolerance`.
    ///
    /// The default of `0.0` rejects only an exactly zero determinant.
    /// Near-singular divisors then pass and yield a huge, meaningless
    /// inverse; raising the tolerance changes which inputs fail.
    pub singular_tolerance: f64,
}

impl Default for DivideConfig {
    fn default() -> Self {
        Self {
            singular_tolerance: 0.0,
        }
    }
}

impl DivideConfig {
    /// Returns a config with the given tolerance, or `None` if it is
    /// negative or not finite.
    pub fn with_singular_tolerance(tolerance: f64) -> Option<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return None;
        }
        Some(Self {
            singular_tolerance: tolerance,
        })
    }

    pub fn is_singular(&self, determinant: f64) -> bool {
        determinant.abs() <= self.singular_tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_exact_zero() {
        let c = DivideConfig::default();
        assert!(c.is_singular(0.0));
        assert!(c.is_singular(-0.0));
        assert!(!c.is_singular(1e-300));
        assert!(!c.is_singular(f64::NAN));
    }

    #[test]
    fn test_tolerance() {
        let c = DivideConfig::with_singular_tolerance(1e-9).unwrap();
        assert!(c.is_singular(1e-12));
        assert!(c.is_singular(-1e-10));
        assert!(!c.is_singular(1e-6));
    }

    #[test]
    fn test_invalid_tolerance() {
        assert!(DivideConfig::with_singular_tolerance(-1.0).is_none());
        assert!(DivideConfig::with_singular_tolerance(f64::NAN).is_none());
        assert!(DivideConfig::with_singular_tolerance(f64::INFINITY).is_none());
    }
}
