//! Pricing result type.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::request::PricingRequest;

/// Outcome of one Monte Carlo pricing call.
///
/// Carries the discounted price estimate, its sampling error, the
/// undiscounted mean payoff and the echoed request. The engine reports
/// raw numbers only; rounding and currency formatting belong to the
/// presentation layer.
///
/// # Examples
///
/// ```
/// use payoff_engine::{price_with_rng, PricingRequest, SampleRng};
///
/// let request = PricingRequest::default();
/// let mut rng = SampleRng::from_seed(42);
/// let result = price_with_rng(&request, &mut rng).unwrap();
///
/// println!("{:.4} +/- {:.4}", result.price, result.confidence_95());
/// assert!(result.std_error > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PricingResult {
    /// Discounted expected payoff.
    pub price: f64,
    /// Monte Carlo standard error of `price`.
    pub std_error: f64,
    /// Undiscounted sample mean of the payoff.
    pub mean_payoff: f64,
    /// The validated request this result answers.
    pub request: PricingRequest,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_intervals_scale_with_std_error() {
        let result = PricingResult {
            price: 10.5,
            std_error: 0.05,
            mean_payoff: 10.8,
            request: PricingRequest::default(),
        };
        assert!((result.confidence_95() - 0.098).abs() < 1e-12);
        assert!(result.confidence_99() > result.confidence_95());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_result_serialises_with_echoed_inputs() {
        let result = PricingResult {
            price: 8.0,
            std_error: 0.1,
            mean_payoff: 8.25,
            request: PricingRequest::default(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"price\":8.0"));
        assert!(json.contains("maximum(S_T - K, 0)"));
    }
}
