//! Pricing request construction and validation.
//!
//! A [`PricingRequest`] is an immutable value object, fully validated
//! before any payoff compilation or sampling happens. Use
//! [`PricingRequestBuilder`] for programmatic construction, or
//! [`RawPricingRequest`] when the inputs arrive as text from a form or
//! API boundary.
//!
//! Deserialisation deliberately targets [`RawPricingRequest`] only: a
//! validated request cannot be conjured from serialised data without
//! passing through `parse`, so the validation invariant holds everywhere.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum number of Monte Carlo simulations allowed per request.
pub const MAX_SIMULATIONS: usize = 10_000_000;

/// Immutable, validated pricing request.
///
/// Field domains:
/// - `spot` (S0) and `strike` (K): positive and finite
/// - `rate` (r): any finite real
/// - `volatility` (sigma): non-negative and finite
/// - `maturity` (T): positive and finite, in years
/// - `num_simulations`: in [1, [`MAX_SIMULATIONS`]]
///
/// # Examples
///
/// ```
/// use payoff_engine::PricingRequest;
///
/// let request = PricingRequest::builder()
///     .spot(105.0)
///     .strike(100.0)
///     .rate(0.03)
///     .volatility(0.25)
///     .maturity(0.5)
///     .num_simulations(100_000)
///     .payoff_expression("maximum(S_T - K, 0)")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.spot(), 105.0);
/// assert_eq!(request.num_simulations(), 100_000);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PricingRequest {
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    num_simulations: usize,
    payoff_expression: String,
}

impl PricingRequest {
    /// Creates a new request builder, prefilled with the default
    /// vanilla-call parameters.
    #[inline]
    pub fn builder() -> PricingRequestBuilder {
        PricingRequestBuilder::default()
    }

    /// Initial spot price (S0).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price (K).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Annualised risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualised volatility (sigma).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Time to maturity (T), in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Number of Monte Carlo draws.
    #[inline]
    pub fn num_simulations(&self) -> usize {
        self.num_simulations
    }

    /// The payoff formula text.
    #[inline]
    pub fn payoff_expression(&self) -> &str {
        &self.payoff_expression
    }

    /// Present-value discount factor `exp(-r * T)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Validates every numeric field against its domain.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as a [`ValidationError`].
    /// Non-finiteness is checked before range so a NaN never satisfies a
    /// comparison by accident.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("rate", self.rate),
            ("volatility", self.volatility),
            ("maturity", self.maturity),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field, value });
            }
        }

        if self.spot <= 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "spot",
                value: self.spot,
                constraint: "must be positive",
            });
        }
        if self.strike <= 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "strike",
                value: self.strike,
                constraint: "must be positive",
            });
        }
        if self.volatility < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "volatility",
                value: self.volatility,
                constraint: "must be non-negative",
            });
        }
        if self.maturity <= 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "maturity",
                value: self.maturity,
                constraint: "must be positive",
            });
        }
        if self.num_simulations == 0 || self.num_simulations > MAX_SIMULATIONS {
            return Err(ValidationError::InvalidSimulationCount {
                count: self.num_simulations,
            });
        }
        Ok(())
    }
}

impl Default for PricingRequest {
    /// The defaults the original pricing form ships with: an at-the-money
    /// vanilla call.
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            rate: 0.03,
            volatility: 0.2,
            maturity: 1.0,
            num_simulations: 50_000,
            payoff_expression: "maximum(S_T - K, 0)".to_string(),
        }
    }
}

/// Builder for [`PricingRequest`] with validation at build time.
///
/// # Examples
///
/// ```
/// use payoff_engine::{PricingRequest, ValidationError};
///
/// let err = PricingRequest::builder()
///     .maturity(0.0)
///     .build()
///     .unwrap_err();
///
/// assert!(matches!(err, ValidationError::OutOfRange { field: "maturity", .. }));
/// ```
#[derive(Clone, Debug)]
pub struct PricingRequestBuilder {
    request: PricingRequest,
}

impl Default for PricingRequestBuilder {
    fn default() -> Self {
        Self {
            request: PricingRequest::default(),
        }
    }
}

impl PricingRequestBuilder {
    /// Sets the initial spot price (S0).
    pub fn spot(mut self, spot: f64) -> Self {
        self.request.spot = spot;
        self
    }

    /// Sets the strike price (K).
    pub fn strike(mut self, strike: f64) -> Self {
        self.request.strike = strike;
        self
    }

    /// Sets the annualised risk-free rate (r).
    pub fn rate(mut self, rate: f64) -> Self {
        self.request.rate = rate;
        self
    }

    /// Sets the annualised volatility (sigma).
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.request.volatility = volatility;
        self
    }

    /// Sets the time to maturity (T), in years.
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.request.maturity = maturity;
        self
    }

    /// Sets the number of Monte Carlo draws.
    pub fn num_simulations(mut self, num_simulations: usize) -> Self {
        self.request.num_simulations = num_simulations;
        self
    }

    /// Sets the payoff formula text.
    pub fn payoff_expression(mut self, expression: impl Into<String>) -> Self {
        self.request.payoff_expression = expression.into();
        self
    }

    /// Validates and returns the request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if any field violates its domain.
    pub fn build(self) -> Result<PricingRequest, ValidationError> {
        self.request.validate()?;
        Ok(self.request)
    }
}

/// A pricing request as it arrives at the boundary: every numeric field
/// still text.
///
/// [`parse`](RawPricingRequest::parse) converts and validates in one
/// step, so a collaborator handing over form fields gets either a fully
/// validated [`PricingRequest`] or a structured [`ValidationError`]
/// naming the offending field.
///
/// # Examples
///
/// ```
/// use payoff_engine::RawPricingRequest;
///
/// let raw = RawPricingRequest {
///     spot: "100".to_string(),
///     strike: "95".to_string(),
///     rate: "0.03".to_string(),
///     volatility: "0.2".to_string(),
///     maturity: "1.0".to_string(),
///     num_simulations: "50000".to_string(),
///     payoff_expression: "maximum(K - S_T, 0)".to_string(),
/// };
///
/// let request = raw.parse().unwrap();
/// assert_eq!(request.strike(), 95.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawPricingRequest {
    /// Initial spot price text.
    pub spot: String,
    /// Strike price text.
    pub strike: String,
    /// Risk-free rate text.
    pub rate: String,
    /// Volatility text.
    pub volatility: String,
    /// Maturity text.
    pub maturity: String,
    /// Simulation count text.
    pub num_simulations: String,
    /// Payoff formula text, passed through untouched.
    pub payoff_expression: String,
}

impl RawPricingRequest {
    /// Converts the text fields and validates the resulting request.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Malformed`] when a field is not numeric, or
    /// any other [`ValidationError`] from domain validation.
    pub fn parse(&self) -> Result<PricingRequest, ValidationError> {
        let num_simulations = self
            .num_simulations
            .trim()
            .parse::<usize>()
            .map_err(|_| ValidationError::Malformed {
                field: "num_simulations",
                text: self.num_simulations.clone(),
            })?;

        PricingRequest::builder()
            .spot(parse_field("spot", &self.spot)?)
            .strike(parse_field("strike", &self.strike)?)
            .rate(parse_field("rate", &self.rate)?)
            .volatility(parse_field("volatility", &self.volatility)?)
            .maturity(parse_field("maturity", &self.maturity)?)
            .num_simulations(num_simulations)
            .payoff_expression(self.payoff_expression.trim())
            .build()
    }
}

fn parse_field(field: &'static str, text: &str) -> Result<f64, ValidationError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::Malformed {
            field,
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_valid_request() {
        let request = PricingRequest::builder()
            .spot(120.0)
            .strike(100.0)
            .rate(0.05)
            .volatility(0.3)
            .maturity(2.0)
            .num_simulations(10_000)
            .payoff_expression("maximum(S_T - K, 0)")
            .build()
            .unwrap();

        assert_eq!(request.spot(), 120.0);
        assert_eq!(request.maturity(), 2.0);
        assert_eq!(request.payoff_expression(), "maximum(S_T - K, 0)");
    }

    #[test]
    fn test_default_matches_form_defaults() {
        let request = PricingRequest::default();
        assert_eq!(request.spot(), 100.0);
        assert_eq!(request.strike(), 100.0);
        assert_eq!(request.rate(), 0.03);
        assert_eq!(request.volatility(), 0.2);
        assert_eq!(request.maturity(), 1.0);
        assert_eq!(request.num_simulations(), 50_000);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_spot() {
        let err = PricingRequest::builder().spot(-1.0).build().unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "spot",
                value: -1.0,
                constraint: "must be positive",
            }
        );
        assert!(PricingRequest::builder().spot(0.0).build().is_err());
    }

    #[test]
    fn test_rejects_negative_volatility() {
        let err = PricingRequest::builder()
            .volatility(-0.2)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "volatility",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_volatility_is_valid() {
        assert!(PricingRequest::builder().volatility(0.0).build().is_ok());
    }

    #[test]
    fn test_rejects_zero_maturity() {
        let err = PricingRequest::builder().maturity(0.0).build().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "maturity",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_simulation_counts() {
        let err = PricingRequest::builder()
            .num_simulations(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidSimulationCount { count: 0 });

        assert!(PricingRequest::builder()
            .num_simulations(MAX_SIMULATIONS + 1)
            .build()
            .is_err());
        assert!(PricingRequest::builder()
            .num_simulations(MAX_SIMULATIONS)
            .build()
            .is_ok());
    }

    #[test]
    fn test_rejects_non_finite_fields() {
        let err = PricingRequest::builder()
            .spot(f64::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: "spot", .. }));

        let err = PricingRequest::builder()
            .rate(f64::INFINITY)
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: "rate", .. }));
    }

    #[test]
    fn test_negative_rate_is_valid() {
        assert!(PricingRequest::builder().rate(-0.01).build().is_ok());
    }

    #[test]
    fn test_discount_factor() {
        let request = PricingRequest::builder()
            .rate(0.05)
            .maturity(2.0)
            .build()
            .unwrap();
        assert!((request.discount_factor() - (-0.1f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_raw_request_parses_and_trims() {
        let raw = RawPricingRequest {
            spot: " 100.5 ".to_string(),
            strike: "99".to_string(),
            rate: "0.01".to_string(),
            volatility: "0.15".to_string(),
            maturity: "0.25".to_string(),
            num_simulations: " 1000 ".to_string(),
            payoff_expression: "  maximum(S_T - K, 0)  ".to_string(),
        };
        let request = raw.parse().unwrap();
        assert_eq!(request.spot(), 100.5);
        assert_eq!(request.num_simulations(), 1000);
        assert_eq!(request.payoff_expression(), "maximum(S_T - K, 0)");
    }

    #[test]
    fn test_raw_request_malformed_field() {
        let raw = RawPricingRequest {
            spot: "a hundred".to_string(),
            strike: "100".to_string(),
            rate: "0.03".to_string(),
            volatility: "0.2".to_string(),
            maturity: "1".to_string(),
            num_simulations: "1000".to_string(),
            payoff_expression: "S_T".to_string(),
        };
        let err = raw.parse().unwrap_err();
        assert_eq!(
            err,
            ValidationError::Malformed {
                field: "spot",
                text: "a hundred".to_string(),
            }
        );
    }

    #[test]
    fn test_raw_request_fractional_simulation_count() {
        let raw = RawPricingRequest {
            spot: "100".to_string(),
            strike: "100".to_string(),
            rate: "0.03".to_string(),
            volatility: "0.2".to_string(),
            maturity: "1".to_string(),
            num_simulations: "10.5".to_string(),
            payoff_expression: "S_T".to_string(),
        };
        assert!(matches!(
            raw.parse().unwrap_err(),
            ValidationError::Malformed {
                field: "num_simulations",
                ..
            }
        ));
    }
}
