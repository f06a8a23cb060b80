//! # Payoff Engine
//!
//! Monte Carlo pricing of user-supplied payoff expressions under
//! Black-Scholes (geometric Brownian motion) dynamics.
//!
//! A pricing call takes a validated [`PricingRequest`], compiles its
//! payoff formula through [`payoff_expr`], draws terminal prices from
//! the exact risk-neutral lognormal law
//!
//! ```text
//! S_T = S0 * exp((r - 0.5 * sigma^2) * T + sigma * sqrt(T) * Z)
//! ```
//!
//! and returns a discounted [`PricingResult`] with its Monte Carlo
//! standard error. The computation is synchronous, request-scoped and
//! free of shared state: concurrent callers each bring their own
//! request and random source.
//!
//! ## Errors
//!
//! Every failure is a recoverable [`PricingError`]:
//!
//! - [`ValidationError`]: out-of-range or malformed numeric inputs,
//!   checked before any compilation or sampling;
//! - [`payoff_expr::ExpressionError`]: the formula was rejected by the
//!   whitelist, before any sampling;
//! - [`payoff_expr::EvaluationError`]: a numeric-domain failure during
//!   simulation, aborting the whole call rather than averaging around
//!   bad samples.
//!
//! ## Reproducibility
//!
//! All randomness enters through the [`SampleRng`] seam. [`price`]
//! draws from OS entropy; [`price_with_rng`] accepts a seeded source
//! and is fully deterministic.
//!
//! ## Example
//!
//! ```
//! use payoff_engine::{price_with_rng, PricingRequest, SampleRng};
//!
//! let request = PricingRequest::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .rate(0.03)
//!     .volatility(0.2)
//!     .maturity(1.0)
//!     .num_simulations(100_000)
//!     .payoff_expression("maximum(S_T - K, 0)")
//!     .build()
//!     .unwrap();
//!
//! let result = price_with_rng(&request, &mut SampleRng::from_seed(42)).unwrap();
//! println!("price {:.4} +/- {:.4}", result.price, result.confidence_95());
//! ```

pub mod analytic;
mod engine;
mod error;
mod request;
mod result;
mod rng;
mod simulate;

pub use engine::{price, price_with_rng};
pub use error::{PricingError, ValidationError};
pub use request::{PricingRequest, PricingRequestBuilder, RawPricingRequest, MAX_SIMULATIONS};
pub use result::PricingResult;
pub use rng::SampleRng;
pub use simulate::TerminalDistribution;

// Re-export the expression surface so collaborators depend on one crate.
pub use payoff_expr::{compile, CompiledPayoff, EvaluationError, ExpressionError, PayoffContext};
