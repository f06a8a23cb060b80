//! Monte Carlo pricing orchestration.
//!
//! One pricing call runs: validate request, compile payoff, draw
//! normals, map to terminal prices, evaluate the payoff per sample,
//! aggregate, discount. The call is a pure function of the request and
//! the injected random source, with no state shared across calls.

use payoff_expr::{compile, PayoffContext};
use tracing::debug;

use crate::error::PricingError;
use crate::request::PricingRequest;
use crate::result::PricingResult;
use crate::rng::SampleRng;
use crate::simulate::TerminalDistribution;

/// Prices a request with a fresh entropy-seeded random source.
///
/// # Errors
///
/// Returns [`PricingError`] on invalid inputs, a rejected payoff
/// expression, or a numeric-domain failure during evaluation.
///
/// # Examples
///
/// ```
/// use payoff_engine::{price, PricingRequest};
///
/// let result = price(&PricingRequest::default()).unwrap();
/// assert!(result.price > 0.0);
/// ```
pub fn price(request: &PricingRequest) -> Result<PricingResult, PricingError> {
    let mut rng = SampleRng::from_entropy();
    price_with_rng(request, &mut rng)
}

/// Prices a request drawing from the supplied random source.
///
/// This is the reproducibility seam: a seeded [`SampleRng`] plus a fixed
/// request yields an identical result on every call.
///
/// # Errors
///
/// Returns [`PricingError`] on invalid inputs, a rejected payoff
/// expression, or a numeric-domain failure during evaluation. The first
/// domain failure aborts the whole call; bad samples are never skipped
/// or averaged around.
///
/// # Examples
///
/// ```
/// use payoff_engine::{price_with_rng, PricingRequest, SampleRng};
///
/// let request = PricingRequest::builder()
///     .num_simulations(10_000)
///     .payoff_expression("maximum(K - S_T, 0)")
///     .build()
///     .unwrap();
///
/// let a = price_with_rng(&request, &mut SampleRng::from_seed(42)).unwrap();
/// let b = price_with_rng(&request, &mut SampleRng::from_seed(42)).unwrap();
/// assert_eq!(a.price, b.price);
/// ```
pub fn price_with_rng(
    request: &PricingRequest,
    rng: &mut SampleRng,
) -> Result<PricingResult, PricingError> {
    request.validate()?;

    let context = PayoffContext::new(request.strike(), request.spot(), request.rate());
    let payoff = compile(request.payoff_expression(), context)?;

    let n = request.num_simulations();
    debug!(
        num_simulations = n,
        seeded = rng.seed().is_some(),
        expression = request.payoff_expression(),
        "pricing payoff expression"
    );

    let law = TerminalDistribution::new(request);
    let discount = request.discount_factor();

    // Zero volatility is a point mass: every draw maps to the same
    // forward through the same formula, so evaluate it once and report
    // zero sampling error.
    if request.volatility() == 0.0 {
        let value = payoff.evaluate(law.terminal_price(0.0))?;
        let result = PricingResult {
            price: discount * value,
            std_error: 0.0,
            mean_payoff: value,
            request: request.clone(),
        };
        debug!(price = result.price, "pricing complete (degenerate)");
        return Ok(result);
    }

    // One O(n) buffer: draws are overwritten in place by payoff values.
    let mut samples = vec![0.0_f64; n];
    rng.fill_normal(&mut samples);
    for slot in samples.iter_mut() {
        let terminal = law.terminal_price(*slot);
        *slot = payoff.evaluate(terminal)?;
    }

    let mean = samples.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        samples.iter().map(|&p| (p - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };
    let std_dev = variance.sqrt();

    let result = PricingResult {
        price: discount * mean,
        std_error: discount * std_dev / (n as f64).sqrt(),
        mean_payoff: mean,
        request: request.clone(),
    };

    debug!(
        price = result.price,
        std_error = result.std_error,
        "pricing complete"
    );
    Ok(result)
}
