//! Bound-scalar environment for payoff evaluation.

/// The three contract scalars a payoff expression may reference.
///
/// A [`CompiledPayoff`](crate::CompiledPayoff) closes over one of these
/// explicitly rather than through lexical capture, so the compiled payoff
/// carries no hidden state and is trivially shareable across threads.
///
/// # Examples
/// ```
/// use payoff_expr::PayoffContext;
///
/// let ctx = PayoffContext::new(100.0, 95.0, 0.03);
/// assert_eq!(ctx.strike, 100.0);
/// assert_eq!(ctx.spot, 95.0);
/// assert_eq!(ctx.rate, 0.03);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PayoffContext {
    /// Strike price, bound to the name `K`.
    pub strike: f64,
    /// Initial spot price, bound to the name `S0`.
    pub spot: f64,
    /// Annualised risk-free rate, bound to the name `r`.
    pub rate: f64,
}

impl PayoffContext {
    /// Creates a new context binding `K`, `S0` and `r`.
    #[inline]
    pub fn new(strike: f64, spot: f64, rate: f64) -> Self {
        Self { strike, spot, rate }
    }
}

impl Default for PayoffContext {
    fn default() -> Self {
        Self {
            strike: 100.0,
            spot: 100.0,
            rate: 0.03,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_bindings() {
        let ctx = PayoffContext::new(110.0, 100.0, 0.05);
        assert_eq!(ctx.strike, 110.0);
        assert_eq!(ctx.spot, 100.0);
        assert_eq!(ctx.rate, 0.05);
    }

    #[test]
    fn test_default_matches_form_defaults() {
        let ctx = PayoffContext::default();
        assert_eq!(ctx.strike, 100.0);
        assert_eq!(ctx.spot, 100.0);
        assert_eq!(ctx.rate, 0.03);
    }
}
