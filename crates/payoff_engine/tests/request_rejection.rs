//! Request rejection tests.
//!
//! Every invalid input must fail with a structured error before any
//! sampling work, and the error must name the offending field or
//! construct.

use payoff_engine::{
    price_with_rng, ExpressionError, PricingError, PricingRequest, SampleRng,
    ValidationError, MAX_SIMULATIONS,
};

#[test]
fn zero_simulations_rejected() {
    let err = PricingRequest::builder()
        .num_simulations(0)
        .build()
        .unwrap_err();
    assert_eq!(err, ValidationError::InvalidSimulationCount { count: 0 });
}

#[test]
fn excessive_simulations_rejected() {
    let err = PricingRequest::builder()
        .num_simulations(MAX_SIMULATIONS + 1)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidSimulationCount {
            count: MAX_SIMULATIONS + 1
        }
    );
}

#[test]
fn zero_maturity_rejected() {
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
fn negative_spot_rejected() {
    let err = PricingRequest::builder().spot(-1.0).build().unwrap_err();
    assert!(matches!(
        err,
        ValidationError::OutOfRange { field: "spot", .. }
    ));
}

#[test]
fn negative_volatility_rejected() {
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
fn non_finite_inputs_rejected() {
    for (field, build) in [
        (
            "strike",
            PricingRequest::builder().strike(f64::NAN).build(),
        ),
        (
            "maturity",
            PricingRequest::builder().maturity(f64::INFINITY).build(),
        ),
    ] {
        let err = build.unwrap_err();
        assert!(
            matches!(err, ValidationError::NonFinite { field: f, .. } if f == field),
            "expected NonFinite for {}, got {:?}",
            field,
            err
        );
    }
}

#[test]
fn disallowed_expression_never_samples() {
    let request = PricingRequest::builder()
        .payoff_expression("S_T + __import__(os)")
        .build()
        .unwrap();
    let err = price_with_rng(&request, &mut SampleRng::from_seed(1)).unwrap_err();
    assert_eq!(
        err,
        PricingError::Expression(ExpressionError::UnknownFunction {
            name: "__import__".to_string()
        })
    );
}

#[test]
fn pricing_error_kinds_are_distinguishable() {
    // Validation failure.
    let raw = payoff_engine::RawPricingRequest {
        spot: "100".to_string(),
        strike: "100".to_string(),
        rate: "0.03".to_string(),
        volatility: "0.2".to_string(),
        maturity: "0".to_string(),
        num_simulations: "1000".to_string(),
        payoff_expression: "S_T".to_string(),
    };
    let err: PricingError = raw.parse().unwrap_err().into();
    assert!(matches!(err, PricingError::Validation(_)));

    // Expression failure.
    let request = PricingRequest::builder()
        .payoff_expression("S_T +")
        .build()
        .unwrap();
    let err = price_with_rng(&request, &mut SampleRng::from_seed(1)).unwrap_err();
    assert!(matches!(err, PricingError::Expression(_)));

    // Evaluation failure.
    let request = PricingRequest::builder()
        .payoff_expression("log(S_T - 10 * K)")
        .num_simulations(1_000)
        .build()
        .unwrap();
    let err = price_with_rng(&request, &mut SampleRng::from_seed(1)).unwrap_err();
    assert!(matches!(err, PricingError::Evaluation(_)));
}

#[test]
fn error_messages_name_the_offender() {
    let err = PricingRequest::builder()
        .volatility(-0.2)
        .build()
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("volatility"));
    assert!(message.contains("-0.2"));
}
