use sidecar_relay_application::services::{PrioritizedStrategy, ResolverChain, FALLBACK_PRIORITY};
use sidecar_relay_application::use_cases::resolution::strip_port;
use sidecar_relay_application::use_cases::ResolveUpstreamUseCase;
use sidecar_relay_domain::{DomainError, RequestMetadata};
use std::sync::Arc;

mod helpers;
use helpers::{CatchAllStrategy, StaticStrategy};

// ── ordering ─────────────────────────────────────────────────────────────────

#[test]
fn test_highest_priority_strategy_runs_first() {
    let chain = ResolverChain::new(vec![
        PrioritizedStrategy::new(FALLBACK_PRIORITY, Arc::new(CatchAllStrategy("fallback"))),
        PrioritizedStrategy::new(10, Arc::new(CatchAllStrategy("specific"))),
    ]);

    let mut metadata = RequestMetadata::default();
    let resolution = chain.resolve("orders", "/", &mut metadata).unwrap();

    assert_eq!(resolution.strategy, "specific");
    assert_eq!(chain.strategy_names(), vec!["specific", "fallback"]);
}

#[test]
fn test_equal_priorities_keep_registration_order() {
    let chain = ResolverChain::new(vec![
        PrioritizedStrategy::new(0, Arc::new(CatchAllStrategy("first"))),
        PrioritizedStrategy::new(0, Arc::new(CatchAllStrategy("second"))),
    ]);

    assert_eq!(chain.strategy_names(), vec!["first", "second"]);
}

#[test]
fn test_first_match_short_circuits() {
    let specific = Arc::new(StaticStrategy::new("registry", "http.orders.8000", "http://10.0.0.5:8000"));
    let fallback = Arc::new(StaticStrategy::new("fallback", "http.orders.8000", "http://orders:8000"));
    let chain = ResolverChain::new(vec![
        PrioritizedStrategy::new(FALLBACK_PRIORITY, fallback.clone()),
        PrioritizedStrategy::new(0, specific.clone()),
    ]);

    let mut metadata = RequestMetadata::default();
    let resolution = chain.resolve("http.orders.8000", "/", &mut metadata).unwrap();

    assert_eq!(resolution.target, "http://10.0.0.5:8000");
    assert_eq!(specific.calls(), 1);
    assert_eq!(fallback.calls(), 0);
}

#[test]
fn test_falls_through_to_lower_priority() {
    let specific = Arc::new(StaticStrategy::new("registry", "http.billing.8000", "http://10.0.0.5:8000"));
    let chain = ResolverChain::new(vec![
        PrioritizedStrategy::new(0, specific.clone()),
        PrioritizedStrategy::new(FALLBACK_PRIORITY, Arc::new(CatchAllStrategy("fallback"))),
    ]);

    let mut metadata = RequestMetadata::default();
    let resolution = chain.resolve("http.orders.8000", "/", &mut metadata).unwrap();

    assert_eq!(resolution.strategy, "fallback");
    assert_eq!(specific.calls(), 1);
}

#[test]
fn test_no_match_is_upstream_not_found() {
    let chain = ResolverChain::new(vec![PrioritizedStrategy::new(
        0,
        Arc::new(StaticStrategy::new("registry", "http.orders.8000", "http://x")),
    )]);

    let mut metadata = RequestMetadata::default();
    let err = chain.resolve("unknown", "/", &mut metadata).unwrap_err();

    assert_eq!(err, DomainError::UpstreamNotFound("unknown".to_string()));
}

#[test]
fn test_empty_chain_never_resolves() {
    let chain = ResolverChain::new(vec![]);
    let mut metadata = RequestMetadata::default();

    assert!(chain.is_empty());
    assert!(chain.resolve("http.orders.8000", "/", &mut metadata).is_err());
}

// ── use case ─────────────────────────────────────────────────────────────────

#[test]
fn test_use_case_strips_port_from_host() {
    let chain = Arc::new(ResolverChain::new(vec![PrioritizedStrategy::new(
        0,
        Arc::new(StaticStrategy::new("registry", "http.orders.8000", "http://10.0.0.5:8000")),
    )]));
    let use_case = ResolveUpstreamUseCase::new(chain);

    let mut metadata = RequestMetadata::default();
    let resolution = use_case
        .execute("http.orders.8000:9990", "/", &mut metadata)
        .unwrap();

    assert_eq!(resolution.target, "http://10.0.0.5:8000");
}

#[test]
fn test_use_case_rejects_empty_host() {
    let chain = Arc::new(ResolverChain::new(vec![PrioritizedStrategy::new(
        0,
        Arc::new(CatchAllStrategy("any")),
    )]));
    let use_case = ResolveUpstreamUseCase::new(chain);

    let mut metadata = RequestMetadata::default();
    assert!(matches!(
        use_case.execute("  ", "/", &mut metadata),
        Err(DomainError::UpstreamNotFound(_))
    ));
}

#[test]
fn test_strip_port() {
    assert_eq!(strip_port("http.orders.8000:9990"), "http.orders.8000");
    assert_eq!(strip_port("http.orders.8000"), "http.orders.8000");
    assert_eq!(strip_port("[fd00::1]:8080"), "[fd00::1]");
    assert_eq!(strip_port("fd00::1"), "fd00::1");
    assert_eq!(strip_port("orders:"), "orders:");
}
