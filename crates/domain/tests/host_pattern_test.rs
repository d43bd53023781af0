use sidecar_relay_domain::{
    backend_url, canonical_port_suffix, DomainError, Protocol, ServiceEndpoint,
};

// ── encode ────────────────────────────────────────────────────────────────────

#[test]
fn test_encode_plain_endpoint() {
    let endpoint = ServiceEndpoint::new(Protocol::Http, "orders", 8080);
    assert_eq!(endpoint.encode(), "http.orders.8080");
}

#[test]
fn test_encode_with_private_port() {
    let endpoint = ServiceEndpoint::new(Protocol::Https, "orders", 8443).with_private_port(55321);
    assert_eq!(endpoint.encode(), "https.orders.8443-55321");
}

#[test]
fn test_encode_omits_private_port_equal_to_public() {
    let endpoint = ServiceEndpoint::new(Protocol::Http, "orders", 8000).with_private_port(8000);
    assert_eq!(endpoint.private_port, None);
    assert_eq!(endpoint.encode(), "http.orders.8000");
}

#[test]
fn test_encode_dotted_service_name() {
    let endpoint = ServiceEndpoint::new(Protocol::Https, "api.internal", 443);
    assert_eq!(endpoint.encode(), "https.api.internal.443");
}

// ── decode ────────────────────────────────────────────────────────────────────

#[test]
fn test_decode_with_private_port() {
    let endpoint = ServiceEndpoint::decode("https.orders.8443-55321").unwrap();
    assert_eq!(endpoint.protocol, Protocol::Https);
    assert_eq!(endpoint.service_name.as_ref(), "orders");
    assert_eq!(endpoint.public_port, 8443);
    assert_eq!(endpoint.private_port, Some(55321));
    assert_eq!(endpoint.target_port(), 55321);
}

#[test]
fn test_decode_service_name_keeps_inner_dots() {
    let endpoint = ServiceEndpoint::decode("http.foo.svc.cluster.local.8080").unwrap();
    assert_eq!(endpoint.service_name.as_ref(), "foo.svc.cluster.local");
    assert_eq!(endpoint.public_port, 8080);
}

#[test]
fn test_decode_numeric_labels_in_service_name() {
    let endpoint = ServiceEndpoint::decode("http.a.1.2").unwrap();
    assert_eq!(endpoint.service_name.as_ref(), "a.1");
    assert_eq!(endpoint.public_port, 2);
}

#[test]
fn test_decode_rejects_unknown_protocol() {
    assert!(matches!(
        ServiceEndpoint::decode("ftp.orders.21"),
        Err(DomainError::InvalidPattern(_))
    ));
}

#[test]
fn test_decode_rejects_missing_port() {
    assert!(ServiceEndpoint::decode("http.orders").is_err());
    assert!(ServiceEndpoint::decode("http.orders.").is_err());
    assert!(ServiceEndpoint::decode("http.orders.web").is_err());
}

#[test]
fn test_decode_rejects_empty_service_name() {
    assert!(ServiceEndpoint::decode("http..8000").is_err());
    assert!(ServiceEndpoint::decode("http.8000").is_err());
}

#[test]
fn test_decode_rejects_out_of_range_ports() {
    assert!(ServiceEndpoint::decode("http.orders.0").is_err());
    assert!(ServiceEndpoint::decode("http.orders.65536").is_err());
    assert!(ServiceEndpoint::decode("http.orders.8000-0").is_err());
    assert!(ServiceEndpoint::decode("http.orders.8000-70000").is_err());
}

#[test]
fn test_decode_rejects_malformed_private_suffix() {
    assert!(ServiceEndpoint::decode("http.orders.8000-").is_err());
    assert!(ServiceEndpoint::decode("http.orders.8000-1-2").is_err());
}

#[test]
fn test_decode_accepts_port_bounds() {
    assert_eq!(ServiceEndpoint::decode("http.a.1").unwrap().public_port, 1);
    assert_eq!(
        ServiceEndpoint::decode("http.a.65535").unwrap().public_port,
        65535
    );
}

#[test]
fn test_round_trip() {
    let endpoints = [
        ServiceEndpoint::new(Protocol::Http, "orders", 8080),
        ServiceEndpoint::new(Protocol::Https, "api.internal", 443),
        ServiceEndpoint::new(Protocol::Http, "catalog", 8000).with_private_port(8004),
        ServiceEndpoint::new(Protocol::Https, "a.1.b", 1).with_private_port(65535),
    ];

    for endpoint in endpoints {
        assert_eq!(ServiceEndpoint::decode(&endpoint.encode()).unwrap(), endpoint);
    }
}

// ── registry key ──────────────────────────────────────────────────────────────

#[test]
fn test_registry_key_drops_private_suffix() {
    let endpoint = ServiceEndpoint::decode("http.orders.8000-8004").unwrap();
    assert_eq!(endpoint.registry_key(), "http.orders.8000");
}

// ── canonical port elision ────────────────────────────────────────────────────

#[test]
fn test_canonical_port_suffix_elides_defaults() {
    assert_eq!(canonical_port_suffix(Protocol::Http, 80), "");
    assert_eq!(canonical_port_suffix(Protocol::Https, 443), "");
}

#[test]
fn test_canonical_port_suffix_keeps_other_ports() {
    assert_eq!(canonical_port_suffix(Protocol::Http, 443), ":443");
    assert_eq!(canonical_port_suffix(Protocol::Https, 80), ":80");
    assert_eq!(canonical_port_suffix(Protocol::Http, 8080), ":8080");
}

#[test]
fn test_backend_url_brackets_ipv6_only() {
    assert_eq!(
        backend_url(Protocol::Http, "10.0.0.5", 8000),
        "http://10.0.0.5:8000"
    );
    assert_eq!(
        backend_url(Protocol::Http, "fd00::5", 8000),
        "http://[fd00::5]:8000"
    );
    assert_eq!(
        backend_url(Protocol::Https, "host.docker.internal", 8443),
        "https://host.docker.internal:8443"
    );
}

#[test]
fn test_protocol_parse() {
    assert_eq!("http".parse::<Protocol>().unwrap(), Protocol::Http);
    assert_eq!("HTTPS:".parse::<Protocol>().unwrap(), Protocol::Https);
    assert!("ws".parse::<Protocol>().is_err());
}

#[test]
fn test_validate_service_name() {
    assert!(ServiceEndpoint::validate_service_name("orders").is_ok());
    assert!(ServiceEndpoint::validate_service_name("api.internal").is_ok());
    assert!(ServiceEndpoint::validate_service_name("").is_err());
    assert!(ServiceEndpoint::validate_service_name(".orders").is_err());
    assert!(ServiceEndpoint::validate_service_name("my service").is_err());
}
