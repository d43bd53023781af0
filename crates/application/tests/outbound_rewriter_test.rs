use sidecar_relay_application::services::{
    is_ip_literal, DoNotProxyEntry, DoNotProxyList, OutboundRewriter, RewriteDecision,
};
use sidecar_relay_domain::headers::{ENCODED_HOST_HEADER, SOURCE_HEADER};
use sidecar_relay_domain::{OutboundRequest, Protocol};

fn rewriter(do_not_proxy: DoNotProxyList) -> OutboundRewriter {
    OutboundRewriter::new("container-proxy", 9990, "orders", do_not_proxy)
}

// ── rewriting ────────────────────────────────────────────────────────────────

#[test]
fn test_https_call_is_rewritten_to_plaintext_proxy() {
    let mut request = OutboundRequest::new("GET", Protocol::Https, "api.internal", Some(443), "/v1/items");

    let decision = rewriter(DoNotProxyList::new()).rewrite(&mut request);

    assert_eq!(
        decision,
        RewriteDecision::Proxied {
            encoded_host: "https.api.internal.443".to_string()
        }
    );
    assert_eq!(request.protocol, Protocol::Http);
    assert_eq!(request.host.as_deref(), Some("container-proxy"));
    assert_eq!(request.port, Some(9990));
    assert_eq!(request.header(ENCODED_HOST_HEADER), Some("https.api.internal.443"));
    assert_eq!(request.header(SOURCE_HEADER), Some("orders"));
    assert_eq!(request.path, "/v1/items");
}

#[test]
fn test_missing_port_uses_protocol_default() {
    let mut request = OutboundRequest::new("GET", Protocol::Http, "catalog", None, "/");

    let decision = rewriter(DoNotProxyList::new()).rewrite(&mut request);

    assert_eq!(
        decision,
        RewriteDecision::Proxied {
            encoded_host: "http.catalog.80".to_string()
        }
    );
}

#[test]
fn test_hostname_only_is_normalized() {
    let mut request = OutboundRequest::new("GET", Protocol::Http, "unused", Some(8080), "items");
    request.host = None;
    request.hostname = Some("catalog".to_string());

    rewriter(DoNotProxyList::new()).rewrite(&mut request);

    assert_eq!(request.header(ENCODED_HOST_HEADER), Some("http.catalog.8080"));
    assert_eq!(request.hostname.as_deref(), Some("container-proxy"));
    assert_eq!(request.path, "/items");
}

#[test]
fn test_href_is_regenerated_with_path_and_query() {
    let mut request = OutboundRequest::new("GET", Protocol::Https, "api.internal", None, "/search?q=a");
    request.href = Some("https://api.internal/search?q=a".to_string());

    rewriter(DoNotProxyList::new()).rewrite(&mut request);

    assert_eq!(
        request.href.as_deref(),
        Some("http://container-proxy:9990/search?q=a")
    );
}

#[test]
fn test_existing_host_header_is_replaced() {
    let mut request = OutboundRequest::new("GET", Protocol::Http, "catalog", Some(9000), "/")
        .with_header("Host", "catalog:9000");

    rewriter(DoNotProxyList::new()).rewrite(&mut request);

    let host_headers: Vec<_> = request
        .headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("host"))
        .collect();
    assert_eq!(host_headers.len(), 1);
    assert_eq!(host_headers[0].1, "http.catalog.9000");
}

// ── bypass ───────────────────────────────────────────────────────────────────

#[test]
fn test_ipv4_literal_bypasses() {
    let mut request = OutboundRequest::new("GET", Protocol::Http, "10.0.0.5", Some(8000), "/");
    let before = request.clone();

    let decision = rewriter(DoNotProxyList::new()).rewrite(&mut request);

    assert_eq!(decision, RewriteDecision::Bypassed);
    assert_eq!(request, before);
}

#[test]
fn test_ipv6_literal_bypasses() {
    let mut request = OutboundRequest::new("GET", Protocol::Http, "[fd00::1]", Some(8000), "/");

    assert_eq!(
        rewriter(DoNotProxyList::new()).rewrite(&mut request),
        RewriteDecision::Bypassed
    );
}

#[test]
fn test_glob_exemption_bypasses() {
    let list = DoNotProxyList::from_entries(&["*.svc.cluster.local"]).unwrap();
    let mut request =
        OutboundRequest::new("GET", Protocol::Http, "foo.svc.cluster.local", Some(80), "/");
    let before = request.clone();

    let decision = rewriter(list).rewrite(&mut request);

    assert_eq!(decision, RewriteDecision::Bypassed);
    assert_eq!(request, before);
}

#[test]
fn test_predicate_exemption_bypasses() {
    let list = DoNotProxyList::new().with_predicate(|host| host.ends_with(".amazonaws.com"));
    let mut request =
        OutboundRequest::new("GET", Protocol::Https, "s3.amazonaws.com", None, "/bucket");

    assert_eq!(rewriter(list).rewrite(&mut request), RewriteDecision::Bypassed);
}

#[test]
fn test_missing_host_bypasses() {
    let mut request = OutboundRequest::new("GET", Protocol::Http, "", None, "/");
    request.host = None;

    assert_eq!(
        rewriter(DoNotProxyList::new()).rewrite(&mut request),
        RewriteDecision::Bypassed
    );
}

// ── allow-list entries ───────────────────────────────────────────────────────

#[test]
fn test_literal_entry_is_case_insensitive() {
    let entry = DoNotProxyEntry::parse("Metadata.Google.Internal").unwrap();

    assert!(entry.matches("metadata.google.internal"));
    assert!(!entry.matches("google.internal"));
}

#[test]
fn test_glob_does_not_match_bare_suffix() {
    let list = DoNotProxyList::from_entries(&["*.svc.cluster.local"]).unwrap();

    assert!(list.matches("a.b.svc.cluster.local"));
    assert!(list.matches("FOO.svc.cluster.local"));
    assert!(!list.matches("svc.cluster.local"));
    assert!(!list.matches("foo.svc.cluster.local.evil.com"));
}

#[test]
fn test_regex_entry() {
    let list = DoNotProxyList::from_entries(&["/^db-\\d+$/"]).unwrap();

    assert!(list.matches("db-12"));
    assert!(!list.matches("db-primary"));
}

#[test]
fn test_invalid_regex_is_config_error() {
    assert!(DoNotProxyList::from_entries(&["/(unclosed/"]).is_err());
}

#[test]
fn test_is_ip_literal() {
    assert!(is_ip_literal("127.0.0.1"));
    assert!(is_ip_literal("::1"));
    assert!(is_ip_literal("[fd00::1]"));
    assert!(!is_ip_literal("localhost"));
    assert!(!is_ip_literal("api.internal"));
}
