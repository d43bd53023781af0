#![allow(dead_code)]

use async_trait::async_trait;
use sidecar_relay_application::ports::{PortProbe, ResolverStrategy, ServiceRegistry};
use sidecar_relay_domain::{DomainError, RequestMetadata};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

#[derive(Clone, Default)]
pub struct MockServiceRegistry {
    entries: Arc<RwLock<HashMap<String, Arc<str>>>>,
    writes: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<(&str, &str)>) -> Self {
        let registry = Self::new();
        for (pattern, url) in entries {
            registry.register(pattern, url);
        }
        registry.writes.lock().unwrap().clear();
        registry
    }

    /// Every `register` call in order, including overwrites.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

impl ServiceRegistry for MockServiceRegistry {
    fn register(&self, pattern: &str, url: &str) {
        self.entries
            .write()
            .unwrap()
            .insert(pattern.to_string(), Arc::from(url));
        self.writes
            .lock()
            .unwrap()
            .push((pattern.to_string(), url.to_string()));
    }

    fn lookup(&self, pattern: &str) -> Option<Arc<str>> {
        self.entries.read().unwrap().get(pattern).cloned()
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

/// Ports listed as occupied report unavailable; `failing` ports return a fatal error.
#[derive(Clone, Default)]
pub struct FakePortProbe {
    occupied: Arc<RwLock<HashSet<u16>>>,
    failing: Arc<RwLock<HashSet<u16>>>,
    probed: Arc<Mutex<Vec<u16>>>,
}

impl FakePortProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occupied(ports: impl IntoIterator<Item = u16>) -> Self {
        let probe = Self::new();
        probe.occupied.write().unwrap().extend(ports);
        probe
    }

    pub fn fail_on(&self, port: u16) {
        self.failing.write().unwrap().insert(port);
    }

    pub fn probed(&self) -> Vec<u16> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl PortProbe for FakePortProbe {
    async fn is_available(&self, port: u16) -> Result<bool, DomainError> {
        self.probed.lock().unwrap().push(port);
        if self.failing.read().unwrap().contains(&port) {
            return Err(DomainError::PortProbe {
                port,
                reason: "permission denied".to_string(),
            });
        }
        Ok(!self.occupied.read().unwrap().contains(&port))
    }
}

/// Answers a fixed target for one host, nothing otherwise.
pub struct StaticStrategy {
    name: &'static str,
    host: String,
    target: String,
    calls: Arc<Mutex<usize>>,
}

impl StaticStrategy {
    pub fn new(name: &'static str, host: &str, target: &str) -> Self {
        Self {
            name,
            host: host.to_string(),
            target: target.to_string(),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ResolverStrategy for StaticStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn resolve(&self, host: &str, _url: &str, _metadata: &mut RequestMetadata) -> Option<String> {
        *self.calls.lock().unwrap() += 1;
        (host == self.host).then(|| self.target.clone())
    }
}

/// Answers every host.
pub struct CatchAllStrategy(pub &'static str);

impl ResolverStrategy for CatchAllStrategy {
    fn name(&self) -> &'static str {
        self.0
    }

    fn resolve(&self, host: &str, _url: &str, _metadata: &mut RequestMetadata) -> Option<String> {
        Some(format!("http://{}-{}", self.0, host))
    }
}
