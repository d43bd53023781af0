#![allow(dead_code)]

use async_trait::async_trait;
use sidecar_relay_application::ports::PortProbe;
use sidecar_relay_client::{OutboundResponse, Transport};
use sidecar_relay_domain::{DomainError, OutboundRequest};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Records every request and answers with a fixed response.
#[derive(Clone)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<OutboundRequest>>>,
    status: u16,
    body: Vec<u8>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::responding(200, b"{}".to_vec())
    }

    pub fn responding(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(vec![])),
            status,
            body: body.into(),
        }
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, DomainError> {
        self.requests.lock().unwrap().push(request);
        Ok(OutboundResponse {
            status: self.status,
            headers: vec![],
            body: self.body.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[derive(Clone, Default)]
pub struct FakePortProbe {
    occupied: Arc<Mutex<HashSet<u16>>>,
}

impl FakePortProbe {
    pub fn with_occupied(ports: impl IntoIterator<Item = u16>) -> Self {
        let probe = Self::default();
        probe.occupied.lock().unwrap().extend(ports);
        probe
    }
}

#[async_trait]
impl PortProbe for FakePortProbe {
    async fn is_available(&self, port: u16) -> Result<bool, DomainError> {
        Ok(!self.occupied.lock().unwrap().contains(&port))
    }
}
