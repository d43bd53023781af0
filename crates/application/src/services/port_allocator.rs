use sidecar_relay_domain::DomainError;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::PortProbe;

pub const DEFAULT_SCAN_RANGE: u16 = 1000;

/// Finds a free local port by probing `start, start + 1, ...` in order.
///
/// Availability is only measured, never reserved: another process may take the port between
/// the probe and the caller's own bind. There is no aggregate timeout across the scan.
pub struct PortAllocator {
    probe: Arc<dyn PortProbe>,
    range: u16,
}

impl PortAllocator {
    pub fn new(probe: Arc<dyn PortProbe>) -> Self {
        Self {
            probe,
            range: DEFAULT_SCAN_RANGE,
        }
    }

    pub fn with_range(mut self, range: u16) -> Self {
        self.range = range;
        self
    }

    #[instrument(skip(self))]
    pub async fn find_port(&self, start: u16) -> Result<u16, DomainError> {
        let end = start as u32 + self.range as u32;

        for candidate in start as u32..end.min(u16::MAX as u32 + 1) {
            let port = candidate as u16;
            if port == 0 {
                continue;
            }
            if self.probe.is_available(port).await? {
                debug!(port, "Free port found");
                return Ok(port);
            }
        }

        Err(DomainError::AllocationExhausted { start, end })
    }
}
