use sidecar_relay_domain::{DomainError, RequestMetadata};
use std::sync::Arc;
use tracing::debug;

use crate::ports::ResolverStrategy;

/// Lowest priority; strategies registered with it only run when nothing else matched.
pub const FALLBACK_PRIORITY: i32 = i32::MIN;

#[derive(Clone)]
pub struct PrioritizedStrategy {
    pub priority: i32,
    pub strategy: Arc<dyn ResolverStrategy>,
}

impl PrioritizedStrategy {
    pub fn new(priority: i32, strategy: Arc<dyn ResolverStrategy>) -> Self {
        Self { priority, strategy }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub target: String,
    pub strategy: &'static str,
}

/// Strategies ordered from highest to lowest priority; the first one that answers wins.
pub struct ResolverChain {
    strategies: Vec<PrioritizedStrategy>,
}

impl ResolverChain {
    /// Sorts once here. Equal priorities keep their registration order.
    pub fn new(mut strategies: Vec<PrioritizedStrategy>) -> Self {
        strategies.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self { strategies }
    }

    pub fn resolve(
        &self,
        host: &str,
        url: &str,
        metadata: &mut RequestMetadata,
    ) -> Result<Resolution, DomainError> {
        for entry in &self.strategies {
            if let Some(target) = entry.strategy.resolve(host, url, metadata) {
                debug!(
                    host = %host,
                    target = %target,
                    strategy = entry.strategy.name(),
                    "Host resolved"
                );
                return Ok(Resolution {
                    target,
                    strategy: entry.strategy.name(),
                });
            }
        }

        Err(DomainError::UpstreamNotFound(host.to_string()))
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.strategy.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
