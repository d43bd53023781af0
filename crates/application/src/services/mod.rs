mod do_not_proxy;
mod outbound_rewriter;
mod port_allocator;
mod resolver_chain;

pub use do_not_proxy::{DoNotProxyEntry, DoNotProxyList, HostPredicate};
pub use outbound_rewriter::{is_ip_literal, OutboundRewriter, RewriteDecision};
pub use port_allocator::{PortAllocator, DEFAULT_SCAN_RANGE};
pub use resolver_chain::{PrioritizedStrategy, Resolution, ResolverChain, FALLBACK_PRIORITY};
