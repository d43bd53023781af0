mod resolve_upstream;

pub use resolve_upstream::{strip_port, ResolveUpstreamUseCase};
