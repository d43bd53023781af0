pub mod registration;
pub mod resolution;

pub use registration::RegisterServicesUseCase;
pub use resolution::ResolveUpstreamUseCase;
