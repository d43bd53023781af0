pub mod health;
pub mod registration;

pub use health::HealthResponse;
pub use registration::{RegisterRequest, RegisterResponse};
