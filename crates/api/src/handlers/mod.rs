pub mod health;
pub mod registration;

pub use health::health_check;
