mod register_services;

pub use register_services::{parse_source_ip, RegisterServicesUseCase};
