use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub services: Vec<String>,
}

/// HostPattern → backend URL, only for the entries actually registered.
pub type RegisterResponse = BTreeMap<String, String>;
