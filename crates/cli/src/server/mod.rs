pub mod proxy;
pub mod web;

pub use proxy::{start_proxy_server, ProxyState};
pub use web::start_web_server;
