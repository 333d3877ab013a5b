use std::net::{Ipv4Addr, SocketAddr};

/// Process settings. Fixed at startup; nothing is read from the environment
/// apart from the `RUST_LOG` filter handled by [`setup_tracing`](super::setup_tracing).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Mailbox size of the product actor.
    pub actor_buffer: usize,
    /// Page size the UI uses when the request does not name one.
    pub default_per_page: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 4000)),
            actor_buffer: 32,
            default_per_page: 10,
        }
    }
}
