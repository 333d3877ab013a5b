use thiserror::Error;

/// Process-level failures reported from `main`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
    #[error("Actor task failed: {0}")]
    Shutdown(String),
}
