//! HTTP server configuration object.

use std::net::SocketAddr;

use habit_buddy::inbound::http::auth::TokenVerifier;
use habit_buddy::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) verifier: TokenVerifier,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, verifier: TokenVerifier) -> Self {
        Self {
            bind_addr,
            verifier,
            db_pool: None,
        }
    }

    /// Attach a database pool. Without one the server runs on fixture ports.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
