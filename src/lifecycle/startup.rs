//! Startup orchestration.
//!
//! Config is already validated by the time it gets here. Credentials load
//! first, the listener binds last, so traffic is accepted only once the
//! server can answer it. Any failure is fatal.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::security::{CredentialError, CredentialSet};

/// Fatal startup errors.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("cannot bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// A server ready to run, with its bound listener.
pub struct Started {
    pub server: HttpServer,
    pub listener: TcpListener,
    pub local_addr: SocketAddr,
}

/// Load credentials, build the server and bind its listener.
pub async fn start(config: ServerConfig, shutdown: Shutdown) -> Result<Started, StartupError> {
    let credentials = CredentialSet::load(&config.credentials.path)?;

    let address = config.listener.bind_address.clone();
    let bind_error = |source| StartupError::Bind {
        address: address.clone(),
        source,
    };
    let listener = TcpListener::bind(&address).await.map_err(bind_error)?;
    let local_addr = listener.local_addr().map_err(bind_error)?;

    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config, credentials, shutdown);
    Ok(Started {
        server,
        listener,
        local_addr,
    })
}
