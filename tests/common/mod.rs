//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use cryptserver::config::ServerConfig;
use cryptserver::lifecycle::{startup, Coordinator, DrainOutcome, Shutdown};
use tokio::task::JoinHandle;

/// Digest of "angryMonkey", the first entry of the fixture credential file.
pub const ANGRY_MONKEY_DIGEST: &str =
    "ZEHhWB65gUlzdVwtDQArEyx+KVLzp/aTaRaPlBzYRIFj6vjFdqEb0Q5B8zVKCZ0vKbZPZklJz0Fd7su2A+gf7Q==";

/// Credential file shared by the tests.
pub fn fixture_credentials() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shadow")
}

/// An in-process server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub coordinator: Coordinator,
    pub handle: JoinHandle<std::io::Result<DrainOutcome>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Wait for the server task to finish and return its drain outcome.
    pub async fn stopped(self, within: Duration) -> DrainOutcome {
        tokio::time::timeout(within, self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
            .expect("server returned an error")
    }
}

/// Start a server with the given response delay.
pub async fn start_server(delay: Duration) -> TestServer {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.delay.response_ms = u64::try_from(delay.as_millis()).unwrap();
    config.credentials.path = fixture_credentials();

    let shutdown = Shutdown::new();
    let started = startup::start(config, shutdown.clone()).await.unwrap();
    let coordinator = started.server.coordinator().clone();
    let addr = started.local_addr;
    let handle = tokio::spawn(started.server.run(started.listener));

    TestServer {
        addr,
        shutdown,
        coordinator,
        handle,
    }
}

/// A client that opens a fresh connection per request.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// POST a `password` form field to `url`.
pub async fn post_password(
    client: reqwest::Client,
    url: String,
    password: &'static str,
) -> reqwest::Result<(u16, String)> {
    let response = client
        .post(url)
        .form(&[("password", password)])
        .send()
        .await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok((status, body))
}
