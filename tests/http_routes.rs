//! End-to-end checks of both endpoints over real TCP connections.

use std::time::{Duration, Instant};

use cryptserver::lifecycle::{DrainOutcome, Phase, ShutdownReason};
use cryptserver::security::{digest, CredentialSet};

mod common;

const PASSWORD_DIGESTS: &[(&str, &str)] = &[
    ("angryMonkey", common::ANGRY_MONKEY_DIGEST),
    (
        "blowfish1234",
        "CG9ZxAdtMgJfBbBjtTmznVrAH/bIKMYG9AOvLx/+P/4kIaCkXzhSi7K6TYfEnHCB/cicK2A6BBfZL6q48V25SA==",
    ),
    (
        "a87&1hkA!l*Q12n6i2&Q",
        "RRBeSqawrv0y1LrVZb13RhHneaHkSvzAvacPttI+j+SQEcri19wr+fD2qOqzcw7C404jaYXSne0sg39/eO7eaA==",
    ),
];

#[tokio::test]
async fn test_digest_valid_passwords() {
    let server = common::start_server(Duration::ZERO).await;
    let client = common::client();

    for &(password, expected) in PASSWORD_DIGESTS {
        let (status, body) = common::post_password(client.clone(), server.url("/"), password)
            .await
            .expect("server unreachable");

        assert_eq!(status, 200, "password {:?}", password);
        assert_eq!(body, format!("{}\n", expected), "password {:?}", password);
    }

    server.shutdown.trigger(ShutdownReason::Interrupt);
    assert_eq!(server.stopped(Duration::from_secs(5)).await, DrainOutcome::Completed);
}

#[tokio::test]
async fn test_digest_empty_password() {
    let server = common::start_server(Duration::ZERO).await;

    let (status, _) = common::post_password(common::client(), server.url("/"), "")
        .await
        .expect("server unreachable");
    assert_eq!(status, 400);

    server.shutdown.trigger(ShutdownReason::Interrupt);
    server.stopped(Duration::from_secs(5)).await;
}

#[tokio::test]
async fn test_unknown_path_not_found() {
    let server = common::start_server(Duration::ZERO).await;

    let (status, _) = common::post_password(common::client(), server.url("/hash"), "angryMonkey")
        .await
        .expect("server unreachable");
    assert_eq!(status, 404);

    server.shutdown.trigger(ShutdownReason::Interrupt);
    server.stopped(Duration::from_secs(5)).await;
}

#[tokio::test]
async fn test_wrong_shutdown_password_keeps_running() {
    let delay = Duration::from_millis(150);
    let server = common::start_server(delay).await;
    let client = common::client();

    let start = Instant::now();
    let (status, _) = common::post_password(client.clone(), server.url("/shutdown"), "bananas")
        .await
        .expect("server unreachable");

    assert_eq!(status, 401);
    assert!(start.elapsed() >= delay, "rejection must be delayed");
    assert_eq!(server.coordinator.phase(), Phase::Running);
    assert!(!server.shutdown.is_triggered());

    // Still serving.
    let (status, _) = common::post_password(client, server.url("/"), "still here")
        .await
        .expect("server stopped after a failed shutdown");
    assert_eq!(status, 200);

    server.shutdown.trigger(ShutdownReason::Interrupt);
    server.stopped(Duration::from_secs(5)).await;
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = common::start_server(Duration::ZERO).await;

    let response = common::client()
        .post(server.url("/"))
        .form(&[("password", "angryMonkey")])
        .send()
        .await
        .expect("server unreachable");
    let request_id = response
        .headers()
        .get(cryptserver::http::X_REQUEST_ID)
        .expect("missing x-request-id")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(request_id.len(), 36);

    server.shutdown.trigger(ShutdownReason::Interrupt);
    server.stopped(Duration::from_secs(5)).await;
}

#[test]
fn test_fixture_credentials() {
    let set = CredentialSet::load(&common::fixture_credentials()).unwrap();

    assert_eq!(set.len(), 3);
    assert!(set.contains(&digest("angryMonkey")));
    assert!(set.contains(
        "e9hKlUdVXmDsA0o+4xs3tmyhvSV1LZ+Yx5DtCKkpX1A9TzZvZiWANcufAQEzJcsKXlpyeSzQ+CoLaLYGJR8uzg=="
    ));
    assert!(!set.contains(
        "XEHhWB65gUlzdVwtDQArEyx+KVLzp/aTaRaPlBzYRIFX6vjFdqEb0Q5B8zVKCZ0vKbZPZklJz0Fd7su2A+gf7X=="
    ));
}
