//! Secret field reads through a freshly logged-in handle.

use async_trait::async_trait;
use serde_json::json;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;
use vault_incluster::{
    CredentialExchanger, Secret, SecretStore, VaultConfig, VaultError, VaultResult, read_field,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PATH: &str = "/v1/auth/kubernetes/login";
const SECRET_PATH: &str = "secret/data/app";

struct Fixture {
    server: MockServer,
    _token: NamedTempFile,
    exchanger: CredentialExchanger,
}

async fn fixture(expected_logins: u64) -> Fixture {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"auth": {"client_token": "tok-123"}})),
        )
        .expect(expected_logins)
        .mount(&server)
        .await;

    let mut token = NamedTempFile::new().unwrap();
    write!(token, "sa-jwt").unwrap();
    let config = VaultConfig::new(server.uri(), "kubernetes", "app")
        .unwrap()
        .with_token_path(token.path());
    let exchanger = CredentialExchanger::new(config).unwrap();

    Fixture {
        server,
        _token: token,
        exchanger,
    }
}

async fn mount_secret(server: &MockServer, status: u16, body: serde_json::Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/{SECRET_PATH}")))
        .and(header("x-vault-token", "tok-123"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn reads_field_with_issued_token() {
    let f = fixture(1).await;
    mount_secret(&f.server, 200, json!({"data": {"password": "p@ss"}}), 1).await;

    let value = f
        .exchanger
        .read_secret_field(SECRET_PATH, "password")
        .await
        .unwrap();

    assert_eq!(value, "p@ss");
}

#[tokio::test]
async fn non_string_values_are_rendered() {
    let f = fixture(2).await;
    mount_secret(
        &f.server,
        200,
        json!({"data": {"port": 5432, "tls": true}}),
        2,
    )
    .await;

    let port = f.exchanger.read_secret_field(SECRET_PATH, "port").await.unwrap();
    let tls = f.exchanger.read_secret_field(SECRET_PATH, "tls").await.unwrap();

    assert_eq!(port, "5432");
    assert_eq!(tls, "true");
}

#[tokio::test]
async fn empty_data_is_not_found() {
    let f = fixture(1).await;
    mount_secret(&f.server, 200, json!({"data": null}), 1).await;

    let err = f
        .exchanger
        .read_secret_field(SECRET_PATH, "password")
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::FieldNotFound { .. }), "{err}");
    let message = err.to_string();
    assert!(message.contains("password"), "{message}");
    assert!(message.contains(SECRET_PATH), "{message}");
}

#[tokio::test]
async fn missing_secret_is_not_found() {
    let f = fixture(1).await;
    mount_secret(&f.server, 404, json!({"errors": []}), 1).await;

    let err = f
        .exchanger
        .read_secret_field(SECRET_PATH, "password")
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::FieldNotFound { .. }), "{err}");
}

#[tokio::test]
async fn any_404_is_not_found() {
    let f = fixture(1).await;
    mount_secret(&f.server, 404, json!({"errors": ["no handler for route"]}), 1).await;

    let err = f
        .exchanger
        .read_secret_field(SECRET_PATH, "password")
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::FieldNotFound { .. }), "{err}");
}

#[tokio::test]
async fn missing_field_is_not_found() {
    let f = fixture(1).await;
    mount_secret(&f.server, 200, json!({"data": {"username": "app"}}), 1).await;

    let err = f
        .exchanger
        .read_secret_field(SECRET_PATH, "password")
        .await
        .unwrap_err();

    match err {
        VaultError::FieldNotFound { field, path } => {
            assert_eq!(field, "password");
            assert_eq!(path, SECRET_PATH);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn read_failure_is_propagated() {
    let f = fixture(1).await;
    mount_secret(&f.server, 403, json!({"errors": ["permission denied"]}), 1).await;

    let err = f
        .exchanger
        .read_secret_field(SECRET_PATH, "password")
        .await
        .unwrap_err();

    assert!(
        matches!(err, VaultError::ReadFailed { status: 403, .. }),
        "{err}"
    );
    assert!(err.to_string().contains("permission denied"));
}

#[tokio::test]
async fn login_failure_skips_the_read() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .mount(&server)
        .await;
    mount_secret(&server, 200, json!({"data": {"password": "p@ss"}}), 0).await;

    let mut token = NamedTempFile::new().unwrap();
    write!(token, "sa-jwt").unwrap();
    let config = VaultConfig::new(server.uri(), "kubernetes", "app")
        .unwrap()
        .with_token_path(token.path());
    let err = CredentialExchanger::new(config)
        .unwrap()
        .read_secret_field(SECRET_PATH, "password")
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::AuthenticationFailed { .. }));
}

#[tokio::test]
async fn every_read_logs_in_again() {
    let f = fixture(3).await;
    mount_secret(&f.server, 200, json!({"data": {"password": "p@ss"}}), 3).await;

    for _ in 0..3 {
        let value = f
            .exchanger
            .read_secret_field(SECRET_PATH, "password")
            .await
            .unwrap();
        assert_eq!(value, "p@ss");
    }
}

/// In-memory store counting how often it is read.
struct StaticStore {
    secret: Option<Secret>,
    reads: AtomicUsize,
}

#[async_trait]
impl SecretStore for StaticStore {
    async fn read(&self, _path: &str) -> VaultResult<Option<Secret>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.secret.clone())
    }
}

#[tokio::test]
async fn read_field_works_over_any_store() {
    let store = StaticStore {
        secret: Some(serde_json::from_value(json!({"data": {"api_key": "k-1"}})).unwrap()),
        reads: AtomicUsize::new(0),
    };

    let value = read_field(&store, "kv/app", "api_key").await.unwrap();
    assert_eq!(value, "k-1");

    let err = read_field(&store, "kv/app", "missing").await.unwrap_err();
    assert!(matches!(err, VaultError::FieldNotFound { .. }));
    assert_eq!(store.reads.load(Ordering::SeqCst), 2);

    let empty = StaticStore {
        secret: None,
        reads: AtomicUsize::new(0),
    };
    let dyn_store: &dyn SecretStore = &empty;
    let err = read_field(dyn_store, "kv/app", "api_key").await.unwrap_err();
    assert!(matches!(err, VaultError::FieldNotFound { .. }));
}
