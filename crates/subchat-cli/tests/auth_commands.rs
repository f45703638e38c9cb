use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn session_json() -> serde_json::Value {
    json!({
        "accessToken": "at-1",
        "accessTokenExpiresIn": 900,
        "refreshToken": "rt-1",
        "user": { "id": "u-1", "email": "ada@example.com", "displayName": "ada" }
    })
}

#[tokio::test]
async fn test_login_saves_session_and_whoami_reads_it() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/signin/email-password"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "pw" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "session": session_json() })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();
    let auth_url = format!("{}/v1", server.uri());

    cargo_bin_cmd!("subchat")
        .env("SUBCHAT_HOME", home.path())
        .env("SUBCHAT_AUTH_URL", &auth_url)
        .env("SUBCHAT_PASSWORD", "pw")
        .args(["login", "--email", " ada@example.com "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as ada"));

    let stored = std::fs::read_to_string(home.path().join("session.json")).unwrap();
    assert!(stored.contains("at-1"));

    cargo_bin_cmd!("subchat")
        .env("SUBCHAT_HOME", home.path())
        .env("SUBCHAT_AUTH_URL", &auth_url)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("ada"))
        .stdout(predicate::str::contains("Email: ada@example.com"))
        .stdout(predicate::str::contains("at-1").not());
}

#[tokio::test]
async fn test_login_surfaces_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/signin/email-password"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": 401,
            "message": "Incorrect email or password",
            "error": "invalid-email-password"
        })))
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("subchat")
        .env("SUBCHAT_HOME", home.path())
        .env("SUBCHAT_AUTH_URL", format!("{}/v1", server.uri()))
        .args(["login", "--email", "ada@example.com", "--password", "bad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect email or password"));

    assert!(!home.path().join("session.json").exists());
}

#[tokio::test]
async fn test_signup_pending_verification() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/signup/email-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "session": null })))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("subchat")
        .env("SUBCHAT_HOME", home.path())
        .env("SUBCHAT_AUTH_URL", format!("{}/v1", server.uri()))
        .args(["signup", "--email", "grace@example.com", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("verify"));

    assert!(!home.path().join("session.json").exists());
}

#[tokio::test]
async fn test_logout_revokes_and_clears_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/signout"))
        .and(body_json(json!({ "refreshToken": "refresh" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();
    let session = json!({
        "access_token": "tok",
        "refresh_token": "refresh",
        "expires_at": chrono::Utc::now() + chrono::Duration::hours(1),
        "user": { "id": "u-1", "email": "ada@example.com", "display_name": "ada" }
    });
    std::fs::write(home.path().join("session.json"), session.to_string()).unwrap();

    cargo_bin_cmd!("subchat")
        .env("SUBCHAT_HOME", home.path())
        .env("SUBCHAT_AUTH_URL", format!("{}/v1", server.uri()))
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."));

    assert!(!home.path().join("session.json").exists());
}

#[test]
fn test_logout_clears_session_when_server_unreachable() {
    let home = tempdir().unwrap();
    let session = json!({
        "access_token": "tok",
        "refresh_token": "refresh",
        "expires_at": chrono::Utc::now() + chrono::Duration::hours(1),
        "user": { "id": "u-1", "email": null, "display_name": "" }
    });
    std::fs::write(home.path().join("session.json"), session.to_string()).unwrap();

    cargo_bin_cmd!("subchat")
        .env("SUBCHAT_HOME", home.path())
        .env("SUBCHAT_AUTH_URL", "http://127.0.0.1:9/v1")
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."))
        .stderr(predicate::str::contains("server sign-out failed"));

    assert!(!home.path().join("session.json").exists());
}

#[test]
fn test_whoami_without_session() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("subchat")
        .env("SUBCHAT_HOME", home.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
}
