use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ID_OLD: &str = "11111111-1111-4111-8111-111111111111";
const ID_NEW: &str = "22222222-2222-4222-8222-222222222222";

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Home directory holding a session that stays valid for an hour.
fn signed_in_home() -> TempDir {
    let dir = tempdir().unwrap();
    let expires_at = chrono::Utc::now() + chrono::Duration::hours(1);
    let session = json!({
        "access_token": "tok",
        "refresh_token": "refresh",
        "expires_at": expires_at,
        "user": { "id": "u-1", "email": "ada@example.com", "display_name": "ada" }
    });
    std::fs::write(dir.path().join("session.json"), session.to_string()).unwrap();
    dir
}

fn subchat(home: &Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("subchat");
    cmd.env("SUBCHAT_HOME", home)
        .env("SUBCHAT_GRAPHQL_URL", format!("{}/v1/graphql", server.uri()))
        .env("SUBCHAT_AUTH_URL", format!("{}/v1/auth", server.uri()));
    cmd
}

async fn respond(server: &MockServer, operation: &str, data: Value) {
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .and(body_partial_json(json!({ "operationName": operation })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(server)
        .await;
}

async fn respond_with_chats(server: &MockServer) {
    respond(
        server,
        "GetChats",
        json!({ "chats": [
            { "id": ID_NEW, "title": "Trip planning", "created_at": "2024-02-01T12:00:00Z" },
            { "id": ID_OLD, "title": "Rust questions", "created_at": "2024-01-01T12:00:00Z" }
        ]}),
    )
    .await;
}

#[tokio::test]
async fn test_list_prints_chats_newest_first() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer tok"))
        .and(body_partial_json(json!({ "operationName": "GetChats" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "chats": [
            { "id": ID_NEW, "title": "Trip planning", "created_at": "2024-02-01T12:00:00Z" },
            { "id": ID_OLD, "title": "Rust questions", "created_at": "2024-01-01T12:00:00Z" }
        ]}})))
        .expect(1)
        .mount(&server)
        .await;
    let home = signed_in_home();

    let output = subchat(home.path(), &server)
        .args(["chats", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let newer = stdout.find("Trip planning").unwrap();
    let older = stdout.find("Rust questions").unwrap();
    assert!(newer < older);
    assert!(stdout.contains("22222222"));
}

#[tokio::test]
async fn test_list_without_session_fails() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let home = tempdir().unwrap();

    subchat(home.path(), &server)
        .args(["chats", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[tokio::test]
async fn test_create_uses_given_title() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "CreateChat",
            "variables": { "title": "Ideas" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "data": { "insert_chats_one": { "id": ID_NEW } } }),
        ))
        .expect(1)
        .mount(&server)
        .await;
    let home = signed_in_home();

    subchat(home.path(), &server)
        .args(["chats", "create", "--title", "  Ideas  "])
        .assert()
        .success()
        .stdout(predicate::str::contains("New chat created!"))
        .stdout(predicate::str::contains(ID_NEW));
}

#[tokio::test]
async fn test_rename_rejects_blank_title_without_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let home = signed_in_home();

    subchat(home.path(), &server)
        .args(["chats", "rename", ID_OLD, "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title cannot be empty"));
}

#[tokio::test]
async fn test_rename_by_prefix() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    respond_with_chats(&server).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "UpdateChatTitle",
            "variables": { "id": ID_OLD, "title": "Borrow checker" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {
            "update_chats_by_pk": {
                "id": ID_OLD, "title": "Borrow checker", "created_at": "2024-01-01T12:00:00Z"
            }
        }})))
        .expect(1)
        .mount(&server)
        .await;
    let home = signed_in_home();

    subchat(home.path(), &server)
        .args(["chats", "rename", "1111", "Borrow checker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Borrow checker"));
}

#[tokio::test]
async fn test_rename_sends_title_as_given() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "UpdateChatTitle",
            "variables": { "id": ID_NEW, "title": " Road trip " }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {
            "update_chats_by_pk": {
                "id": ID_NEW, "title": " Road trip ", "created_at": "2024-02-01T12:00:00Z"
            }
        }})))
        .expect(1)
        .mount(&server)
        .await;
    let home = signed_in_home();

    subchat(home.path(), &server)
        .args(["chats", "rename", ID_NEW, " Road trip "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Road trip"));
}

#[tokio::test]
async fn test_delete_with_yes_skips_prompt() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    respond_with_chats(&server).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "DeleteChat",
            "variables": { "id": ID_NEW }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "data": { "delete_chats_by_pk": { "id": ID_NEW } } }),
        ))
        .expect(1)
        .mount(&server)
        .await;
    let home = signed_in_home();

    subchat(home.path(), &server)
        .args(["chats", "delete", "2222", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chat deleted!"));
}

#[tokio::test]
async fn test_delete_declined_sends_nothing() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    respond_with_chats(&server).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "DeleteChat" })))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let home = signed_in_home();

    subchat(home.path(), &server)
        .args(["chats", "delete", "2222"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."))
        .stderr(predicate::str::contains("Trip planning"));
}

#[tokio::test]
async fn test_delete_ambiguous_prefix_fails() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    respond(
        &server,
        "GetChats",
        json!({ "chats": [
            {
                "id": "aaaa1111-1111-4111-8111-111111111111",
                "title": "A",
                "created_at": "2024-02-01T12:00:00Z"
            },
            {
                "id": "aaaa2222-2222-4222-8222-222222222222",
                "title": "B",
                "created_at": "2024-01-01T12:00:00Z"
            }
        ]}),
    )
    .await;
    let home = signed_in_home();

    subchat(home.path(), &server)
        .args(["chats", "delete", "aaaa", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous"));
}

#[tokio::test]
async fn test_messages_prints_transcript() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    respond(
        &server,
        "GetMessages",
        json!({ "messages": [
            {
                "id": "33333333-3333-4333-8333-333333333333",
                "content": "How do lifetimes work?",
                "role": "user",
                "created_at": "2024-01-01T12:00:00Z"
            },
            {
                "id": "44444444-4444-4444-8444-444444444444",
                "content": "They describe how long references stay valid.",
                "role": "assistant",
                "created_at": "2024-01-01T12:00:05Z"
            }
        ]}),
    )
    .await;
    let home = signed_in_home();

    subchat(home.path(), &server)
        .args(["chats", "messages", ID_OLD])
        .assert()
        .success()
        .stdout(predicate::str::contains("You: How do lifetimes work?"))
        .stdout(predicate::str::contains("Assistant: They describe"));
}

#[test]
fn test_create_reports_unreachable_backend() {
    let home = signed_in_home();

    cargo_bin_cmd!("subchat")
        .env("SUBCHAT_HOME", home.path())
        .env("SUBCHAT_GRAPHQL_URL", "http://127.0.0.1:9/v1/graphql")
        .args(["chats", "create"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("create chat"));
}
