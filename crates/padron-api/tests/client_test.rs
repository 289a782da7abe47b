#![allow(clippy::unwrap_used)]
// Integration tests for `PersonaClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use padron_api::{Error, Persona, PersonaClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PersonaClient) {
    let server = MockServer::start().await;
    let base = format!("{}/api/persona", server.uri());
    let client = PersonaClient::from_reqwest(&base, reqwest::Client::new()).unwrap();
    (server, client)
}

fn persona_path(suffix: &str) -> String {
    format!("/api/persona/{suffix}")
}

// ── List tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_personas() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": "1", "nombre": "Ana", "direccion": "Calle 7", "telefono": "555-0101" },
        { "id": "2", "nombre": "Bruno", "direccion": "Av. Sur 12", "telefono": "555-0102" }
    ]);

    Mock::given(method("GET"))
        .and(path(persona_path("")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let personas = client.list().await.unwrap();

    assert_eq!(personas.len(), 2);
    assert_eq!(personas[0].id.as_deref(), Some("1"));
    assert_eq!(personas[0].nombre, "Ana");
    assert_eq!(personas[1].telefono, "555-0102");
}

#[tokio::test]
async fn test_list_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(persona_path("")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let personas = client.list().await.unwrap();
    assert!(personas.is_empty());
}

// ── Create / update / delete tests ──────────────────────────────────

#[tokio::test]
async fn test_create_omits_id_and_returns_server_record() {
    let (server, client) = setup().await;

    // The draft has no id, so the request body must not carry one.
    Mock::given(method("POST"))
        .and(path(persona_path("")))
        .and(body_json(json!({
            "nombre": "Ana",
            "direccion": "Calle 7",
            "telefono": "555-0101"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "10",
            "nombre": "Ana",
            "direccion": "Calle 7",
            "telefono": "555-0101"
        })))
        .mount(&server)
        .await;

    let draft = Persona {
        id: None,
        nombre: "Ana".into(),
        direccion: "Calle 7".into(),
        telefono: "555-0101".into(),
    };

    let created = client.create(&draft).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("10"));
}

#[tokio::test]
async fn test_update_persona() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(persona_path("10")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "10",
            "nombre": "Ana María",
            "direccion": "Calle 7",
            "telefono": "555-0101"
        })))
        .mount(&server)
        .await;

    let persona = Persona {
        id: Some("10".into()),
        nombre: "Ana María".into(),
        direccion: "Calle 7".into(),
        telefono: "555-0101".into(),
    };

    let updated = client.update("10", &persona).await.unwrap();
    assert_eq!(updated.nombre, "Ana María");
}

#[tokio::test]
async fn test_delete_persona() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(persona_path("10")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete("10").await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_body_with_message_field() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(persona_path("99")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "no existe" })),
        )
        .mount(&server)
        .await;

    let result = client.delete("99").await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "no existe");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_body_plain_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(persona_path("")))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let result = client.list().await;

    match result {
        Err(err) => {
            assert_eq!(
                err.user_message(),
                "Código de error: 500, mensaje: database down"
            );
        }
        Ok(other) => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_body_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(persona_path("")))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = client.list().await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "Error desconocido");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(persona_path("")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list().await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}
