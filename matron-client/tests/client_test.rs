//! Integration tests: the real client against an in-process mock OpenMRS
//! server started on a random port.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{delete, get, post};
use axum::Router;
use matron_client::{ApiError, BedTypePayload, RestClient};
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Clone)]
struct MockState {
    base: String,
}

async fn list_beds() -> Json<Value> {
    Json(json!({
        "results": [
            {"uuid": "b-1", "bedNumber": "BED-100", "status": "AVAILABLE",
             "bedType": {"uuid": "t-1", "name": "standard", "displayName": "Standard"}},
            {"uuid": "b-2", "bedNumber": "BED-101", "status": "OCCUPIED"}
        ]
    }))
}

async fn reject_bed_type() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": {"message": "Network error"}})),
    )
}

async fn queue_entries(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    // Two pages of one entry each, linked by an absolute `next` URI.
    match params.get("startIndex").map(String::as_str) {
        None | Some("0") => Json(json!({
            "results": [{"uuid": "q-1"}],
            "links": [{"rel": "next",
                       "uri": format!("{}/ws/rest/v1/queue-entry?startIndex=1", state.base)}],
            "totalCount": 2
        })),
        _ => Json(json!({
            "results": [{"uuid": "q-2"}],
            "links": []
        })),
    }
}

async fn delete_tag_map(Path(uuid): Path<String>) -> StatusCode {
    assert_eq!(uuid, "map-1");
    StatusCode::OK
}

async fn patient_search(body: String) -> Json<Value> {
    assert!(body.contains("name=Jane"));
    Json(json!({
        "resourceType": "Bundle",
        "type": "searchset",
        "total": 1,
        "entry": [{"resource": {"id": "p-9",
                                "name": [{"given": ["Jane"], "family": "Doe"}],
                                "gender": "female"}}]
    }))
}

/// Start the mock server, returning a client pointed at it.
async fn start_mock() -> RestClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base = format!("http://{}", addr);

    let state = MockState { base: base.clone() };
    let app = Router::new()
        .route("/ws/rest/v1/bed", get(list_beds))
        .route("/ws/rest/v1/bedtype", post(reject_bed_type))
        .route("/ws/rest/v1/queue-entry", get(queue_entries))
        .route("/ws/rest/v1/bedTagMap/{uuid}", delete(delete_tag_map))
        .route("/ws/fhir2/R4/Patient/_search", post(patient_search))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    RestClient::new(
        format!("{base}/ws/rest/v1"),
        format!("{base}/ws/fhir2/R4"),
    )
    .unwrap()
    .with_basic_auth("admin", "Admin123")
}

#[tokio::test]
async fn test_list_beds() {
    let client = start_mock().await;

    let beds = client.list_beds(None).await.unwrap();
    assert_eq!(beds.len(), 2);
    assert_eq!(beds[0].bed_number.as_deref(), Some("BED-100"));
    // Sparse second record decodes with the nested type missing.
    assert!(beds[1].bed_type.is_none());
}

#[tokio::test]
async fn test_server_error_message_is_extracted() {
    let client = start_mock().await;

    let payload = BedTypePayload {
        name: "standard".to_string(),
        display_name: "Standard".to_string(),
        description: String::new(),
    };
    let err = client.create_bed_type(&payload).await.unwrap_err();

    match err {
        ApiError::Server { status, ref message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Network error");
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert_eq!(err.user_message(), "Network error");
}

#[tokio::test]
async fn test_queue_entries_follow_next_links() {
    let client = start_mock().await;

    let (entries, total) = client.list_queue_entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].uuid.as_deref(), Some("q-1"));
    assert_eq!(entries[1].uuid.as_deref(), Some("q-2"));
    // The backend totalCount is authoritative.
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_delete_bed_requires_reason() {
    let client = start_mock().await;

    let err = client.delete_bed("b-1", "  ").await.unwrap_err();
    assert!(matches!(err, ApiError::Core(_)));
    assert!(err.to_string().contains("reason"));
}

#[tokio::test]
async fn test_delete_bed_tag_map() {
    let client = start_mock().await;
    client.delete_bed_tag_map("map-1").await.unwrap();
}

#[tokio::test]
async fn test_fhir_patient_search() {
    let client = start_mock().await;

    let patients = client.search_patients("Jane").await.unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].id.as_deref(), Some("p-9"));
}

#[tokio::test]
async fn test_transport_error_user_message_is_generic() {
    // No server listening on this port.
    let client = RestClient::new("http://127.0.0.1:1/ws/rest/v1", "http://127.0.0.1:1/fhir")
        .unwrap();
    let err = client.list_beds(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.user_message(), "Unable to connect to the server");
}
