//! Client behaviour against a local fixture server

use astroform_api::{ApiClient, ApiConfig, DeploymentUpdateRequest, WorkspaceRequest};
use astroform_cloud::{
    CancellationToken, CloudError, ConvergencePolicy, Operation, ResourceApi, ResourceKind,
    wait_for_terminal,
};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

const TOKEN: &str = "test-token";

#[derive(Default)]
struct Fixture {
    deployment_reads: AtomicU32,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "invalid token", "requestId": "req-401", "statusCode": 401})),
    )
        .into_response()
}

async fn get_cluster(headers: HeaderMap, Path((org, id)): Path<(String, String)>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    match id.as_str() {
        "clu-1" => Json(json!({
            "id": "clu-1",
            "organizationId": org,
            "name": "prod",
            "cloudProvider": "GCP",
            "status": "CREATED",
            "type": "DEDICATED",
            "tags": null
        }))
        .into_response(),
        "clu-garbled" => (
            StatusCode::OK,
            [("content-type", "application/json")],
            r#"{"id": "clu-garbled", "status": "#,
        )
            .into_response(),
        "clu-embedded" => Json(json!({
            "message": "cluster is locked",
            "requestId": "req-9",
            "statusCode": "409"
        }))
        .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Cluster not found", "requestId": "req-404", "statusCode": 404})),
        )
            .into_response(),
    }
}

async fn create_cluster(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"name": "prod", "status": "CREATING"})).into_response()
}

async fn get_deployment(
    State(fixture): State<Arc<Fixture>>,
    Path((_org, id)): Path<(String, String)>,
) -> Response {
    let reads = fixture.deployment_reads.fetch_add(1, Ordering::SeqCst) + 1;
    let status = if reads >= 3 { "HEALTHY" } else { "DEPLOYING" };
    Json(json!({"id": id, "status": status, "type": "STANDARD"})).into_response()
}

async fn update_deployment(
    Path((_org, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    Json(json!({
        "id": id,
        "name": body["name"],
        "description": body["description"],
        "status": "DEPLOYING"
    }))
    .into_response()
}

async fn delete_deployment(Path((_org, id)): Path<(String, String)>) -> StatusCode {
    if id == "dep-gone" {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn delete_workspace() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"message": "not allowed", "requestId": "req-403", "statusCode": 403})),
    )
        .into_response()
}

async fn create_workspace(Path(org): Path<String>, Json(body): Json<Value>) -> Response {
    Json(json!({
        "id": "ws-1",
        "organizationId": org,
        "name": body["name"],
        "description": body["description"],
        "cicdEnforcedDefault": body["cicdEnforcedDefault"]
    }))
    .into_response()
}

async fn list_organizations() -> Response {
    Json(json!({
        "organizations": [
            {"id": "org-1", "name": "Acme", "managedDomains": [
                {"id": "dom-1", "name": "acme.io", "status": "VERIFIED", "enforcedLogins": ["sso"]}
            ]},
            {"id": "org-2", "name": "Other", "managedDomains": null}
        ],
        "totalCount": 2,
        "limit": 20,
        "offset": 0
    }))
    .into_response()
}

async fn get_organization(Path(id): Path<String>) -> Response {
    Json(json!({"id": id, "name": "Acme", "billingEmail": "billing@acme.io", "isScimEnabled": true}))
        .into_response()
}

async fn spawn_fixture() -> (ApiClient, Arc<Fixture>) {
    let (base_url, fixture) = spawn_fixture_server().await;
    (client_for(&base_url, TOKEN), fixture)
}

async fn spawn_fixture_server() -> (String, Arc<Fixture>) {
    let fixture = Arc::new(Fixture::default());
    let app = Router::new()
        .route("/organizations", get(list_organizations))
        .route("/organizations/{org}", get(get_organization))
        .route(
            "/organizations/{org}/clusters",
            axum::routing::post(create_cluster),
        )
        .route("/organizations/{org}/clusters/{id}", get(get_cluster))
        .route(
            "/organizations/{org}/deployments/{id}",
            get(get_deployment)
                .post(update_deployment)
                .delete(delete_deployment),
        )
        .route(
            "/organizations/{org}/workspaces",
            axum::routing::post(create_workspace),
        )
        .route(
            "/organizations/{org}/workspaces/{id}",
            axum::routing::delete(delete_workspace),
        )
        .with_state(fixture.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/organizations", addr), fixture)
}

fn client_for(base_url: &str, token: &str) -> ApiClient {
    ApiClient::new(
        ApiConfig::new(token, "org-1")
            .with_base_url(base_url)
            .with_request_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

/// Accepts connections and closes them before answering
async fn spawn_hangup_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => drop(socket),
                Err(_) => break,
            }
        }
    });
    format!("http://{}/organizations", addr)
}

#[tokio::test]
async fn test_get_cluster_decodes() {
    let (client, _) = spawn_fixture().await;

    let cluster = client.clusters().get("clu-1").await.unwrap();
    assert_eq!(cluster.id, "clu-1");
    assert_eq!(cluster.organization_id, "org-1");
    assert_eq!(cluster.status, "CREATED");
    assert!(cluster.tags.is_empty());
}

#[tokio::test]
async fn test_wrong_token_is_api_error() {
    let (base_url, _) = spawn_fixture_server().await;

    let err = client_for(&base_url, "wrong")
        .clusters()
        .get("clu-1")
        .await
        .unwrap_err();
    match err {
        CloudError::Api {
            status, request_id, ..
        } => {
            assert_eq!(status, 401);
            assert_eq!(request_id.as_deref(), Some("req-401"));
        }
        other => panic!("Expected Api, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_classes_are_distinct() {
    let (client, _) = spawn_fixture().await;
    let clusters = client.clusters();

    let garbled = clusters.get("clu-garbled").await.unwrap_err();
    assert!(
        matches!(garbled, CloudError::Decode { .. }),
        "got {:?}",
        garbled
    );

    let missing = clusters.get("clu-404").await.unwrap_err();
    assert!(matches!(missing, CloudError::Api { status: 404, .. }));
    assert!(missing.is_not_found());

    let embedded = clusters.get("clu-embedded").await.unwrap_err();
    match embedded {
        CloudError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 409);
            assert_eq!(message, "cluster is locked");
        }
        other => panic!("Expected Api, got {:?}", other),
    }

    let hangup = client_for(&spawn_hangup_server().await, TOKEN);
    let dropped = hangup.clusters().get("clu-1").await.unwrap_err();
    match &dropped {
        CloudError::Transport { context, .. } => {
            assert_eq!(context.operation, Operation::Read);
            assert_eq!(context.kind, ResourceKind::Cluster);
            assert_eq!(context.id.as_deref(), Some("clu-1"));
        }
        other => panic!("Expected Transport, got {:?}", other),
    }
    assert!(!dropped.is_not_found());
}

#[tokio::test]
async fn test_create_without_id_is_decode_error() {
    let (client, _) = spawn_fixture().await;
    let request = astroform_api::ClusterCreateRequest {
        name: "prod".to_string(),
        ..Default::default()
    };

    let err = client.clusters().create(&request).await.unwrap_err();
    assert!(matches!(err, CloudError::Decode { .. }));
}

#[tokio::test]
async fn test_create_workspace_posts_to_collection() {
    let (client, _) = spawn_fixture().await;
    let request = WorkspaceRequest {
        cicd_enforced_default: true,
        description: "team space".to_string(),
        name: "analytics".to_string(),
    };

    let workspace = client.workspaces().create(&request).await.unwrap();
    assert_eq!(workspace.id, "ws-1");
    assert_eq!(workspace.organization_id, "org-1");
    assert_eq!(workspace.name, "analytics");
    assert!(workspace.cicd_enforced_default);
}

#[tokio::test]
async fn test_update_with_empty_id_sends_nothing() {
    let hangup = client_for(&spawn_hangup_server().await, TOKEN);
    let err = hangup
        .deployments()
        .update("", &DeploymentUpdateRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CloudError::Validation(_)));
}

#[tokio::test]
async fn test_update_then_converge() {
    let (client, fixture) = spawn_fixture().await;
    let deployments = client.deployments();
    let request = DeploymentUpdateRequest {
        name: "etl".to_string(),
        description: "nightly".to_string(),
        ..Default::default()
    };

    let updated = deployments.update("dep-1", &request).await.unwrap();
    assert_eq!(updated.status, "DEPLOYING");
    assert_eq!(updated.description, "nightly");

    let policy = ConvergencePolicy::for_kind(ResourceKind::Deployment)
        .with_interval(Duration::from_millis(10));
    let healthy = wait_for_terminal(&deployments, updated, &policy, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(healthy.status, "HEALTHY");
    assert_eq!(fixture.deployment_reads.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_delete_treats_missing_as_gone() {
    let (client, _) = spawn_fixture().await;

    client.deployments().delete("dep-1").await.unwrap();
    client.deployments().delete("dep-gone").await.unwrap();

    let err = client.workspaces().delete("ws-1").await.unwrap_err();
    assert!(matches!(err, CloudError::Api { status: 403, .. }));
}

#[tokio::test]
async fn test_organizations() {
    let (client, _) = spawn_fixture().await;
    let organizations = client.organizations();

    let all = organizations.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].managed_domains[0].enforced_logins, vec!["sso"]);
    assert!(all[1].managed_domains.is_empty());

    let one = organizations.get("org-1").await.unwrap();
    assert_eq!(one.billing_email, "billing@acme.io");
    assert!(one.is_scim_enabled);
}
