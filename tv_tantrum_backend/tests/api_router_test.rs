// HTTP 路由集成测试

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use tv_tantrum_backend::api::{create_router, AppState};
use tv_tantrum_backend::config::AppConfig;
use tv_tantrum_backend::database::Database;
use tv_tantrum_backend::services::CatalogService;

async fn setup() -> (TempDir, Router) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("api.db");
    let database = Database::connect(&format!("sqlite:{}?mode=rwc", db_path.display()))
        .await
        .unwrap();

    let config = AppConfig::default();
    let catalog = CatalogService::new(
        Arc::new(database.repository().clone()),
        config.query_cache.clone(),
        config.compare_max_shows,
    );

    let router = create_router(AppState {
        database,
        catalog: Arc::new(catalog),
        config: Arc::new(config),
    });
    (temp_dir, router)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create_show(router: &Router, body: Value) -> String {
    let (status, body) = send(router, json_request("POST", "/api/tv-shows", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (_dir, router) = setup().await;
    let (status, body) = send(&router, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_create_then_browse_with_filters() {
    let (_dir, router) = setup().await;
    create_show(
        &router,
        json!({
            "name": "Blue's Clues",
            "stimulationScore": 1,
            "ageRange": "2-5",
            "themes": ["Problem Solving"],
            "interactivityLevel": "high"
        }),
    )
    .await;
    create_show(&router, json!({"name": "Cocomelon", "stimulationScore": 5, "ageRange": "0-3"})).await;

    let (status, body) = send(&router, get("/api/tv-shows?search=blues%20clues")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    let show = &body["data"]["items"][0];
    assert_eq!(show["name"], "Blue's Clues");
    assert_eq!(show["interactivityLevel"], "High");
    assert_eq!(show["tantrumFactor"], "low");

    let (_, body) = send(&router, get("/api/tv-shows?ageGroup=Toddler&sortBy=stimulation-score")).await;
    let names: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Blue's Clues", "Cocomelon"]);

    let (_, body) = send(&router, get("/api/tv-shows?maxStimulationScore=2&limit=1&page=1")).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["hasMore"], false);
}

#[tokio::test]
async fn test_page_far_beyond_catalog_returns_empty_page() {
    let (_dir, router) = setup().await;
    create_show(&router, json!({"name": "Bluey", "stimulationScore": 2})).await;

    let (status, body) = send(&router, get("/api/tv-shows?page=18446744073709551615&limit=200")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["hasMore"], false);
}

#[tokio::test]
async fn test_invalid_requests_map_to_error_envelope() {
    let (_dir, router) = setup().await;

    let (status, body) = send(&router, get("/api/tv-shows/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["type"], "not_found");

    let (status, body) = send(
        &router,
        json_request("POST", "/api/tv-shows", json!({"name": "Too Loud", "stimulationScore": 7})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["type"], "validation_error");

    let (status, _) = send(&router, get("/api/tv-shows?minStimulationScore=4&maxStimulationScore=2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, get("/api/tv-shows/compare?ids=a,b,c,d,e")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_detail_records_view_and_compare() {
    let (_dir, router) = setup().await;
    let calm = create_show(&router, json!({"name": "Puffin Rock", "stimulationScore": 1})).await;
    let loud = create_show(&router, json!({"name": "Paw Patrol", "stimulationScore": 4})).await;

    let (status, body) = send(&router, get(&format!("/api/tv-shows/{}", calm))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["viewCount"], 1);

    let (status, _) = send(&router, json_request("POST", &format!("/api/tv-shows/{}/search-hit", loud), json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, get(&format!("/api/tv-shows/compare?ids={},{}", loud, calm))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["calmestId"], calm.as_str());
}

#[tokio::test]
async fn test_category_crud_and_shows() {
    let (_dir, router) = setup().await;
    create_show(&router, json!({"name": "Bluey", "stimulationScore": 2, "themes": ["Family"]})).await;
    create_show(&router, json!({"name": "Octonauts", "stimulationScore": 3, "themes": ["Ocean"]})).await;

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/homepage-categories",
            json!({
                "name": "Family Time",
                "displayOrder": 2,
                "filterConfig": {"themes": ["family"], "sortBy": "name"}
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&router, get(&format!("/api/homepage-categories/{}/shows", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Bluey");

    let (status, _) = send(
        &router,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/homepage-categories/{}", id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&router, get("/api/homepage-categories?all=true")).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
