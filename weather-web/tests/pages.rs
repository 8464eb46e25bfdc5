//! End-to-end tests for the HTTP surface against a mock OpenWeather server.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, Response, StatusCode, header},
};
use tower::ServiceExt;
use weather_core::{CityStore, CityTracker, OpenWeatherProvider};
use weather_web::{AppState, router};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 2023-11-14 14:00:00 UTC
const TWO_PM_UTC: i64 = 1_699_970_400;

struct TestApp {
    app: Router,
    store: Arc<CityStore>,
    _server: MockServer,
}

/// Mock server that knows London only; every other name geocodes to nothing.
async fn mock_openweather() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "London", "lat": 51.5, "lon": -0.12, "country": "GB" }
        ])))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .with_priority(10)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "dt": TWO_PM_UTC,
            "name": "London",
            "main": { "temp": 15.2 },
            "weather": [{ "description": "clear sky" }]
        })))
        .mount(&server)
        .await;

    server
}

async fn test_app_with(server: MockServer) -> TestApp {
    let provider =
        OpenWeatherProvider::with_options("TEST_KEY".into(), &server.uri(), Duration::from_secs(5))
            .unwrap();
    let store = Arc::new(CityStore::in_memory().unwrap());
    let tracker = CityTracker::new(store.clone(), Arc::new(provider));
    let state = AppState::new(tracker).unwrap();

    TestApp {
        app: router(state),
        store,
        _server: server,
    }
}

async fn test_app() -> TestApp {
    test_app_with(mock_openweather().await).await
}

async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn empty_list_renders_form() {
    let t = test_app().await;

    let response = get(&t.app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("name=\"city_name\""));
    assert!(!html.contains("class=\"card"));
}

#[tokio::test]
async fn adding_london_stores_it_and_renders_weather() {
    let t = test_app().await;

    let response = post_form(&t.app, "/", "city_name=London").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cities = t.store.list_all().unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].name, "London");

    let html = body_text(response).await;
    assert!(html.contains("15.2"));
    assert!(html.contains("clear sky"));
    assert!(html.contains("card day"));
    assert!(html.contains(&format!("action=\"/delete/{}\"", cities[0].id)));
    assert!(!html.contains("class=\"notice\""));

    // A plain reload shows the same list.
    let html = body_text(get(&t.app, "/").await).await;
    assert!(html.contains("clear sky"));
}

#[tokio::test]
async fn adding_twice_keeps_one_row_and_shows_notice() {
    let t = test_app().await;

    post_form(&t.app, "/", "city_name=London").await;
    let response = post_form(&t.app, "/", "city_name=London").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("The city has already been added to the list!"));
    assert_eq!(t.store.list_all().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_city_shows_notice_and_stores_nothing() {
    let t = test_app().await;

    let response = post_form(&t.app, "/", "city_name=Atlantis").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("The city doesn&#x27;t exist!"));
    assert!(t.store.list_all().unwrap().is_empty());
}

#[tokio::test]
async fn blank_submission_shows_notice() {
    let t = test_app().await;

    let html = body_text(post_form(&t.app, "/", "city_name=+++").await).await;

    assert!(html.contains("Please enter a city name."));
    assert!(t.store.list_all().unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_city_and_redirects_home() {
    let t = test_app().await;
    post_form(&t.app, "/", "city_name=London").await;
    let id = t.store.list_all().unwrap()[0].id;

    let response = post_form(&t.app, &format!("/delete/{id}"), "").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(t.store.list_all().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_unknown_id_is_a_noop() {
    let t = test_app().await;
    post_form(&t.app, "/", "city_name=London").await;

    let response = post_form(&t.app, "/delete/4242", "").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(t.store.list_all().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_requires_integer_id() {
    let t = test_app().await;

    let response = post_form(&t.app, "/delete/london", "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn provider_outage_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let t = test_app_with(server).await;
    t.store.insert("London").unwrap();

    let response = get(&t.app, "/").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("The weather service is unavailable right now."));
}
