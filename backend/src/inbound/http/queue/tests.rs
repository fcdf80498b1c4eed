//! Tests for the queue API handlers.

use std::sync::Arc;

use super::*;
use crate::Trace;
use crate::domain::LineService;
use crate::domain::TRACE_ID_HEADER;
use crate::domain::ports::{FixtureLineQuery, FixtureUserRegistration, MockLineCommand};
use crate::inbound::http::validation::json_config;
use crate::test_support::memory::{InMemoryDirectoryRepository, InMemoryLineRepository};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

fn memory_state() -> HttpState {
    HttpState::from_service(Arc::new(LineService::new(
        Arc::new(InMemoryDirectoryRepository::default()),
        Arc::new(InMemoryLineRepository::default()),
    )))
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .configure(configure)
}

async fn post(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, String) {
    let request = actix_test::TestRequest::post().uri(uri);
    let request = match body {
        Some(body) => request.set_json(body),
        None => request,
    };
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (
        status,
        String::from_utf8(body.to_vec()).expect("utf8 body"),
    )
}

fn json_body(raw: &str) -> Value {
    serde_json::from_str(raw).expect("JSON body")
}

#[actix_web::test]
async fn create_user_returns_the_record_with_an_id() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (status, body) = post(
        &app,
        "/createUser",
        Some(json!({"name": "Ana", "email": "ana@x.com", "gender": "F"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let user = json_body(&body);
    assert_eq!(user["name"], "Ana");
    assert_eq!(user["email"], "ana@x.com");
    assert_eq!(user["gender"], "F");
    assert!(user["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[rstest]
#[case(json!({"email": "ana@x.com", "gender": "F"}), "invalid_request", "name is required")]
#[case(json!({"name": "Ana", "gender": "F"}), "invalid_request", "email is required")]
#[case(json!({"name": "Ana", "email": "ana@x.com"}), "invalid_request", "gender is required")]
#[case(json!({"name": "Ana", "email": "ana@d&d", "gender": "F"}), "invalid_email", "Invalid Email")]
#[actix_web::test]
async fn create_user_rejects_bad_input(
    #[case] payload: Value,
    #[case] code: &str,
    #[case] message: &str,
) {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (status, body) = post(&app, "/createUser", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = json_body(&body);
    assert_eq!(error["code"], code);
    assert_eq!(error["message"], message);
    assert!(error["traceId"].as_str().is_some());
}

#[actix_web::test]
async fn duplicate_registration_is_rejected() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let payload = json!({"name": "Ana", "email": "ana@x.com", "gender": "F"});

    post(&app, "/createUser", Some(payload.clone())).await;
    let (status, body) = post(&app, "/createUser", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["message"], "User already exists");
}

#[actix_web::test]
async fn positions_are_plain_text() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let (_, ana) = post(
        &app,
        "/createUser",
        Some(json!({"name": "Ana", "email": "ana@x.com", "gender": "F"})),
    )
    .await;
    let id = json_body(&ana)["id"].clone();

    let request = actix_test::TestRequest::post()
        .uri("/addToLine")
        .set_json(json!({ "id": id }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let content_type = response
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert!(content_type.is_some_and(|value| value.starts_with("text/plain")));
    let body = actix_test::read_body(response).await;
    assert_eq!(&body[..], b"1");
}

#[actix_web::test]
async fn unknown_ids_are_not_found() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (status, body) = post(&app, "/addToLine", Some(json!({"id": "d&d"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["message"], "User not found");
}

#[rstest]
#[case("/addToLine", json!({}), "id is required")]
#[case("/findPosition", json!({}), "email is required")]
#[case("/findPosition", json!({"email": "bad"}), "Invalid Email")]
#[case("/filterLine", json!({}), "gender is required")]
#[actix_web::test]
async fn missing_or_invalid_fields_are_rejected(
    #[case] uri: &str,
    #[case] payload: Value,
    #[case] message: &str,
) {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (status, body) = post(&app, uri, Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["message"], message);
}

#[rstest]
#[case("/showLine", None)]
#[case("/popLine", None)]
#[case("/filterLine", Some(json!({"gender": "M"})))]
#[actix_web::test]
async fn empty_line_is_reported(#[case] uri: &str, #[case] payload: Option<Value>) {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (status, body) = post(&app, uri, payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = json_body(&body);
    assert_eq!(error["code"], "empty_line");
    assert_eq!(error["message"], "Line is empty");
}

#[actix_web::test]
async fn ana_and_bo_scenario() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let mut ids = Vec::new();
    for (name, email, gender) in [("Ana", "ana@x.com", "F"), ("Bo", "bo@x.com", "M")] {
        let (status, body) = post(
            &app,
            "/createUser",
            Some(json!({"name": name, "email": email, "gender": gender})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(json_body(&body)["id"].clone());
    }

    let (_, first) = post(&app, "/addToLine", Some(json!({"id": ids[0]}))).await;
    let (_, second) = post(&app, "/addToLine", Some(json!({"id": ids[1]}))).await;
    assert_eq!((first.as_str(), second.as_str()), ("1", "2"));

    let (_, position) = post(&app, "/findPosition", Some(json!({"email": "bo@x.com"}))).await;
    assert_eq!(position, "2");

    let (status, filtered) = post(&app, "/filterLine", Some(json!({"gender": "M"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        json_body(&filtered),
        json!([{"name": "Bo", "email": "bo@x.com", "gender": "M", "position": 2}])
    );

    let (status, popped) = post(&app, "/popLine", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let popped = json_body(&popped);
    assert_eq!(popped["name"], "Ana");
    assert_eq!(popped["id"], ids[0]);

    let (_, remaining) = post(&app, "/showLine", None).await;
    assert_eq!(
        json_body(&remaining),
        json!([{"name": "Bo", "email": "bo@x.com", "gender": "M", "position": 1}])
    );
}

#[actix_web::test]
async fn malformed_json_is_an_invalid_request() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/createUser")
        .insert_header((actix_web::http::header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"name\":")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(error["details"]["code"], "malformed_body");
}

#[actix_web::test]
async fn unavailable_store_is_503_and_internal_is_redacted() {
    let mut line = MockLineCommand::new();
    line.expect_pop_front()
        .times(1)
        .return_once(|| Err(Error::service_unavailable("line store unavailable")));
    line.expect_admit()
        .times(1)
        .return_once(|_| Err(Error::internal("rename failed: /srv/data/line.json")));
    let state = HttpState::new(
        Arc::new(FixtureUserRegistration),
        Arc::new(line),
        Arc::new(FixtureLineQuery),
    );
    let app = actix_test::init_service(test_app(state)).await;

    let (pop_status, _) = post(&app, "/popLine", None).await;
    let (admit_status, body) = post(&app, "/addToLine", Some(json!({"id": "a"}))).await;

    assert_eq!(pop_status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(admit_status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body)["message"], "Internal server error");
}
