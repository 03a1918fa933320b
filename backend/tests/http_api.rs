//! Wire-level tests for the tracker's REST surface.
//!
//! These drive the full handler stack (trace middleware, routing, error
//! envelope) against in-memory stores; no database is required.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use tracker_backend::Trace;
use tracker_backend::domain::ports::{StoreError, TrackerStore};
use tracker_backend::domain::{
    Exercise, LedgerService, LogWindow, RegistryService, User, UserId,
};
use tracker_backend::inbound::http::exercises::{create_exercise, get_logs};
use tracker_backend::inbound::http::query::QueryPolicy;
use tracker_backend::inbound::http::state::HttpState;
use tracker_backend::inbound::http::users::{create_user, list_users};
use tracker_backend::test_support::{InMemoryTrackerStore, http_state};

fn app_with(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api")
                .service(list_users)
                .service(create_user)
                .service(create_exercise)
                .service(get_logs),
        )
}

async fn post_json(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
    body: Value,
) -> ServiceResponse {
    test::call_service(
        app,
        test::TestRequest::post().uri(uri).set_json(body).to_request(),
    )
    .await
}

async fn get(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
) -> ServiceResponse {
    test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await
}

#[actix_web::test]
async fn register_append_and_read_back_a_log() {
    let store = Arc::new(InMemoryTrackerStore::new());
    let app =
        test::init_service(app_with(http_state(Arc::clone(&store), QueryPolicy::Lenient))).await;

    let created = post_json(&app, "/api/users", json!({ "username": "ada" })).await;
    assert_eq!(created.status(), StatusCode::OK);
    assert!(created.headers().contains_key("trace-id"));
    let created: Value = test::read_body_json(created).await;
    let id = created
        .get("_id")
        .and_then(Value::as_str)
        .expect("_id present")
        .to_owned();

    let appended = post_json(
        &app,
        &format!("/api/users/{id}/exercises"),
        json!({ "description": "swim", "duration": "30", "date": "2023-05-10" }),
    )
    .await;
    assert_eq!(appended.status(), StatusCode::OK);
    let appended: Value = test::read_body_json(appended).await;
    assert_eq!(appended.get("date"), Some(&json!("Wed May 10 2023")));
    assert_eq!(appended.get("duration"), Some(&json!(30.0)));

    let logs = get(&app, &format!("/api/users/{id}/logs")).await;
    assert_eq!(logs.status(), StatusCode::OK);
    let logs: Value = test::read_body_json(logs).await;
    assert_eq!(
        logs,
        json!({
            "_id": id,
            "username": "ada",
            "count": 1,
            "log": [
                { "description": "swim", "duration": 30.0, "date": "Wed May 10 2023" }
            ]
        })
    );
}

#[actix_web::test]
async fn duplicate_registration_keeps_a_single_listing_entry() {
    let store = Arc::new(InMemoryTrackerStore::new());
    let app =
        test::init_service(app_with(http_state(Arc::clone(&store), QueryPolicy::Lenient))).await;

    let first = post_json(&app, "/api/users", json!({ "username": "ada" })).await;
    assert_eq!(first.status(), StatusCode::OK);
    let second = post_json(&app, "/api/users", json!({ "username": "ada" })).await;
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body, json!({ "message": "Username taken." }));

    let listed = get(&app, "/api/users").await;
    let listed: Value = test::read_body_json(listed).await;
    let entries = listed.as_array().expect("array body");
    assert_eq!(entries.len(), 1);
}

#[actix_web::test]
async fn append_for_unknown_user_persists_nothing() {
    let store = Arc::new(InMemoryTrackerStore::new());
    let app =
        test::init_service(app_with(http_state(Arc::clone(&store), QueryPolicy::Lenient))).await;

    let response = post_json(
        &app,
        &format!("/api/users/{}/exercises", UserId::random()),
        json!({ "description": "swim", "duration": 30 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "message": "User not found." }));
    assert_eq!(store.entry_count(), 0);
}

#[actix_web::test]
async fn count_tracks_successful_appends() {
    let store = Arc::new(InMemoryTrackerStore::new());
    let app =
        test::init_service(app_with(http_state(Arc::clone(&store), QueryPolicy::Lenient))).await;

    let created = post_json(&app, "/api/users", json!({ "username": "ada" })).await;
    let created: Value = test::read_body_json(created).await;
    let id = created
        .get("_id")
        .and_then(Value::as_str)
        .expect("_id present")
        .to_owned();

    for n in 1..=3 {
        let response = post_json(
            &app,
            &format!("/api/users/{id}/exercises"),
            json!({ "description": format!("set {n}"), "duration": 10 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let logs = get(&app, &format!("/api/users/{id}/logs")).await;
    let logs: Value = test::read_body_json(logs).await;
    assert_eq!(logs.get("count"), Some(&json!(3)));
}

/// Store whose appends always abort, as a crashed transaction would.
struct AppendFailsStore {
    inner: InMemoryTrackerStore,
}

#[async_trait]
impl TrackerStore for AppendFailsStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.inner.insert_user(user).await
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.inner.list_users().await
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        self.inner.find_user(id).await
    }

    async fn append_exercise(&self, _user: &User, _entry: &Exercise) -> Result<(), StoreError> {
        Err(StoreError::write("transaction aborted"))
    }

    async fn load_log(&self, user: &User, window: &LogWindow) -> Result<Vec<Exercise>, StoreError> {
        self.inner.load_log(user, window).await
    }
}

#[actix_web::test]
async fn aborted_append_leaves_no_partial_state() {
    let store = Arc::new(AppendFailsStore {
        inner: InMemoryTrackerStore::new(),
    });
    let state = HttpState::new(
        Arc::new(RegistryService::new(Arc::clone(&store))),
        Arc::new(LedgerService::new(Arc::clone(&store))),
        QueryPolicy::Lenient,
    );
    let app = test::init_service(app_with(state)).await;

    let created = post_json(&app, "/api/users", json!({ "username": "ada" })).await;
    let created: Value = test::read_body_json(created).await;
    let id = created
        .get("_id")
        .and_then(Value::as_str)
        .expect("_id present")
        .to_owned();

    let response = post_json(
        &app,
        &format!("/api/users/{id}/exercises"),
        json!({ "description": "swim", "duration": 30 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    // The underlying cause stays in the logs, not the body.
    assert_eq!(body, json!({ "message": "Internal server error" }));
    assert_eq!(store.inner.entry_count(), 0);

    let logs = get(&app, &format!("/api/users/{id}/logs")).await;
    let logs: Value = test::read_body_json(logs).await;
    assert_eq!(logs.get("count"), Some(&json!(0)));
    assert_eq!(logs.get("log"), Some(&json!([])));
}

#[actix_web::test]
async fn windowed_log_is_exclusive_and_capped_independently() {
    let store = Arc::new(InMemoryTrackerStore::new());
    let app =
        test::init_service(app_with(http_state(Arc::clone(&store), QueryPolicy::Lenient))).await;

    let created = post_json(&app, "/api/users", json!({ "username": "ada" })).await;
    let created: Value = test::read_body_json(created).await;
    let id = created
        .get("_id")
        .and_then(Value::as_str)
        .expect("_id present")
        .to_owned();

    for day in ["01", "10", "20", "31"] {
        let response = post_json(
            &app,
            &format!("/api/users/{id}/exercises"),
            json!({ "description": "swim", "duration": 30, "date": format!("2023-01-{day}") }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let windowed = get(
        &app,
        &format!("/api/users/{id}/logs?from=2023-01-01&to=2023-01-31&limit=10"),
    )
    .await;
    let windowed: Value = test::read_body_json(windowed).await;
    let dates: Vec<&str> = windowed
        .get("log")
        .and_then(Value::as_array)
        .expect("log array")
        .iter()
        .filter_map(|entry| entry.get("date").and_then(Value::as_str))
        .collect();
    assert_eq!(dates, ["Tue Jan 10 2023", "Fri Jan 20 2023"]);

    let unbounded_limit = get(&app, &format!("/api/users/{id}/logs?limit=junk")).await;
    let unbounded_limit: Value = test::read_body_json(unbounded_limit).await;
    let entries = unbounded_limit
        .get("log")
        .and_then(Value::as_array)
        .expect("log array");
    assert_eq!(entries.len(), 4, "a non-numeric limit applies no cap");
}
