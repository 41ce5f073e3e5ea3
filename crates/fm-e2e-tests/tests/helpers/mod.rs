//! Shared test harness for E2E integration tests.
//!
//! Drives the real Axum router and session store with any
//! `IntentClassifier`, so each test exercises the HTTP layer, the session
//! loop and the dispatcher together.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use fm_bot::classifier::{IntentClassifier, ScriptedClassifier};
use fm_bot::routes::build_router;
use fm_bot::state::AppState;
use fm_protocol::{Classification, CompositeEntity};

/// End-to-end harness around one `AppState`.
pub struct TestHarness {
    pub state: AppState,
    pub router: Router,
}

impl TestHarness {
    pub fn new(classifier: Arc<dyn IntentClassifier>) -> Self {
        let state = AppState::with_classifier(classifier);
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Harness with a scripted classifier the test can keep queuing into.
    pub fn scripted() -> (Self, Arc<ScriptedClassifier>) {
        let classifier = Arc::new(ScriptedClassifier::new());
        (Self::new(classifier.clone()), classifier)
    }

    /// POST /api/v1/sessions, returning the new session id.
    pub async fn start_session(&self) -> Uuid {
        let response = self
            .router
            .clone()
            .oneshot(Request::post("/api/v1/sessions").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        json["session_id"].as_str().unwrap().parse().unwrap()
    }

    /// Send one message. Returns the status and the reply text, if any.
    pub async fn send(&self, session: Uuid, text: &str) -> (StatusCode, Option<String>) {
        let body = serde_json::json!({ "text": text });
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post(format!("/api/v1/sessions/{session}/messages"))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        if status != StatusCode::OK {
            return (status, None);
        }
        let json = body_json(response).await;
        (status, json["reply"].as_str().map(str::to_string))
    }

    /// Send a message that must produce a reply.
    pub async fn reply(&self, session: Uuid, text: &str) -> String {
        let (status, reply) = self.send(session, text).await;
        assert_eq!(status, StatusCode::OK, "message {text:?} should succeed");
        reply.expect("message should produce a reply")
    }

    /// GET /api/v1/sessions/{id}/order as JSON.
    pub async fn order(&self, session: Uuid) -> serde_json::Value {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::get(format!("/api/v1/sessions/{session}/order"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `Order.<lang>` classification with one dish group.
pub fn order_intent(label: &str, score: f64, base: &str, fillings: &[&str]) -> Classification {
    let entity = fillings
        .iter()
        .fold(CompositeEntity::new().child("DishBase", base), |e, f| {
            e.child("Filling", *f)
        });
    Classification::new(label, score).with_entity(entity)
}

/// Number of dishes in an order JSON body.
pub fn dish_count(order: &serde_json::Value) -> usize {
    order["dishes"].as_array().map_or(0, Vec::len)
}
