//! Integration tests for the chat HTTP endpoints.
//!
//! Drives the full router (cookie handling, handlers, engine, in-memory
//! stores) with a scripted language model.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use webdoctor::adapters::ai::MockAIProvider;
use webdoctor::adapters::email::LogMailer;
use webdoctor::adapters::http::{chat_router, ChatAppState, SessionCookie};
use webdoctor::adapters::memory::{
    InMemoryAgentResponseStore, InMemoryConversationStore, InMemoryReportRepository,
};
use webdoctor::application::handlers::chat::{HandleMessageHandler, SubmitReportHandler};
use webdoctor::domain::diagnosis::question_bank::questions_for;
use webdoctor::domain::diagnosis::{
    Classifier, ConversationState, DialogueConfig, DialogueEngine, DialogueStage, IssueCategory,
    Summarizer, Translator, FAREWELL, REPHRASE, REPORT_ACCEPTED, REPORT_OFFER,
};
use webdoctor::domain::foundation::{DomainError, ErrorCode, SessionKey};
use webdoctor::ports::{AIProvider, ConversationStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

const CLASSIFIED_PERFORMANCE: &str =
    "Category: Performance\nConfidence: 85\nClarifyingQuestion: Is it slow on every page?";

struct TestApp {
    router: Router,
    conversations: InMemoryConversationStore,
    responses: InMemoryAgentResponseStore,
    reports: InMemoryReportRepository,
    mailer: LogMailer,
    ai: MockAIProvider,
}

impl TestApp {
    fn new(ai: MockAIProvider) -> Self {
        let conversations = InMemoryConversationStore::new(Duration::from_secs(3600));
        Self::with_store(ai, conversations.clone(), Arc::new(conversations))
    }

    fn with_store(
        ai: MockAIProvider,
        conversations: InMemoryConversationStore,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        let responses = InMemoryAgentResponseStore::new();
        let reports = InMemoryReportRepository::new();
        let mailer = LogMailer::new();

        let provider: Arc<dyn AIProvider> = Arc::new(ai.clone());
        let engine = DialogueEngine::new(
            Classifier::new(provider.clone()),
            Summarizer::new(provider.clone()),
            Translator::new(provider),
            DialogueConfig::default(),
        );

        let state = ChatAppState {
            message_handler: Arc::new(HandleMessageHandler::new(
                engine,
                store.clone(),
                Arc::new(responses.clone()),
            )),
            report_handler: Arc::new(SubmitReportHandler::new(
                Arc::new(reports.clone()),
                Arc::new(mailer.clone()),
                store,
            )),
            cookie: SessionCookie::default(),
        };

        Self {
            router: chat_router(state),
            conversations,
            responses,
            reports,
            mailer,
            ai,
        }
    }

    async fn post(&self, uri: &str, body: &str, cookie: Option<&str>) -> (StatusCode, Option<String>, Value) {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let response = self
            .router
            .clone()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, set_cookie, json)
    }

    async fn chat(&self, message: &str, cookie: Option<&str>) -> (StatusCode, Option<String>, Value) {
        let body = json!({ "message": message }).to_string();
        self.post("/agent/handle_message/", &body, cookie).await
    }

    async fn session(&self, cookie: &str) -> ConversationState {
        let key: SessionKey = cookie.split('=').nth(1).unwrap().parse().unwrap();
        self.conversations.load(&key).await.unwrap().unwrap()
    }
}

/// Extracts the `name=value` pair from a Set-Cookie header.
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

/// Conversation store whose writes always fail.
struct BrokenStore;

#[async_trait]
impl ConversationStore for BrokenStore {
    async fn load(&self, _key: &SessionKey) -> Result<Option<ConversationState>, DomainError> {
        Ok(None)
    }

    async fn save(&self, _key: &SessionKey, _state: &ConversationState) -> Result<(), DomainError> {
        Err(DomainError::new(ErrorCode::DatabaseError, "disk full"))
    }
}

// =============================================================================
// Full conversation
// =============================================================================

#[tokio::test]
async fn full_conversation_from_first_message_to_farewell() {
    let ai = MockAIProvider::new()
        .with_response(CLASSIFIED_PERFORMANCE)
        .with_response("Your site loads slowly on mobile.");
    let app = TestApp::new(ai);

    // Classified with high confidence
    let (status, set_cookie, body) = app.chat("My website is really slow", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Is it slow on every page?");
    assert_eq!(body["stage"], "clarifying");
    assert_eq!(body["typing_delay"], 4);
    let set_cookie = set_cookie.expect("session cookie issued");
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = cookie_pair(&set_cookie);

    // Batch of bank questions
    let (_, _, body) = app.chat("Yes, every page", Some(&cookie)).await;
    let expected = questions_for(IssueCategory::Performance)
        .iter()
        .map(|q| q.text)
        .collect::<Vec<_>>()
        .join("\n\n");
    assert_eq!(body["response"], expected.as_str());
    assert_eq!(body["stage"], "clarifying");

    // Enough clarifications: summary plus offer
    let (_, _, body) = app.chat("Mostly on phones", Some(&cookie)).await;
    assert_eq!(
        body["response"],
        format!("Your site loads slowly on mobile. {}", REPORT_OFFER).as_str()
    );
    assert_eq!(body["stage"], "summarize");

    // Accept the report
    let (_, _, body) = app.chat("yes", Some(&cookie)).await;
    assert_eq!(body["response"], REPORT_ACCEPTED);
    assert_eq!(body["stage"], "offered_report");

    // Submit the form
    let form = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "issue": "Slow pages on mobile"
    })
    .to_string();
    let (status, _, body) = app.post("/agent/submit_form/", &form, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Report sent to your email!");
    assert_eq!(app.session(&cookie).await.stage, DialogueStage::ReportSent);

    // Thank the agent
    let (_, _, body) = app.chat("Thanks a lot!", Some(&cookie)).await;
    assert_eq!(body["response"], FAREWELL);
    assert_eq!(body["stage"], "closed");
    assert_eq!(body["typing_delay"], 3);

    let state = app.session(&cookie).await;
    assert_eq!(state.category, Some(IssueCategory::Performance));
    assert_eq!(state.history.len(), 10);

    assert_eq!(app.ai.call_count(), 2);
    assert_eq!(app.reports.reports().await.len(), 1);
    assert_eq!(app.reports.interactions().await.len(), 1);
    let sent = app.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].report_content.starts_with("Diagnostic Report for Ada\n"));
    assert_eq!(app.responses.len().await, 5);
}

#[tokio::test]
async fn low_confidence_asks_to_rephrase() {
    let ai = MockAIProvider::new()
        .with_response("Category: Performance\nConfidence: 40\nClarifyingQuestion: Hmm?");
    let app = TestApp::new(ai);

    let (status, set_cookie, body) = app.chat("it's weird", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], REPHRASE);
    assert_eq!(body["stage"], "initial");
    let state = app.session(&cookie_pair(&set_cookie.unwrap())).await;
    assert_eq!(state.category, None);
    assert_eq!(state.clarifications, 1);
}

#[tokio::test]
async fn reply_is_translated_for_non_english_lang() {
    let ai = MockAIProvider::new()
        .with_response(CLASSIFIED_PERFORMANCE)
        .with_response("¿Es lento en todas las páginas?");
    let app = TestApp::new(ai);

    let body = json!({ "message": "Mi sitio es lento", "lang": "es" }).to_string();
    let (_, _, body) = app.post("/agent/handle_message/", &body, None).await;

    assert_eq!(body["response"], "¿Es lento en todas las páginas?");
    assert_eq!(app.ai.call_count(), 2);
}

#[tokio::test]
async fn unknown_cookie_starts_a_new_session() {
    let app = TestApp::new(MockAIProvider::new().with_response(CLASSIFIED_PERFORMANCE));
    let stale = format!("webdoctor_session={}", SessionKey::new());

    let (status, set_cookie, body) = app.chat("slow site", Some(&stale)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stage"], "clarifying");
    // The client's key is reused for the fresh conversation
    assert_eq!(cookie_pair(&set_cookie.unwrap()), stale);
}

// =============================================================================
// Validation errors
// =============================================================================

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = TestApp::new(MockAIProvider::new());

    let (status, set_cookie, body) = app.post("/agent/handle_message/", "{not json", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON format");
    assert!(set_cookie.is_none());

    let (status, _, body) = app.post("/agent/submit_form/", "", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON format");
}

#[tokio::test]
async fn blank_message_is_rejected_without_touching_state() {
    let app = TestApp::new(MockAIProvider::new());

    let (status, set_cookie, body) = app.chat("   ", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message cannot be empty");
    assert!(set_cookie.is_none());
    assert_eq!(app.conversations.session_count().await, 0);
    assert_eq!(app.ai.call_count(), 0);
}

#[tokio::test]
async fn report_form_validation() {
    let app = TestApp::new(MockAIProvider::new());

    let missing = json!({ "name": "Ada", "email": "ada@example.com" }).to_string();
    let (status, _, body) = app.post("/agent/submit_form/", &missing, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");

    let bad_email = json!({ "name": "Ada", "email": "ada-at-example", "issue": "Slow" }).to_string();
    let (status, _, body) = app.post("/agent/submit_form/", &bad_email, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format");

    assert!(app.reports.reports().await.is_empty());
    assert!(app.mailer.sent().await.is_empty());
}

#[tokio::test]
async fn report_without_session_still_succeeds() {
    let app = TestApp::new(MockAIProvider::new());

    let form = json!({ "name": "Ada", "email": "ada@example.com", "issue": "Hacked" }).to_string();
    let (status, _, body) = app.post("/agent/submit_form/", &form, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Report sent to your email!");
    assert_eq!(app.reports.reports().await.len(), 1);
}

// =============================================================================
// Failures and routing
// =============================================================================

#[tokio::test]
async fn storage_failure_returns_500() {
    let app = TestApp::with_store(
        MockAIProvider::new().with_response(CLASSIFIED_PERFORMANCE),
        InMemoryConversationStore::new(Duration::from_secs(60)),
        Arc::new(BrokenStore),
    );

    let (status, set_cookie, body) = app.chat("slow site", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Unable to process request at this time");
    assert!(set_cookie.is_none());
}

#[tokio::test]
async fn wrong_method_returns_405() {
    let app = TestApp::new(MockAIProvider::new());

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/agent/handle_message/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Invalid method");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new(MockAIProvider::new());

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}
