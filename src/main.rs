use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use webdoctor::adapters::ai::{OpenAIConfig, OpenAIProvider};
use webdoctor::adapters::email::{LogMailer, ResendConfig, ResendMailer};
use webdoctor::adapters::http::{chat_router, ChatAppState, SessionCookie};
use webdoctor::adapters::memory::{
    InMemoryAgentResponseStore, InMemoryConversationStore, InMemoryReportRepository,
};
use webdoctor::adapters::postgres::{
    PostgresAgentResponseStore, PostgresConversationStore, PostgresReportRepository,
};
use webdoctor::application::handlers::chat::{HandleMessageHandler, SubmitReportHandler};
use webdoctor::config::{AppConfig, DatabaseConfig, EmailConfig, ServerConfig};
use webdoctor::domain::diagnosis::{
    Classifier, DialogueConfig, DialogueEngine, Summarizer, Translator,
};
use webdoctor::ports::{
    AIProvider, AgentResponseStore, ConversationStore, ReportMailer, ReportRepository,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const PURGE_INTERVAL: Duration = Duration::from_secs(300);

struct Stores {
    conversations: Arc<dyn ConversationStore>,
    responses: Arc<dyn AgentResponseStore>,
    reports: Arc<dyn ReportRepository>,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let provider = build_provider(&config)?;
    let engine = DialogueEngine::new(
        Classifier::new(provider.clone()),
        Summarizer::new(provider.clone()),
        Translator::new(provider),
        DialogueConfig::default(),
    );

    let stores = match &config.database {
        Some(database) => postgres_stores(database, config.session.ttl()).await?,
        None => {
            tracing::warn!("No database configured; sessions and reports are kept in memory");
            memory_stores(config.session.ttl())
        }
    };

    let mailer = build_mailer(config.email.as_ref())?;

    let state = ChatAppState {
        message_handler: Arc::new(HandleMessageHandler::new(
            engine,
            stores.conversations.clone(),
            stores.responses,
        )),
        report_handler: Arc::new(SubmitReportHandler::new(
            stores.reports,
            mailer,
            stores.conversations,
        )),
        cookie: SessionCookie {
            name: config.session.cookie_name.clone(),
            max_age_secs: config.session.ttl_secs,
            secure: config.secure_cookie(),
        },
    };

    let app = build_app(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "WebDoctor listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("WebDoctor stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_provider(config: &AppConfig) -> Result<Arc<dyn AIProvider>, BoxError> {
    let ai = &config.ai;
    let provider = OpenAIProvider::new(
        OpenAIConfig::new(ai.openai_api_key.clone())
            .with_model(ai.model.clone())
            .with_base_url(ai.base_url.clone())
            .with_timeout(ai.timeout())
            .with_max_retries(ai.max_retries),
    )?;
    tracing::info!(model = %ai.model, "Using OpenAI gateway");
    Ok(Arc::new(provider))
}

async fn postgres_stores(database: &DatabaseConfig, ttl: Duration) -> Result<Stores, BoxError> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let conversations = Arc::new(PostgresConversationStore::new(pool.clone(), ttl));
    let purger = conversations.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match purger.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => tracing::debug!(purged, "Purged expired sessions"),
                Err(err) => tracing::error!(error = %err, "Failed to purge expired sessions"),
            }
        }
    });

    Ok(Stores {
        conversations,
        responses: Arc::new(PostgresAgentResponseStore::new(pool.clone())),
        reports: Arc::new(PostgresReportRepository::new(pool)),
    })
}

fn memory_stores(ttl: Duration) -> Stores {
    let conversations = Arc::new(InMemoryConversationStore::new(ttl));
    let purger = conversations.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = purger.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Purged expired sessions");
            }
        }
    });

    Stores {
        conversations,
        responses: Arc::new(InMemoryAgentResponseStore::new()),
        reports: Arc::new(InMemoryReportRepository::new()),
    }
}

fn build_mailer(email: Option<&EmailConfig>) -> Result<Arc<dyn ReportMailer>, BoxError> {
    let Some(email) = email else {
        tracing::warn!("No email configured; reports will only be logged");
        return Ok(Arc::new(LogMailer::new()));
    };

    let mut resend = ResendConfig::new(email.resend_api_key.clone(), email.from_header());
    if let Some(base_url) = &email.api_base_url {
        resend = resend.with_base_url(base_url.clone());
    }
    Ok(Arc::new(ResendMailer::new(resend)?))
}

fn build_app(state: ChatAppState, server: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let mut app = chat_router(state).layer(TimeoutLayer::new(server.request_timeout()));

    // Credentialed CORS cannot use a wildcard origin, so no list means no layer.
    if !origins.is_empty() {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true)
                .max_age(Duration::from_secs(3600)),
        );
    }

    app.layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
