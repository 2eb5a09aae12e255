//! LexFlow backend binary: wires configuration, adapters, and the HTTP
//! server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use lexflow::adapters::ai::{HttpAiConfig, HttpAiProvider};
use lexflow::adapters::directory::{HttpDirectoryConfig, HttpDirectoryProvider};
use lexflow::adapters::http::analysis::AnalysisHandlers;
use lexflow::adapters::http::api_router;
use lexflow::adapters::http::intake::IntakeHandlers;
use lexflow::adapters::rate_limiter::{
    FailoverRateLimiter, InMemoryRateLimiter, RateLimitConfig, RedisRateLimiter,
};
use lexflow::adapters::session::InMemorySessionStore;
use lexflow::adapters::templates::StaticTemplateCatalog;
use lexflow::application::handlers::{
    RecordAnswerHandler, RunAnalysisHandler, StartIntakeHandler, SubmitMessageHandler,
};
use lexflow::config::AppConfig;
use lexflow::domain::analysis::{
    AnalysisOrchestrator, OrchestratorBudgets, ProviderGateway, ResultCoalescer,
};
use lexflow::domain::intake::{standard_catalog, FlowController, FreeformExtractor};
use lexflow::ports::RateLimiter;

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lexflow=info,tower_http=info")),
        )
        .init();

    let catalog = standard_catalog();
    let flow = FlowController::new(catalog.clone());
    let store = Arc::new(InMemorySessionStore::new());

    // AI provider: one client serves both the audit and extraction ports.
    let mut ai_config = match &config.ai.api_key {
        Some(key) => HttpAiConfig::new(key.expose_secret().clone()),
        None => HttpAiConfig::unconfigured(),
    };
    ai_config = ai_config
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(Duration::from_millis(config.ai.timeout_ms));
    if !config.ai.is_configured() {
        tracing::warn!("no AI api key configured; analyses will use defaults only");
    }
    let ai_provider = Arc::new(HttpAiProvider::new(ai_config));

    let mut directory_config = match &config.directory.api_key {
        Some(key) => HttpDirectoryConfig::new(key.expose_secret().clone()),
        None => HttpDirectoryConfig::unconfigured(),
    };
    directory_config = directory_config
        .with_base_url(config.directory.base_url.clone())
        .with_timeout(Duration::from_millis(config.directory.timeout_ms));
    let directory_provider = Arc::new(HttpDirectoryProvider::new(directory_config));

    let gateway = ProviderGateway::new(ai_provider.clone(), directory_provider)
        .with_audit_timeout(Duration::from_millis(config.ai.timeout_ms))
        .with_lookup_timeout(Duration::from_millis(config.directory.timeout_ms));

    let orchestrator = Arc::new(
        AnalysisOrchestrator::new(
            gateway,
            ResultCoalescer::new(config.analysis.defaults.clone()),
            Arc::new(StaticTemplateCatalog::builtin()),
        )
        .with_budgets(OrchestratorBudgets {
            audit_call: Duration::from_millis(config.analysis.audit_call_budget_ms),
            lookup_call: Duration::from_millis(config.analysis.lookup_call_budget_ms),
            min_problem_chars: config.analysis.min_problem_chars,
        }),
    );

    let extractor = Arc::new(
        FreeformExtractor::new(catalog)
            .with_field_extractor(ai_provider)
            .with_pass_budget(Duration::from_millis(config.analysis.extract_pass_budget_ms)),
    );

    let window = config.analysis.deadline_window();
    let guard = config.analysis.guard_threshold();

    let intake_handlers = IntakeHandlers {
        start: Arc::new(StartIntakeHandler::new(store.clone(), flow.clone())),
        answer: Arc::new(RecordAnswerHandler::new(store.clone(), flow.clone())),
        message: Arc::new(SubmitMessageHandler::new(
            store.clone(),
            flow.clone(),
            extractor,
            window,
            guard,
        )),
    };
    let analysis_handlers = AnalysisHandlers {
        run: Arc::new(RunAnalysisHandler::new(store, orchestrator, window, guard)),
    };

    let limiter = build_rate_limiter(&config).await;
    let app = api_router(intake_handlers, analysis_handlers, limiter);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "starting lexflow backend");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

/// Builds the admission gate: Redis with a local fallback when
/// configured, local counters only otherwise.
async fn build_rate_limiter(config: &AppConfig) -> Arc<dyn RateLimiter> {
    let rate_config = RateLimitConfig::default();
    let fallback = Arc::new(InMemoryRateLimiter::new(rate_config.clone()));

    let Some(url) = &config.redis.url else {
        tracing::info!("no redis configured; rate limiting runs on local counters");
        return fallback;
    };

    match redis::Client::open(url.as_str()) {
        Ok(client) => match client.get_multiplexed_tokio_connection().await {
            Ok(conn) => {
                tracing::info!("rate limiting backed by redis with local fallback");
                Arc::new(FailoverRateLimiter::new(
                    Arc::new(RedisRateLimiter::new(conn, rate_config)),
                    fallback,
                ))
            }
            Err(e) => {
                tracing::warn!(error = %e, "redis unreachable; rate limiting on local counters");
                fallback
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "invalid redis url; rate limiting on local counters");
            fallback
        }
    }
}
