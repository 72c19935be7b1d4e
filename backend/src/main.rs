use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use learntrack_backend::{
    config::Config,
    db::connection::create_pool,
    docs,
    handlers,
    middleware as auth_middleware,
    services::insight::HttpInsightClient,
    state::AppState,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(24 * 60 * 60));

    if config.cors_allowed_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learntrack_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        jwt_secret = %mask_secret(&config.jwt_secret),
        token_expiration_days = config.token_expiration_days,
        ml_service_url = %config.ml_service_url,
        ml_timeout_ms = config.ml_timeout_ms,
        time_zone = %config.time_zone,
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let insight = Arc::new(HttpInsightClient::new(&config)?);
    let state = AppState::new(pool, config.clone(), insight);

    // Credential endpoints, rate limited per IP
    let auth_routes = Router::new()
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/login", post(handlers::auth::login))
        .layer(auth_middleware::auth_rate_limiter(&config));

    // Public read-only catalog
    let catalog_routes = Router::new()
        .route("/api/courses", get(handlers::courses::list_courses))
        .route("/api/courses/{id}", get(handlers::courses::get_course))
        .route(
            "/api/courses/{id}/modules",
            get(handlers::courses::course_modules),
        );

    // Module content: anonymous access allowed, gating kicks in when a
    // course context is supplied
    let module_content_routes = Router::new()
        .route("/api/modules/{id}", get(handlers::modules::get_module))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::auth_optional,
        ));

    // Learner routes (auth required)
    let user_routes = Router::new()
        .route("/api/auth/profile", get(handlers::auth::profile))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/courses", post(handlers::courses::create_course))
        .route(
            "/api/courses/{id}/progress",
            get(handlers::courses::course_progress),
        )
        .route("/api/courses/enroll", post(handlers::courses::enroll))
        .route("/api/modules", post(handlers::modules::create_module))
        .route(
            "/api/modules/{id}/start",
            post(handlers::modules::start_module),
        )
        .route(
            "/api/modules/{id}/complete",
            post(handlers::modules::complete_module),
        )
        .route(
            "/api/modules/{id}/status",
            get(handlers::modules::module_status),
        )
        .route("/api/quiz", post(handlers::quiz::create_quiz))
        .route(
            "/api/quiz/{module_id}/start",
            post(handlers::quiz::start_quiz),
        )
        .route(
            "/api/quiz/{module_id}/submit",
            post(handlers::quiz::submit_quiz),
        )
        .route(
            "/api/users/me/activity",
            get(handlers::dashboard::my_activity),
        )
        .route(
            "/api/users/me/activity/daily",
            get(handlers::dashboard::my_activity_daily),
        )
        .route(
            "/api/users/me/quiz-results",
            get(handlers::dashboard::my_quiz_results),
        )
        .route(
            "/api/users/me/progress",
            get(handlers::dashboard::my_progress),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::auth,
        ));

    // Insight routes (auth required, separately rate limited)
    let ml_routes = Router::new()
        .route(
            "/api/ml/profile/generate",
            post(handlers::ml::generate_profile),
        )
        .route(
            "/api/ml/recommendations/generate",
            post(handlers::ml::generate_recommendations),
        )
        .route("/api/ml/profile", get(handlers::ml::get_profile))
        .route(
            "/api/ml/recommendations",
            get(handlers::ml::get_recommendations),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::auth,
        ))
        .layer(auth_middleware::ml_rate_limiter(&config));

    let swagger =
        SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", docs::ApiDoc::openapi());

    // Compose app with shared layers (CORS/Trace) and shared state
    let app = Router::new()
        .merge(auth_routes)
        .merge(catalog_routes)
        .merge(module_content_routes)
        .merge(user_routes)
        .merge(ml_routes)
        .merge(swagger)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config)),
        )
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
