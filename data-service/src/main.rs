use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use data_service::{
    api::{
        handler::{coverage_config, employee, farmacy, membership, shift_template},
        state::DataServiceAppState,
    },
    infrastructure::{
        cache::{
            client::RedisCache, employee::CachedEmployeeRepository,
            farmacy::CachedFarmacyRepository, membership::CachedMembershipRepository,
        },
        coverage_config::PgCoverageConfigRepository,
        employee::PgEmployeeRepository,
        farmacy::PgFarmacyRepository,
        membership::PgMembershipRepository,
        shift_template::PgShiftTemplateRepository,
    },
};
use sqlx::postgres::PgPoolOptions;
use std::{env, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        employee::find_all,
        employee::find_by_id,
        employee::create,
        employee::batch_create,
        employee::update,
        employee::deactivate,
        employee::delete,
        farmacy::find_all,
        farmacy::find_by_id,
        farmacy::create,
        farmacy::batch_create,
        farmacy::update,
        farmacy::delete,
        shift_template::find_by_farmacy,
        shift_template::find_by_id,
        shift_template::create,
        shift_template::update,
        shift_template::delete,
        coverage_config::get,
        coverage_config::upsert,
    ),
    tags(
        (name = "Employees", description = "Employee roster management"),
        (name = "Farmacies", description = "Farmacy (workforce) management"),
        (name = "ShiftTemplates", description = "Per-farmacy shift catalog"),
        (name = "CoverageConfig", description = "Per-farmacy coverage rules"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    let _guard = shared::telemetry::init_telemetry("data-service");

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let port = env::var("SERVER_PORT").unwrap_or_else(|_| "8080".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to establish connection into Postgres");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let redis_url = env::var("REDIS_URL").expect("REDIS_URL must be set");
    let cache = RedisCache::new(&redis_url)
        .await
        .expect("Failed to connect to Redis");

    let state = Arc::new(DataServiceAppState {
        employee_repo: Arc::new(CachedEmployeeRepository::new(
            Arc::new(PgEmployeeRepository::new(pool.clone())),
            cache.clone(),
        )),
        farmacy_repo: Arc::new(CachedFarmacyRepository::new(
            Arc::new(PgFarmacyRepository::new(pool.clone())),
            cache.clone(),
        )),
        membership_repo: Arc::new(CachedMembershipRepository::new(
            Arc::new(PgMembershipRepository::new(pool.clone())),
            cache,
        )),
        shift_template_repo: Arc::new(PgShiftTemplateRepository::new(pool.clone())),
        coverage_config_repo: Arc::new(PgCoverageConfigRepository::new(pool)),
    });

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(10)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
        .expect("Failed to build governor config");

    let app = Router::new()
        // Employee routes
        .route(
            "/api/v1/employees",
            get(employee::find_all).post(employee::create),
        )
        .route("/api/v1/employees/batch", post(employee::batch_create))
        .route(
            "/api/v1/employees/{id}",
            get(employee::find_by_id)
                .put(employee::update)
                .delete(employee::delete),
        )
        .route(
            "/api/v1/employees/{id}/deactivate",
            patch(employee::deactivate),
        )
        .route(
            "/api/v1/employees/{id}/farmacies",
            get(membership::get_employee_farmacies),
        )
        // Farmacy routes
        .route(
            "/api/v1/farmacies",
            get(farmacy::find_all).post(farmacy::create),
        )
        .route("/api/v1/farmacies/batch", post(farmacy::batch_create))
        .route(
            "/api/v1/farmacies/{id}",
            get(farmacy::find_by_id)
                .put(farmacy::update)
                .delete(farmacy::delete),
        )
        // Membership routes
        .route(
            "/api/v1/farmacies/{farmacy_id}/employees",
            get(membership::get_farmacy_employees).post(membership::add_member),
        )
        .route(
            "/api/v1/farmacies/{farmacy_id}/employees/{employee_id}",
            delete(membership::remove_member),
        )
        .route(
            "/api/v1/memberships/batch",
            post(membership::batch_add_members),
        )
        // Shift template routes
        .route(
            "/api/v1/farmacies/{farmacy_id}/shift-templates",
            get(shift_template::find_by_farmacy).post(shift_template::create),
        )
        .route(
            "/api/v1/farmacies/{farmacy_id}/shift-templates/{id}",
            get(shift_template::find_by_id)
                .put(shift_template::update)
                .delete(shift_template::delete),
        )
        // Coverage config routes
        .route(
            "/api/v1/farmacies/{farmacy_id}/coverage-config",
            get(coverage_config::get).put(coverage_config::upsert),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Rate limiting (per-IP, 2 req/s with burst of 10)
        .layer(GovernorLayer::new(governor_conf))
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(tower_http::LatencyUnit::Millis),
                ),
        )
        .with_state(state);

    tracing::info!("data-service listening on 0.0.0.0:{port}");

    let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Failed to bind");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shared::shutdown::shutdown_signal())
    .await
    .expect("Oppsie! Server crashed!");

    tracing::info!("data-service shut down");
}
