use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;

use crate::api::handlers::{auth, health, project, report, technician, vip};
use crate::state::AppState;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))

        // VIP members and the balance ledger
        .route("/api/vip", get(vip::list_vips).post(vip::create_vip))
        .route(
            "/api/vip/{id}",
            get(vip::get_vip).put(vip::update_vip).delete(vip::delete_vip),
        )
        .route("/api/vip/{id}/recharge", post(vip::recharge_vip))
        .route("/api/vip/{id}/consume", post(vip::consume_vip))

        // Service catalog
        .route(
            "/api/project",
            get(project::list_projects).post(project::create_project),
        )
        .route(
            "/api/project/{id}",
            get(project::get_project)
                .put(project::update_project)
                .delete(project::delete_project),
        )

        // Technicians
        .route(
            "/api/technician",
            get(technician::list_technicians).post(technician::create_technician),
        )
        .route(
            "/api/technician/{id}",
            get(technician::get_technician)
                .put(technician::update_technician)
                .delete(technician::delete_technician),
        )

        // Reports
        .route("/api/report/transactions", get(report::list_transactions))
        .route("/api/report/recharge", get(report::recharge_report))
        .route("/api/report/consumption", get(report::consumption_report))
        .route("/api/report/summary/vip", get(report::vip_summary))
        .route("/api/report/summary/platform", get(report::platform_summary))
        .route("/api/report/summary/cash", get(report::cash_summary))
        .route(
            "/api/report/daily",
            get(report::list_daily_reports).post(report::upsert_daily_report),
        )
        .route("/api/report/daily/{date}", get(report::get_daily_report))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        store_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!(
                        "started processing request: {} {}",
                        request.method(),
                        request.uri().path()
                    );
                })
                .on_response(
                    |response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                        info!(
                            status = response.status().as_u16(),
                            latency_ms = latency.as_millis(),
                            "finished processing request"
                        );
                    },
                )
                .on_failure(
                    |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        error!("request failed: {:?}", error);
                    },
                ),
        )
        .with_state(state)
}
