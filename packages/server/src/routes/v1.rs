use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/students", student_routes(config))
        .nest("/dashboard", dashboard_routes())
}

fn student_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::student::list_students,
            handlers::student::create_student
        ))
        .routes(routes!(
            handlers::student::get_student,
            handlers::student::update_student,
            handlers::student::delete_student
        ))
        .layer(handlers::student::student_body_limit(
            config.upload.max_request_size,
        ))
}

fn dashboard_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::dashboard::get_dashboard))
        .routes(routes!(handlers::dashboard::get_chart))
}
