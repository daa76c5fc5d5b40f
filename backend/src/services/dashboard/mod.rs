//! # Dashboard Service Module
//!
//! Serves the aggregates shown on the landing page: the counters, the
//! origin breakdown behind the pie chart and the recently updated forms.

mod summary;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/dashboard";

/// Configures and returns the Actix `Scope` for the dashboard routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: `summary::process`, returns
///     `{ stats, origins, chart, recent }` computed from the current snapshot.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(summary::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{form_with_origin, loaded_cache, FakeApi};
    use actix_web::{test, App};
    use common::model::form::FormStatus;
    use serde_json::Value;
    use std::sync::Arc;

    #[actix_web::test]
    async fn summary_reflects_the_snapshot() {
        let api = Arc::new(FakeApi::with_forms(vec![
            form_with_origin("a", FormStatus::Pending, Some("Incêndio")),
            form_with_origin("b", FormStatus::Completed, Some("Lightning Strike")),
            form_with_origin("c", FormStatus::Pending, None),
        ]));
        let app = test::init_service(
            App::new()
                .app_data(loaded_cache(api).await)
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/dashboard").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["stats"]["total"], 3);
        assert_eq!(body["stats"]["pending"], 2);
        assert_eq!(body["stats"]["completed"], 1);
        assert_eq!(body["origins"].as_object().map(|m| m.len()), Some(15));
        assert_eq!(body["origins"]["Incêndio"], 1);
        assert_eq!(body["origins"]["outro"], 1);
        assert_eq!(body["chart"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(body["recent"].as_array().map(|a| a.len()), Some(3));
    }
}
