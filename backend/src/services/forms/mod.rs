//! # Forms Service Module
//!
//! Routes under `/api/forms` drive the forms cache: refreshing it from the
//! remote API, listing filtered cards, and reading, editing or deleting a
//! single record.
//!
//! ## Sub-modules:
//! - `refresh`: reloads the snapshot in a given sort order.
//! - `list`: filters the snapshot and returns card views.
//! - `get`: returns one cached record.
//! - `update`: sends a quick-edit patch and stores the server copy.
//! - `delete`: deletes a record on the server and drops it from the cache.

mod delete;
mod get;
mod list;
mod refresh;
mod update;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

/// The base path for all form-related API endpoints.
const API_PATH: &str = "/api/forms";

/// Configures and returns the Actix `Scope` for all form-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /refresh?order=`**: `refresh::process`. `order` is one of
///     `recentes`, `antigos`, `alfabetica`, `status`; empty means `recentes`.
/// *   **`GET /?search=&status=&origin=`**: `list::process`. Empty values mean
///     "all"; `origin=outro` selects records outside the fixed category list.
/// *   **`GET /{form_id}`**: `get::process`.
/// *   **`PUT /{form_id}`**: `update::process`, body `{ titulo?, descricao?, status? }`.
/// *   **`DELETE /{form_id}`**: `delete::process`, `204 No Content`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/refresh", post().to(refresh::process))
        .route("/{form_id}", get().to(get::process))
        .route("/{form_id}", put().to(update::process))
        .route("/{form_id}", delete().to(delete::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{form_with_origin, loaded_cache, FakeApi};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use common::model::card::FormCard;
    use common::model::form::{FormRecord, FormStatus};
    use common::requests::{ErrorBody, RefreshResponse};
    use serde_json::json;
    use std::sync::Arc;

    fn server_forms() -> Vec<FormRecord> {
        vec![
            form_with_origin("a", FormStatus::Pending, Some("Incêndio")),
            form_with_origin("b", FormStatus::Completed, Some("Lightning Strike")),
            form_with_origin("c", FormStatus::Pending, None),
        ]
    }

    macro_rules! app {
        ($api:expr) => {
            test::init_service(
                App::new()
                    .app_data(loaded_cache($api.clone()).await)
                    .service(configure_routes()),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn list_applies_the_filters() {
        let api = Arc::new(FakeApi::with_forms(server_forms()));
        let app = app!(api);

        let req = test::TestRequest::get().uri("/api/forms").to_request();
        let cards: Vec<FormCard> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cards.len(), 3);

        let req = test::TestRequest::get()
            .uri("/api/forms?status=pending&origin=outro")
            .to_request();
        let cards: Vec<FormCard> = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);

        let req = test::TestRequest::get()
            .uri("/api/forms?search=OCORR%C3%8ANCIA%20DE%20B")
            .to_request();
        let cards: Vec<FormCard> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].excerpt, "ocorrência de b");
    }

    #[actix_web::test]
    async fn unknown_status_is_a_bad_request() {
        let api = Arc::new(FakeApi::with_forms(server_forms()));
        let app = app!(api);

        let req = test::TestRequest::get()
            .uri("/api/forms?status=archived")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn refresh_validates_the_order() {
        let api = Arc::new(FakeApi::with_forms(server_forms()));
        let app = app!(api);

        let req = test::TestRequest::post()
            .uri("/api/forms/refresh?order=antigos")
            .to_request();
        let body: RefreshResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.applied);
        assert_eq!(body.total, 3);

        let req = test::TestRequest::post()
            .uri("/api/forms/refresh?order=aleatoria")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn expired_session_redirects_to_login() {
        let api = Arc::new(FakeApi::with_forms(server_forms()));
        let app = app!(api);
        api.fail_with(crate::error::FormsError::AuthExpired);

        let req = test::TestRequest::post().uri("/api/forms/refresh").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.redirect.as_deref(), Some("/login"));
    }

    #[actix_web::test]
    async fn get_update_and_delete_one_form() {
        let api = Arc::new(FakeApi::with_forms(server_forms()));
        let app = app!(api);

        let req = test::TestRequest::get().uri("/api/forms/a").to_request();
        let record: FormRecord = test::call_and_read_body_json(&app, req).await;
        assert_eq!(record.title, "Formulário a");

        let req = test::TestRequest::put()
            .uri("/api/forms/a")
            .set_json(json!({ "titulo": "Revisado", "status": "completed" }))
            .to_request();
        let record: FormRecord = test::call_and_read_body_json(&app, req).await;
        assert_eq!(record.status, FormStatus::Completed);

        let req = test::TestRequest::delete().uri("/api/forms/a").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri("/api/forms/a").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn forbidden_delete_is_reported() {
        let api = Arc::new(FakeApi::with_forms(server_forms()));
        let app = app!(api);
        api.fail_with(crate::error::FormsError::Forbidden(
            "Acesso negado. Apenas administradores podem excluir.".into(),
        ));

        let req = test::TestRequest::delete().uri("/api/forms/b").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.kind, "forbidden");
    }
}
