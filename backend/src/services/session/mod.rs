//! # Session Service Module
//!
//! Stores the bearer token and the logged-in user issued by the remote API so
//! the other services can authenticate their calls.
//!
//! ## Sub-modules:
//! - `login`: stores a token and user.
//! - `current`: reports who is logged in and whether they may delete forms.
//! - `logout`: forgets both values.

mod current;
mod login;
mod logout;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/session";

/// Configures and returns the Actix `Scope` for the session routes.
///
/// # Registered Routes:
///
/// *   **`POST /`**: `login::process`, body `{ token, user: { name, role } }`.
/// *   **`GET /`**: `current::process`, returns `{ authenticated, user, canDelete }`.
/// *   **`DELETE /`**: `logout::process`, `204 No Content`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(login::process))
        .route("", get().to(current::process))
        .route("", delete().to(logout::process))
}
