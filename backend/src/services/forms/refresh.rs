use crate::cache::{FormsCache, LoadOutcome};
use crate::error::FormsError;
use actix_web::{web, HttpResponse};
use common::model::sort::SortOrder;
use common::requests::{RefreshQuery, RefreshResponse};

/// Actix web handler for `POST /api/forms/refresh`.
pub async fn process(
    cache: web::Data<FormsCache>,
    query: web::Query<RefreshQuery>,
) -> Result<HttpResponse, FormsError> {
    let order = query
        .order
        .trim()
        .parse::<SortOrder>()
        .map_err(FormsError::Invalid)?;
    let outcome = cache.load(order).await?;
    Ok(HttpResponse::Ok().json(RefreshResponse {
        order,
        applied: matches!(outcome, LoadOutcome::Applied(_)),
        total: cache.get_all().await.len(),
    }))
}
