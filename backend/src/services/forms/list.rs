use crate::cache::FormsCache;
use crate::error::FormsError;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::engine::{filter, FormFilter};
use common::model::card::FormCard;
use common::requests::FormsQuery;

/// Actix web handler for `GET /api/forms`.
///
/// Filters the current snapshot (no remote call) and returns the matching
/// records as cards, in snapshot order.
pub async fn process(
    cache: web::Data<FormsCache>,
    query: web::Query<FormsQuery>,
) -> Result<HttpResponse, FormsError> {
    let criteria = FormFilter::parse(query.search.trim(), &query.status, &query.origin)
        .map_err(FormsError::Invalid)?;
    let snapshot = cache.get_all().await;
    let now = Utc::now();
    let cards: Vec<FormCard> = filter(&snapshot, &criteria)
        .iter()
        .map(|form| FormCard::from_record(form, now))
        .collect();
    Ok(HttpResponse::Ok().json(cards))
}
