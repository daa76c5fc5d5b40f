use crate::cache::FormsCache;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::engine::{origin_stats, recent, stats, RECENT_DEFAULT};
use common::model::card::FormCard;
use common::requests::DashboardSummary;

/// Actix web handler for `GET /api/dashboard`.
pub async fn process(cache: web::Data<FormsCache>) -> HttpResponse {
    let snapshot = cache.get_all().await;
    let origins = origin_stats(&snapshot);
    let now = Utc::now();
    HttpResponse::Ok().json(DashboardSummary {
        stats: stats(&snapshot),
        chart: origins.chart_slices(),
        origins,
        recent: recent(&snapshot, RECENT_DEFAULT)
            .iter()
            .map(|form| FormCard::from_record(form, now))
            .collect(),
    })
}
