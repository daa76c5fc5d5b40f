//! Card view of a form as listed on the dashboard grid and in the
//! "recent forms" panel.

use crate::model::form::{FormRecord, FormStatus};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

const DESCRIPTION_EXCERPT_CHARS: usize = 100;
const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCard {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub status: FormStatus,
    pub status_label: String,
    pub created_by: String,
    pub origin: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub updated_label: String,
}

impl FormCard {
    pub fn from_record(form: &FormRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: form.id.clone(),
            title: form.title.clone(),
            excerpt: description_excerpt(form),
            status: form.status,
            status_label: form.status.label().to_string(),
            created_by: form.creator_display_name().to_string(),
            origin: form.origin().map(|o| o.as_str().to_string()),
            updated_at: form.updated_at,
            updated_label: relative_date_label(form.updated_at, now),
        }
    }
}

/// Occurrence description, then description, then a placeholder, cut at
/// 100 characters.
pub fn description_excerpt(form: &FormRecord) -> String {
    let text = form
        .occurrence_description()
        .or(Some(form.description.as_str()).filter(|d| !d.is_empty()))
        .unwrap_or("Sem descrição");
    truncate_with_ellipsis(text, DESCRIPTION_EXCERPT_CHARS)
}

/// Keeps the first `max_chars` characters and appends `...` when cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

/// "Hoje" within the first day, "Ontem" within the second, "N dias atrás"
/// up to a week, otherwise the local date as `dd/mm/yyyy`.
pub fn relative_date_label(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - date).num_milliseconds().abs();
    let days = (elapsed + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    match days {
        0 | 1 => "Hoje".to_string(),
        2 => "Ontem".to_string(),
        3..=7 => format!("{} dias atrás", days - 1),
        _ => date.with_timezone(&Local).format("%d/%m/%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn form(description: &str, occurrence: Option<&str>) -> FormRecord {
        let mut raw = json!({
            "_id": "a",
            "titulo": "Título",
            "descricao": description,
            "status": "draft",
            "createdAt": "2025-01-01T12:00:00Z",
            "updatedAt": "2025-01-02T12:00:00Z"
        });
        if let Some(text) = occurrence {
            raw["dadosRNC"] = json!({ "desc_ocorrencia": text });
        }
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn excerpt_prefers_occurrence_description() {
        assert_eq!(description_excerpt(&form("desc", Some("ocorrência"))), "ocorrência");
        assert_eq!(description_excerpt(&form("desc", None)), "desc");
        assert_eq!(description_excerpt(&form("", None)), "Sem descrição");
    }

    #[test]
    fn excerpt_is_cut_at_one_hundred_chars() {
        let long = "é".repeat(120);
        let excerpt = description_excerpt(&form(&long, None));
        assert_eq!(excerpt.chars().count(), 103);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn relative_labels() {
        let now = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        assert_eq!(relative_date_label(now, now), "Hoje");
        assert_eq!(relative_date_label(now - Duration::hours(5), now), "Hoje");
        assert_eq!(relative_date_label(now - Duration::hours(30), now), "Ontem");
        assert_eq!(relative_date_label(now - Duration::days(4), now), "4 dias atrás");
        assert_eq!(
            relative_date_label(Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(), now),
            "01/05/2025"
        );
    }

    #[test]
    fn card_carries_display_fields() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 13, 0, 0).unwrap();
        let card = FormCard::from_record(&form("desc", None), now);
        assert_eq!(card.status_label, "Rascunho");
        assert_eq!(card.created_by, "Usuário Deletado");
        assert_eq!(card.updated_label, "Hoje");
        assert_eq!(card.origin, None);
    }
}
