//! Selection and aggregation behind the monthly SST report.

use crate::model::card::truncate_with_ellipsis;
use crate::model::form::{FormRecord, FormStatus};
use chrono::{DateTime, Datelike, Local, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})/(\d{4})\s*$").expect("PERIOD pattern failed")
});

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const TITLE_MAX_CHARS: usize = 50;
const TITLE_CUT_CHARS: usize = 47;
const RESPONSIBLE_MAX_CHARS: usize = 15;

/// A calendar month in the local time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySelection {
    month: u32,
    year: i32,
}

impl MonthlySelection {
    pub fn new(month: u32, year: i32) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("Mês inválido: {}", month));
        }
        Ok(Self { month, year })
    }

    /// Parses the `MM/AAAA` format of the report prompt, e.g. `03/2025`.
    pub fn parse(input: &str) -> Result<Self, String> {
        let caps = PERIOD
            .captures(input)
            .ok_or_else(|| "Formato inválido. Use MM/AAAA (ex: 12/2025)".to_string())?;
        let month = caps[1].parse::<u32>().map_err(|e| e.to_string())?;
        let year = caps[2].parse::<i32>().map_err(|e| e.to_string())?;
        Self::new(month, year)
    }

    /// The month containing the current local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            month: today.month(),
            year: today.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// "Março de 2025"
    pub fn period_label(&self) -> String {
        format!("{} de {}", self.month_name(), self.year)
    }

    /// Download name of the rendered report.
    pub fn file_name(&self) -> String {
        format!("Relatorio_{}_{}.pdf", self.month_name(), self.year)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&Local);
        local.month() == self.month && local.year() == self.year
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthlySummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub drafts: usize,
}

/// One line of the report's detail table, already shortened for the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRow {
    pub created_on: String,
    pub title: String,
    pub origin: String,
    pub status: String,
    pub responsible: String,
}

impl MonthlyRow {
    fn from_record(form: &FormRecord) -> Self {
        let title = if form.title.is_empty() {
            "Sem Título".to_string()
        } else if form.title.chars().count() > TITLE_MAX_CHARS {
            truncate_with_ellipsis(&form.title, TITLE_CUT_CHARS)
        } else {
            form.title.clone()
        };
        let responsible = match form.creator_name() {
            Some(name) if name.chars().count() > RESPONSIBLE_MAX_CHARS => {
                let mut cut: String = name.chars().take(RESPONSIBLE_MAX_CHARS).collect();
                cut.push('.');
                cut
            }
            Some(name) => name.to_string(),
            None => "-".to_string(),
        };
        Self {
            created_on: form
                .created_at
                .with_timezone(&Local)
                .format("%d/%m/%Y")
                .to_string(),
            title,
            origin: form
                .origin()
                .map(|o| o.as_str().to_string())
                .unwrap_or_else(|| "Não Informado".to_string()),
            status: form.status.label().to_string(),
            responsible,
        }
    }
}

/// Records created in the selected month, with summary counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    pub selection: MonthlySelection,
    pub summary: MonthlySummary,
    pub rows: Vec<MonthlyRow>,
}

impl MonthlyReport {
    pub fn build(snapshot: &[FormRecord], selection: MonthlySelection) -> Self {
        let in_month: Vec<&FormRecord> = snapshot
            .iter()
            .filter(|form| selection.contains(form.created_at))
            .collect();
        let count = |status: FormStatus| in_month.iter().filter(|f| f.status == status).count();
        Self {
            selection,
            summary: MonthlySummary {
                total: in_month.len(),
                completed: count(FormStatus::Completed),
                pending: count(FormStatus::Pending),
                drafts: count(FormStatus::Draft),
            },
            rows: in_month.into_iter().map(MonthlyRow::from_record).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::form;
    use chrono::TimeZone;

    fn created(id: &str, status: &str, y: i32, m: u32, d: u32) -> FormRecord {
        let mut form = form(id, id, status, Some("Incêndio"), Some("Ana"));
        form.created_at = Local
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        form
    }

    #[test]
    fn parses_month_and_year() {
        let selection = MonthlySelection::parse("03/2025").unwrap();
        assert_eq!((selection.month(), selection.year()), (3, 2025));
        assert_eq!(selection.file_name(), "Relatorio_Março_2025.pdf");
        assert_eq!(MonthlySelection::parse(" 7/2024 ").unwrap().month_name(), "Julho");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(MonthlySelection::parse("2025-03").is_err());
        assert!(MonthlySelection::parse("13/2025").is_err());
        assert!(MonthlySelection::parse("00/2025").is_err());
        assert!(MonthlySelection::parse("").is_err());
    }

    #[test]
    fn selects_only_the_requested_month() {
        let snapshot = vec![
            created("a", "completed", 2025, 3, 1),
            created("b", "pending", 2025, 3, 31),
            created("c", "draft", 2025, 4, 1),
            created("d", "draft", 2024, 3, 15),
            created("e", "draft", 2025, 3, 10),
        ];
        let report = MonthlyReport::build(&snapshot, MonthlySelection::new(3, 2025).unwrap());
        assert_eq!(
            report.summary,
            MonthlySummary {
                total: 3,
                completed: 1,
                pending: 1,
                drafts: 1
            }
        );
        let titles: Vec<_> = report.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "e"]);
        assert_eq!(report.rows[0].created_on, "01/03/2025");
        assert_eq!(report.rows[0].status, "Concluído");
        assert_eq!(report.rows[0].origin, "Incêndio");
    }

    #[test]
    fn rows_are_shortened_for_the_table() {
        let mut long = created("x", "pending", 2025, 3, 2);
        long.title = "t".repeat(60);
        long.created_by = None;
        long.rnc = None;
        let row = MonthlyRow::from_record(&long);
        assert_eq!(row.title.chars().count(), 50);
        assert!(row.title.ends_with("..."));
        assert_eq!(row.responsible, "-");
        assert_eq!(row.origin, "Não Informado");

        let mut named = created("y", "pending", 2025, 3, 2);
        named.created_by.as_mut().unwrap().name = Some("Maria Aparecida da Silva".to_string());
        assert_eq!(MonthlyRow::from_record(&named).responsible, "Maria Aparecida.");
    }

    #[test]
    fn empty_month_has_no_rows() {
        let report = MonthlyReport::build(&[], MonthlySelection::new(1, 2026).unwrap());
        assert_eq!(report.summary.total, 0);
        assert!(report.rows.is_empty());
    }
}
