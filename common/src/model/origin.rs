use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Value stored by the forms UI when the user picks "Outro" and leaves the
/// free-text field empty. It is also the key of the catch-all bucket.
pub const OTHER_SENTINEL: &str = "outro";

/// Fixed classification of what triggered an RNC record.
///
/// The wire labels are the exact values the RNC form stores in
/// `dadosRNC.origem`, including their inconsistent capitalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OriginCategory {
    Process,
    ChemicalAccident,
    AccidentIncident,
    EventAttendance,
    EmergencyResponse,
    UnfoundedEmergencyCall,
    Complaint,
    Fire,
    ChemicalIncident,
    SafetyInspection,
    IncipientFire,
    FireProjectReview,
    SafetyTraining,
    WaterSteamLeak,
}

impl OriginCategory {
    /// Every category in the order the dashboard lists them.
    pub const ALL: [OriginCategory; 14] = [
        OriginCategory::Process,
        OriginCategory::ChemicalAccident,
        OriginCategory::AccidentIncident,
        OriginCategory::EventAttendance,
        OriginCategory::EmergencyResponse,
        OriginCategory::UnfoundedEmergencyCall,
        OriginCategory::Complaint,
        OriginCategory::Fire,
        OriginCategory::ChemicalIncident,
        OriginCategory::SafetyInspection,
        OriginCategory::IncipientFire,
        OriginCategory::FireProjectReview,
        OriginCategory::SafetyTraining,
        OriginCategory::WaterSteamLeak,
    ];

    /// Label as stored by the remote API.
    pub fn wire_label(self) -> &'static str {
        match self {
            OriginCategory::Process => "Processo",
            OriginCategory::ChemicalAccident => "Acidente Químico",
            OriginCategory::AccidentIncident => "Acidente/ incidente",
            OriginCategory::EventAttendance => "BC-Atendimento de eventos",
            OriginCategory::EmergencyResponse => "Atendimento de Emergência",
            OriginCategory::UnfoundedEmergencyCall => "Chamado de Emergência improcedente",
            OriginCategory::Complaint => "Denuncia",
            OriginCategory::Fire => "Incêndio",
            OriginCategory::ChemicalIncident => "Incidente Químico",
            OriginCategory::SafetyInspection => "Inspeção de Segurança",
            OriginCategory::IncipientFire => "Princípio de incêndio",
            OriginCategory::FireProjectReview => "Rev./projeto_incêndio",
            OriginCategory::SafetyTraining => "Treinamento SST",
            OriginCategory::WaterSteamLeak => "Vazamento de água/vapor",
        }
    }

    /// Shorter label used by the origin chart legend.
    pub fn chart_label(self) -> &'static str {
        match self {
            OriginCategory::Process => "Processo",
            OriginCategory::ChemicalAccident => "Acidente Químico",
            OriginCategory::AccidentIncident => "Acidente / Incidente",
            OriginCategory::EventAttendance => "BC-Atendimento de eventos",
            OriginCategory::EmergencyResponse => "Atendimento de Emergência",
            OriginCategory::UnfoundedEmergencyCall => "Chamado Improd.",
            OriginCategory::Complaint => "Denúncia",
            OriginCategory::Fire => "Incêndio",
            OriginCategory::ChemicalIncident => "Incidente Químico",
            OriginCategory::SafetyInspection => "Inspeção de Segurança",
            OriginCategory::IncipientFire => "Princípio de Incêndio",
            OriginCategory::FireProjectReview => "Rev./Proj. Incêndio",
            OriginCategory::SafetyTraining => "Treinamento SST",
            OriginCategory::WaterSteamLeak => "Vazamento Água/Vapor",
        }
    }

    /// Exact lookup by wire label.
    pub fn from_wire_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.wire_label() == label)
    }
}

impl fmt::Display for OriginCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

/// Origin of an RNC record, classified once when the record is ingested.
///
/// `Other` keeps the raw text: either the `outro` sentinel or whatever the
/// user typed in the free-text field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    Known(OriginCategory),
    Other(String),
}

impl Origin {
    /// Classifies a raw `origem` value. Empty or blank values carry no origin.
    pub fn classify(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        Some(match OriginCategory::from_wire_label(raw) {
            Some(category) => Origin::Known(category),
            None => Origin::Other(raw.to_string()),
        })
    }

    /// Raw value as stored by the remote API.
    pub fn as_str(&self) -> &str {
        match self {
            Origin::Known(category) => category.wire_label(),
            Origin::Other(text) => text,
        }
    }

    pub fn bucket(&self) -> OriginBucket {
        match self {
            Origin::Known(category) => OriginBucket::Category(*category),
            Origin::Other(_) => OriginBucket::Other,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Origin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Deserializes an optional `origem` field, mapping blank strings to `None`.
pub(crate) fn deserialize_optional_origin<'de, D>(
    deserializer: D,
) -> Result<Option<Origin>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Origin::classify))
}

/// Aggregation bucket for origin statistics: one per category plus `outro`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OriginBucket {
    Category(OriginCategory),
    Other,
}

impl OriginBucket {
    /// Every bucket, categories first and `outro` last.
    pub fn all() -> impl Iterator<Item = OriginBucket> {
        OriginCategory::ALL
            .into_iter()
            .map(OriginBucket::Category)
            .chain(std::iter::once(OriginBucket::Other))
    }

    pub fn key(self) -> &'static str {
        match self {
            OriginBucket::Category(category) => category.wire_label(),
            OriginBucket::Other => OTHER_SENTINEL,
        }
    }

    pub fn chart_label(self) -> &'static str {
        match self {
            OriginBucket::Category(category) => category.chart_label(),
            OriginBucket::Other => "Outro",
        }
    }
}
