//! RNC form record as served by the remote forms API.
//!
//! Field names on the wire are the Portuguese keys the remote API uses
//! (`titulo`, `criado_por`, `dadosRNC`, ...). Anything the model does not name
//! is kept in `extra` so a record can be re-serialized without losing data.

use crate::model::origin::{Origin, deserialize_optional_origin};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Label shown when the creator reference is missing (deleted user).
pub const DELETED_USER_LABEL: &str = "Usuário Deletado";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Draft,
    Pending,
    Completed,
}

impl FormStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FormStatus::Draft => "draft",
            FormStatus::Pending => "pending",
            FormStatus::Completed => "completed",
        }
    }

    /// Portuguese label shown on cards and reports.
    pub fn label(self) -> &'static str {
        match self {
            FormStatus::Draft => "Rascunho",
            FormStatus::Pending => "Pendente",
            FormStatus::Completed => "Concluído",
        }
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(FormStatus::Draft),
            "pending" => Ok(FormStatus::Pending),
            "completed" => Ok(FormStatus::Completed),
            other => Err(format!("Status desconhecido: {}", other)),
        }
    }
}

/// Reference to the user that created a form. Populated by the API, may be
/// missing entirely when the user was deleted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Creator {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Photo attached to an RNC ("registro iconográfico").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Photo {
    /// Base64 payload, usually a `data:image/...;base64,` URL.
    #[serde(rename = "imagemBase64", default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Domain payload of a non-conformity report (`dadosRNC`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RncData {
    #[serde(
        rename = "origem",
        default,
        deserialize_with = "deserialize_optional_origin",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<Origin>,
    #[serde(rename = "desc_ocorrencia", default, skip_serializing_if = "Option::is_none")]
    pub occurrence_description: Option<String>,
    #[serde(
        rename = "numero_rnc",
        default,
        deserialize_with = "deserialize_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<String>,
    #[serde(rename = "data_abertura", default, skip_serializing_if = "Option::is_none")]
    pub opened_on: Option<String>,
    #[serde(rename = "data_fechamento", default, skip_serializing_if = "Option::is_none")]
    pub closed_on: Option<String>,
    #[serde(rename = "responsavel_nome", default, skip_serializing_if = "Option::is_none")]
    pub responsible_name: Option<String>,
    #[serde(rename = "responsavel_cargo", default, skip_serializing_if = "Option::is_none")]
    pub responsible_role: Option<String>,
    #[serde(rename = "responsavel_setor", default, skip_serializing_if = "Option::is_none")]
    pub responsible_sector: Option<String>,
    #[serde(rename = "responsavel_matricula", default, skip_serializing_if = "Option::is_none")]
    pub responsible_registration: Option<String>,
    #[serde(rename = "desc_nao_conformidade", default, skip_serializing_if = "Option::is_none")]
    pub nonconformity_description: Option<String>,
    #[serde(rename = "referencias_normativas", default, skip_serializing_if = "Option::is_none")]
    pub normative_references: Option<String>,
    #[serde(rename = "acoes_corretivas", default, skip_serializing_if = "Option::is_none")]
    pub corrective_actions: Option<String>,
    #[serde(rename = "responsavel_acoes", default, skip_serializing_if = "Option::is_none")]
    pub corrective_owner: Option<String>,
    #[serde(rename = "acoes_preventivas", default, skip_serializing_if = "Option::is_none")]
    pub preventive_actions: Option<String>,
    #[serde(rename = "responsavel_acoes_prev", default, skip_serializing_if = "Option::is_none")]
    pub preventive_owner: Option<String>,
    #[serde(rename = "registrosIconograficos", default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single RNC form as returned by `GET /formularios`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "titulo", default, deserialize_with = "deserialize_null_as_empty")]
    pub title: String,
    #[serde(rename = "descricao", default, deserialize_with = "deserialize_null_as_empty")]
    pub description: String,
    pub status: FormStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "criado_por", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Creator>,
    #[serde(rename = "dadosRNC", default, skip_serializing_if = "Option::is_none")]
    pub rnc: Option<RncData>,
    #[serde(
        rename = "numero_sequencial",
        default,
        deserialize_with = "deserialize_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sequence_number: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormRecord {
    pub fn origin(&self) -> Option<&Origin> {
        self.rnc.as_ref().and_then(|rnc| rnc.origin.as_ref())
    }

    pub fn occurrence_description(&self) -> Option<&str> {
        self.rnc
            .as_ref()
            .and_then(|rnc| rnc.occurrence_description.as_deref())
            .filter(|text| !text.is_empty())
    }

    /// Creator name, if the reference and its name are present.
    pub fn creator_name(&self) -> Option<&str> {
        self.created_by
            .as_ref()
            .and_then(|creator| creator.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Creator name with the deleted-user fallback applied.
    pub fn creator_display_name(&self) -> &str {
        self.creator_name().unwrap_or(DELETED_USER_LABEL)
    }

    /// RNC number for reports: `numero_rnc`, then `numero_sequencial`.
    pub fn rnc_number(&self) -> Option<&str> {
        self.rnc
            .as_ref()
            .and_then(|rnc| rnc.number.as_deref())
            .or(self.sequence_number.as_deref())
    }
}

/// Partial update sent with `PUT /formularios/{id}` by the quick-edit dialog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormPatch {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FormStatus>,
}

impl FormPatch {
    /// Trims text fields and rejects a blank title.
    pub fn normalized(self) -> Result<Self, String> {
        let title = self.title.map(|t| t.trim().to_string());
        if matches!(title.as_deref(), Some("")) {
            return Err("Título é obrigatório!".to_string());
        }
        Ok(Self {
            title,
            description: self.description.map(|d| d.trim().to_string()),
            status: self.status,
        })
    }
}

/// Accepts either a JSON string or number, since older records stored the
/// RNC number as an integer.
fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Older records carry `null` instead of an empty string.
fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
