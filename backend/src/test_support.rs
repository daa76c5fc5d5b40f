use crate::cache::FormsCache;
use crate::error::FormsError;
use crate::remote::FormsApi;
use crate::session::TokenSupplier;
use actix_web::web;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use common::model::form::{FormPatch, FormRecord, FormStatus};
use common::model::sort::SortOrder;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn form(id: &str, status: FormStatus) -> FormRecord {
    form_with_origin(id, status, None)
}

pub fn form_with_origin(id: &str, status: FormStatus, origin: Option<&str>) -> FormRecord {
    serde_json::from_value(json!({
        "_id": id,
        "titulo": format!("Formulário {}", id),
        "descricao": "sem detalhes",
        "status": status.as_str(),
        "createdAt": "2025-01-10T12:00:00Z",
        "updatedAt": "2025-01-10T12:00:00Z",
        "criado_por": { "_id": "u1", "nome": "Ana Souza" },
        "dadosRNC": {
            "origem": origin.unwrap_or(""),
            "desc_ocorrencia": format!("ocorrência de {}", id),
            "numero_rnc": "7",
            "responsavel_nome": "Carlos Pereira"
        }
    }))
    .unwrap()
}

pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn some(token: &str) -> Self {
        Self(Some(token.to_string()))
    }
}

impl TokenSupplier for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A cache already loaded from `api`, ready to register as app data.
pub async fn loaded_cache(api: Arc<FakeApi>) -> web::Data<FormsCache> {
    let cache = FormsCache::new(api, Arc::new(StaticToken::some("token")));
    cache.load(SortOrder::Recent).await.unwrap();
    web::Data::new(cache)
}

/// In-process stand-in for the remote forms API.
#[derive(Default)]
pub struct FakeApi {
    server: Mutex<Vec<FormRecord>>,
    failure: Mutex<Option<FormsError>>,
    calls: AtomicUsize,
    gate: Option<(SortOrder, Arc<Notify>)>,
}

impl FakeApi {
    pub fn with_forms(forms: Vec<FormRecord>) -> Self {
        Self {
            server: Mutex::new(forms),
            ..Default::default()
        }
    }

    /// Lists in `order` wait for `gate` before reading the server data.
    pub fn gated(forms: Vec<FormRecord>, order: SortOrder, gate: Arc<Notify>) -> Self {
        Self {
            server: Mutex::new(forms),
            gate: Some((order, gate)),
            ..Default::default()
        }
    }

    pub fn replace_forms(&self, forms: Vec<FormRecord>) {
        *self.server.lock().unwrap() = forms;
    }

    pub fn server_forms(&self) -> Vec<FormRecord> {
        self.server.lock().unwrap().clone()
    }

    /// Every following call fails with `err`.
    pub fn fail_with(&self, err: FormsError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self, token: &str) -> Result<(), FormsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(!token.is_empty());
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn missing(id: &str) -> FormsError {
        FormsError::Remote(format!("Erro ao baixar dados: {} not found", id))
    }
}

#[async_trait]
impl FormsApi for FakeApi {
    async fn list(&self, token: &str, order: SortOrder) -> Result<Vec<FormRecord>, FormsError> {
        if let Some((gated, gate)) = &self.gate {
            if *gated == order {
                gate.notified().await;
            }
        }
        self.begin(token)?;
        Ok(self.server_forms())
    }

    async fn fetch(&self, token: &str, id: &str) -> Result<FormRecord, FormsError> {
        self.begin(token)?;
        self.server_forms()
            .into_iter()
            .find(|f| f.id == id)
            .ok_or_else(|| Self::missing(id))
    }

    async fn update(
        &self,
        token: &str,
        id: &str,
        patch: &FormPatch,
    ) -> Result<FormRecord, FormsError> {
        self.begin(token)?;
        let mut server = self.server.lock().unwrap();
        let record = server
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| Self::missing(id))?;
        if let Some(title) = &patch.title {
            record.title = title.clone();
        }
        if let Some(description) = &patch.description {
            record.description = description.clone();
        }
        if let Some(status) = patch.status {
            record.status = status;
        }
        record.updated_at = Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 0).unwrap();
        // server-side bookkeeping the patch never mentions
        record.extra.insert("revisado_por".to_string(), json!("u1"));
        Ok(record.clone())
    }

    async fn delete(&self, token: &str, id: &str) -> Result<(), FormsError> {
        self.begin(token)?;
        let mut server = self.server.lock().unwrap();
        let before = server.len();
        server.retain(|f| f.id != id);
        if server.len() == before {
            return Err(Self::missing(id));
        }
        Ok(())
    }
}
