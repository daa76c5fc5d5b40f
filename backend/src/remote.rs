//! Client for the remote forms API.
//!
//! `FormsApi` is the seam the cache talks through: production uses
//! `HttpFormsApi` (reqwest), tests plug in an in-process fake.

use crate::error::FormsError;
use async_trait::async_trait;
use common::model::form::{FormPatch, FormRecord};
use common::model::sort::SortOrder;
use reqwest::{Client, Response, StatusCode, Url};
use std::time::Duration;

/// Operation being performed, used to word failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Fetch,
    Update,
    Delete,
}

impl Action {
    fn failure_message(self) -> &'static str {
        match self {
            Action::List => "Falha ao buscar dados",
            Action::Fetch => "Erro ao baixar dados",
            Action::Update => "Falha ao atualizar formulário",
            Action::Delete => "Falha ao excluir formulário",
        }
    }

    fn forbidden_message(self) -> &'static str {
        match self {
            Action::Delete => "Acesso negado. Apenas administradores podem excluir.",
            Action::Update => {
                "Acesso negado. Você não tem permissão para alterar este formulário."
            }
            Action::List | Action::Fetch => "Acesso negado.",
        }
    }
}

/// Maps a non-success status to the error taxonomy.
pub fn classify_status(status: StatusCode, action: Action) -> FormsError {
    match status {
        StatusCode::UNAUTHORIZED => FormsError::AuthExpired,
        StatusCode::FORBIDDEN => FormsError::Forbidden(action.forbidden_message().to_string()),
        other => FormsError::Remote(format!(
            "{}: {}",
            action.failure_message(),
            other.canonical_reason().unwrap_or(other.as_str())
        )),
    }
}

#[async_trait]
pub trait FormsApi: Send + Sync {
    /// `GET /formularios?ordem={order}`
    async fn list(&self, token: &str, order: SortOrder) -> Result<Vec<FormRecord>, FormsError>;

    /// `GET /formularios/{id}`
    async fn fetch(&self, token: &str, id: &str) -> Result<FormRecord, FormsError>;

    /// `PUT /formularios/{id}`; returns the server's representation.
    async fn update(
        &self,
        token: &str,
        id: &str,
        patch: &FormPatch,
    ) -> Result<FormRecord, FormsError>;

    /// `DELETE /formularios/{id}`
    async fn delete(&self, token: &str, id: &str) -> Result<(), FormsError>;
}

pub struct HttpFormsApi {
    client: Client,
    base_url: Url,
}

impl HttpFormsApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FormsError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FormsError::Remote(format!("Falha ao criar cliente HTTP: {}", e)))?;
        let raw = base_url.into();
        let base_url = Url::parse(&raw)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| FormsError::Remote(format!("URL base inválida: {}", raw)))?;
        Ok(Self { client, base_url })
    }

    fn url_with(&self, segments: &[&str]) -> Result<Url, FormsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FormsError::Remote(format!("URL base inválida: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn forms_url(&self) -> Result<Url, FormsError> {
        self.url_with(&["formularios"])
    }

    /// The id is pushed as a single percent-encoded path segment.
    fn form_url(&self, id: &str) -> Result<Url, FormsError> {
        if matches!(id.trim(), "" | "." | "..") {
            return Err(FormsError::Invalid(format!("Identificador inválido: {:?}", id)));
        }
        self.url_with(&["formularios", id])
    }
}

fn transport_error(action: Action, err: reqwest::Error) -> FormsError {
    FormsError::Remote(format!("{}: {}", action.failure_message(), err))
}

async fn check(
    response: Result<Response, reqwest::Error>,
    action: Action,
) -> Result<Response, FormsError> {
    let response = response.map_err(|e| transport_error(action, e))?;
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        log::warn!("forms API answered {} for {:?}", status, action);
        Err(classify_status(status, action))
    }
}

#[async_trait]
impl FormsApi for HttpFormsApi {
    async fn list(&self, token: &str, order: SortOrder) -> Result<Vec<FormRecord>, FormsError> {
        let response = self
            .client
            .get(self.forms_url()?)
            .query(&[("ordem", order.as_query())])
            .bearer_auth(token)
            .send()
            .await;
        check(response, Action::List)
            .await?
            .json::<Vec<FormRecord>>()
            .await
            .map_err(|e| transport_error(Action::List, e))
    }

    async fn fetch(&self, token: &str, id: &str) -> Result<FormRecord, FormsError> {
        let response = self
            .client
            .get(self.form_url(id)?)
            .bearer_auth(token)
            .send()
            .await;
        check(response, Action::Fetch)
            .await?
            .json::<FormRecord>()
            .await
            .map_err(|e| transport_error(Action::Fetch, e))
    }

    async fn update(
        &self,
        token: &str,
        id: &str,
        patch: &FormPatch,
    ) -> Result<FormRecord, FormsError> {
        let response = self
            .client
            .put(self.form_url(id)?)
            .bearer_auth(token)
            .json(patch)
            .send()
            .await;
        check(response, Action::Update)
            .await?
            .json::<FormRecord>()
            .await
            .map_err(|e| transport_error(Action::Update, e))
    }

    async fn delete(&self, token: &str, id: &str) -> Result<(), FormsError> {
        let response = self
            .client
            .delete(self.form_url(id)?)
            .bearer_auth(token)
            .send()
            .await;
        check(response, Action::Delete).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_auth_expired() {
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED, Action::List),
            FormsError::AuthExpired
        );
    }

    #[test]
    fn forbidden_delete_is_access_denied() {
        let err = classify_status(StatusCode::FORBIDDEN, Action::Delete);
        assert_eq!(
            err,
            FormsError::Forbidden("Acesso negado. Apenas administradores podem excluir.".into())
        );
    }

    #[test]
    fn other_statuses_are_remote_failures() {
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, Action::Update);
        assert_eq!(
            err,
            FormsError::Remote("Falha ao atualizar formulário: Internal Server Error".into())
        );
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, Action::Fetch).kind(),
            "remote"
        );
    }

    #[test]
    fn urls_are_built_from_the_base() {
        let api = HttpFormsApi::new("http://localhost:3000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.forms_url().unwrap().as_str(),
            "http://localhost:3000/api/formularios"
        );
        assert_eq!(
            api.form_url("abc").unwrap().as_str(),
            "http://localhost:3000/api/formularios/abc"
        );

        let bare = HttpFormsApi::new("http://localhost:3000/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            bare.form_url("abc").unwrap().as_str(),
            "http://localhost:3000/api/formularios/abc"
        );
    }

    #[test]
    fn form_ids_cannot_escape_their_path_segment() {
        let api = HttpFormsApi::new("http://localhost:3000/api", Duration::from_secs(1)).unwrap();
        let url = api.form_url("a?x=1").unwrap();
        assert_eq!(url.path(), "/api/formularios/a%3Fx=1");
        assert_eq!(url.query(), None);
        assert_eq!(
            api.form_url("a/b#c").unwrap().path(),
            "/api/formularios/a%2Fb%23c"
        );
        for id in ["", " ", ".", ".."] {
            assert!(matches!(api.form_url(id), Err(FormsError::Invalid(_))));
        }
    }

    #[test]
    fn base_url_must_be_absolute() {
        assert!(matches!(
            HttpFormsApi::new("localhost:3000", Duration::from_secs(1)),
            Err(FormsError::Remote(_))
        ));
        assert!(matches!(
            HttpFormsApi::new("/api", Duration::from_secs(1)),
            Err(FormsError::Remote(_))
        ));
    }
}
