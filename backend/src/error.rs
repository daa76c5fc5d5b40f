//! Error taxonomy shared by the cache, the exports and the HTTP handlers.
//!
//! Every cache operation returns `Result<_, FormsError>`; the variants map
//! one-to-one to what the dashboard must do next (redirect to login, show an
//! access-denied toast, show a generic failure). Messages are user-facing.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::requests::ErrorBody;
use thiserror::Error;

/// Where the dashboard sends the user when the session is gone.
pub const LOGIN_REDIRECT: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormsError {
    /// 401 from the remote API, or no token stored at all.
    #[error("Sessão expirada. Faça login novamente.")]
    AuthExpired,
    /// 403 from the remote API.
    #[error("{0}")]
    Forbidden(String),
    #[error("Formulário não encontrado: {0}")]
    NotFound(String),
    /// Rejected before reaching the remote API.
    #[error("{0}")]
    Invalid(String),
    /// Transport failure, undecodable body or any other non-2xx status.
    #[error("{0}")]
    Remote(String),
}

impl FormsError {
    pub fn kind(&self) -> &'static str {
        match self {
            FormsError::AuthExpired => "authExpired",
            FormsError::Forbidden(_) => "forbidden",
            FormsError::NotFound(_) => "notFound",
            FormsError::Invalid(_) => "invalid",
            FormsError::Remote(_) => "remote",
        }
    }

    fn body(&self) -> ErrorBody {
        ErrorBody {
            kind: self.kind().to_string(),
            message: self.to_string(),
            redirect: matches!(self, FormsError::AuthExpired).then(|| LOGIN_REDIRECT.to_string()),
        }
    }
}

impl ResponseError for FormsError {
    fn status_code(&self) -> StatusCode {
        match self {
            FormsError::AuthExpired => StatusCode::UNAUTHORIZED,
            FormsError::Forbidden(_) => StatusCode::FORBIDDEN,
            FormsError::NotFound(_) => StatusCode::NOT_FOUND,
            FormsError::Invalid(_) => StatusCode::BAD_REQUEST,
            FormsError::Remote(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// Failures while producing an exported artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Forms(#[from] FormsError),
    #[error("{0}")]
    Invalid(String),
    #[error("Erro ao gerar CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Erro ao gerar JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Erro ao gerar PDF: {0}")]
    Pdf(#[from] genpdf::error::Error),
    #[error("Erro ao processar imagem: {0}")]
    Image(#[from] image::ImageError),
    #[error("Erro ao codificar imagem: {0}")]
    Png(#[from] png::EncodingError),
    #[error("Imagem em base64 inválida: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),
    #[error("Falha na geração do relatório: {0}")]
    Task(String),
}

impl ResponseError for ExportError {
    fn status_code(&self) -> StatusCode {
        match self {
            ExportError::Forms(inner) => inner.status_code(),
            ExportError::Invalid(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ExportError::Forms(inner) = self {
            return inner.error_response();
        }
        let kind = match self {
            ExportError::Invalid(_) => "invalid",
            _ => "export",
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            kind: kind.to_string(),
            message: self.to_string(),
            redirect: None,
        })
    }
}

/// Failures of the session key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("corrupt session value: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session store lock poisoned")]
    Poisoned,
}

impl ResponseError for StoreError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().json(ErrorBody {
            kind: "session".to_string(),
            message: self.to_string(),
            redirect: None,
        })
    }
}
