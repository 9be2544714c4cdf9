use std::fmt::{Debug, Display, Formatter};

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

pub const CATALOGO_KEY: &str = "catalogo_produtos";
pub const CATALOGO_TTL_S: u64 = 60;

#[derive(Debug)]
pub struct PoolInitializationError(pub String);

impl Display for PoolInitializationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Every failure the API can answer with. Messages are the ones the
/// frontend already matches on, so they stay in Portuguese.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("Estoque insuficiente")]
    InsufficientStock,
    #[error("{0}")]
    InvalidState(String),
    #[error("erro no banco de dados: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("falha ao obter conexão com o banco de dados")]
    Pool,
    #[error("erro interno do servidor: {0}")]
    Internal(String),
}

impl ResponseError for ShopError {
    fn status_code(&self) -> StatusCode {
        match self {
            ShopError::NotFound(_) => StatusCode::NOT_FOUND,
            ShopError::Validation(_) | ShopError::InsufficientStock | ShopError::InvalidState(_) => {
                StatusCode::BAD_REQUEST
            }
            ShopError::Database(diesel::result::Error::NotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MesaStatus {
    Livre,
    Ocupada,
}

impl MesaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MesaStatus::Livre => "Livre",
            MesaStatus::Ocupada => "Ocupada",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Livre" => Some(MesaStatus::Livre),
            "Ocupada" => Some(MesaStatus::Ocupada),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PedidoStatus {
    Pendente,
    EmAndamento,
    Entregue,
    Cancelado,
}

impl PedidoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PedidoStatus::Pendente => "pendente",
            PedidoStatus::EmAndamento => "em-andamento",
            PedidoStatus::Entregue => "entregue",
            PedidoStatus::Cancelado => "cancelado",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pendente" => Some(PedidoStatus::Pendente),
            "em-andamento" => Some(PedidoStatus::EmAndamento),
            "entregue" => Some(PedidoStatus::Entregue),
            "cancelado" => Some(PedidoStatus::Cancelado),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origem {
    Online,
    Fisica,
}

impl Origem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origem::Online => "online",
            Origem::Fisica => "fisica",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pedido_status_round_trip() {
        for status in [
            PedidoStatus::Pendente,
            PedidoStatus::EmAndamento,
            PedidoStatus::Entregue,
            PedidoStatus::Cancelado,
        ] {
            assert_eq!(PedidoStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn pedido_status_rejects_unknown_values() {
        assert_eq!(PedidoStatus::parse("enviado"), None);
        assert_eq!(PedidoStatus::parse("Pendente"), None);
        assert_eq!(PedidoStatus::parse(""), None);
    }

    #[test]
    fn mesa_status_round_trip() {
        assert_eq!(MesaStatus::parse("Livre"), Some(MesaStatus::Livre));
        assert_eq!(MesaStatus::parse("Ocupada"), Some(MesaStatus::Ocupada));
        assert_eq!(MesaStatus::parse("livre"), None);
    }

    #[test]
    fn error_kinds_map_to_expected_status_codes() {
        assert_eq!(
            ShopError::NotFound("Carrinho não encontrado".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ShopError::Validation("Quantidade deve ser maior que zero".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ShopError::InsufficientStock.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ShopError::InvalidState("Carrinho vazio".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ShopError::Database(diesel::result::Error::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ShopError::Pool.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn error_response_body_carries_error_key() {
        let resp = ShopError::InsufficientStock.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Estoque insuficiente");
    }
}
