//! The handler-layer response type and error mapping.

use http::StatusCode;
use loja_commerce::CommerceError;
use serde_json::{json, Value};
use tracing::error;

/// What a handler hands back to the transport: a status code and a JSON body.
///
/// `204 No Content` carries `Value::Null`; every other response carries an
/// object or array.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// JSON body.
    pub body: Value,
}

impl ApiResponse {
    /// `200 OK` with the given body.
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// `201 Created` with the given body.
    pub fn created(body: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }

    /// `202 Accepted` with the given body.
    pub fn accepted(body: Value) -> Self {
        Self {
            status: StatusCode::ACCEPTED,
            body,
        }
    }

    /// `204 No Content`.
    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: Value::Null,
        }
    }

    /// `400 Bad Request` with `{"error": ..}`.
    pub fn bad_request(error: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": error }),
        }
    }

    /// `400 Bad Request` with the two-field `{"error", "message"}` body the
    /// wire contract uses for field validation.
    pub fn invalid(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": "Dados inválidos", "message": message }),
        }
    }

    /// `404 Not Found` with `{"error": ..}`.
    pub fn not_found(error: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: json!({ "error": error }),
        }
    }

    /// `500 Internal Server Error`. The body stays generic; the cause goes to
    /// the log, and onto the body only when `expose_detail` is set.
    pub fn internal(detail: &str, expose_detail: bool) -> Self {
        error!(detail, "internal error surfaced to the API layer");
        let body = if expose_detail {
            json!({ "error": "Erro interno", "message": detail })
        } else {
            json!({ "error": "Erro interno" })
        };
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body,
        }
    }

    /// Map a commerce failure onto the wire contract.
    ///
    /// Every domain variant has a fixed status and Portuguese body; only the
    /// `Overflow`/`Storage` fallthrough reaches 500, and its text is withheld
    /// unless `expose_detail` is set.
    pub fn from_commerce(err: &CommerceError, expose_detail: bool) -> Self {
        match err {
            CommerceError::ProductNotFound(_) => Self::not_found("Produto não encontrado"),
            CommerceError::CustomerNotFound(_) => Self::not_found("Cliente não encontrado"),
            CommerceError::CartLineNotFound(_) => Self::not_found("Item não encontrado"),
            CommerceError::PurchaseNotFound(_) => Self::not_found("Compra não encontrada"),
            CommerceError::CustomerNotActive(_) => Self::bad_request("Cliente inativo"),
            CommerceError::EmptyCart(_) => Self::bad_request("Carrinho vazio"),
            CommerceError::InvalidQuantity(_) => {
                Self::invalid("A quantidade deve ser maior que 0")
            }
            CommerceError::InsufficientStock { .. } => {
                Self::invalid("Quantidade maior que o estoque")
            }
            CommerceError::DuplicateTaxId(_) => Self::invalid("CPF/CNPJ já cadastrado"),
            CommerceError::DuplicateEmail(_) => Self::invalid("Email já cadastrado"),
            CommerceError::DiscountOutOfRange(_) => Self::invalid("Desconto inválido"),
            CommerceError::Validation(message) => Self::invalid(message),
            CommerceError::Overflow | CommerceError::Storage(_) => {
                Self::internal(&err.to_string(), expose_detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loja_commerce::ids::{CustomerId, ProductId};

    #[test]
    fn test_not_found_mapping() {
        let resp = ApiResponse::from_commerce(
            &CommerceError::ProductNotFound(ProductId::generate()),
            false,
        );
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.body["error"], "Produto não encontrado");
    }

    #[test]
    fn test_insufficient_stock_maps_to_validation_body() {
        let resp = ApiResponse::from_commerce(
            &CommerceError::InsufficientStock {
                product_id: ProductId::generate(),
                requested: 5,
                available: 2,
            },
            false,
        );
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["error"], "Dados inválidos");
        assert_eq!(resp.body["message"], "Quantidade maior que o estoque");
    }

    #[test]
    fn test_internal_error_body_is_generic_by_default() {
        let resp = ApiResponse::from_commerce(&CommerceError::Overflow, false);
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.body, serde_json::json!({ "error": "Erro interno" }));
    }

    #[test]
    fn test_internal_error_detail_is_opt_in() {
        let resp = ApiResponse::from_commerce(
            &CommerceError::Storage("disk on fire".to_string()),
            true,
        );
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.body["message"]
            .as_str()
            .is_some_and(|m| m.contains("disk on fire")));
    }

    #[test]
    fn test_inactive_customer_is_bad_request() {
        let resp = ApiResponse::from_commerce(
            &CommerceError::CustomerNotActive(CustomerId::new(1)),
            false,
        );
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["error"], "Cliente inativo");
    }
}
