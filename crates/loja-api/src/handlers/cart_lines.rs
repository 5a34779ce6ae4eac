//! `/itens_carrinho` handlers.

use crate::response::ApiResponse;
use crate::router::{query_param, Api};
use crate::handlers::{int_field, str_field};
use loja_commerce::cart::CartLine;
use loja_commerce::catalog::Product;
use loja_commerce::ids::{CartLineId, CustomerId, ProductId};
use loja_commerce::repo::Store;
use serde_json::{json, Value};

fn line_json(line: &CartLine, product: &Product) -> Value {
    json!({
        "id": line.id,
        "produto": {
            "id": product.id,
            "nome": product.name,
            "preco": product.price,
            "desconto": product.discount_percent,
        },
        "quantidade": line.quantity,
    })
}

fn parse_id(id: &str) -> Result<CartLineId, ApiResponse> {
    CartLineId::parse(id).map_err(|_| ApiResponse::not_found("Item não encontrado"))
}

pub(crate) fn list<S: Store + 'static>(api: &Api<S>, query: &str) -> ApiResponse {
    let Some(raw) = query_param(query, "id_cliente") else {
        return ApiResponse::bad_request("Cliente ID não informado");
    };
    let Ok(customer_id) = CustomerId::parse(raw) else {
        return ApiResponse::not_found("Cliente não encontrado");
    };
    if let Err(e) = api.store.customer(customer_id) {
        return api.fail(&e);
    }

    let lines = match api.cart.lines(customer_id) {
        Ok(lines) => lines,
        Err(e) => return api.fail(&e),
    };
    let mut data = Vec::with_capacity(lines.len());
    for line in &lines {
        match api.catalog.product(&line.product_id) {
            Ok(product) => data.push(line_json(line, &product)),
            Err(e) => return api.fail(&e),
        }
    }
    ApiResponse::ok(Value::Array(data))
}

pub(crate) fn retrieve<S: Store + 'static>(api: &Api<S>, id: &str) -> ApiResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let line = match api.cart.line(id) {
        Ok(line) => line,
        Err(e) => return api.fail(&e),
    };
    match api.catalog.product(&line.product_id) {
        Ok(product) => ApiResponse::ok(line_json(&line, &product)),
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn create<S: Store + 'static>(api: &Api<S>, body: Option<&Value>) -> ApiResponse {
    let Some(body) = body else {
        return ApiResponse::bad_request("Dados inválidos");
    };
    let (Some(cliente_id), Some(produto_id), Some(quantidade)) = (
        int_field(body, "cliente_id"),
        str_field(body, "produto_id"),
        int_field(body, "quantidade"),
    ) else {
        return ApiResponse::bad_request("Dados inválidos");
    };
    if quantidade <= 0 {
        return ApiResponse::invalid("A quantidade deve ser maior que 0");
    }
    let Ok(customer_id) = u64::try_from(cliente_id).map(CustomerId::new) else {
        return ApiResponse::not_found("Cliente não encontrado");
    };
    let customer = match api.store.customer(customer_id) {
        Ok(customer) => customer,
        Err(e) => return api.fail(&e),
    };
    if !customer.active {
        return ApiResponse::bad_request("Cliente inativo");
    }
    let Ok(product_id) = ProductId::parse(produto_id) else {
        return ApiResponse::not_found("Produto não encontrado");
    };
    let product = match api.catalog.product(&product_id) {
        Ok(product) => product,
        Err(e) => return api.fail(&e),
    };
    if quantidade > product.stock {
        return ApiResponse::bad_request("Estoque insuficiente");
    }

    match api.cart.update_cart(customer_id, &product_id, quantidade) {
        Ok(_) => ApiResponse::ok(json!({ "message": "Item adicionado ao carrinho" })),
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn update<S: Store + 'static>(
    api: &Api<S>,
    id: &str,
    body: Option<&Value>,
) -> ApiResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Some(body) = body else {
        return ApiResponse::bad_request("Dados inválidos");
    };
    let (Some(cliente_id), Some(quantidade)) =
        (int_field(body, "cliente_id"), int_field(body, "quantidade"))
    else {
        return ApiResponse::bad_request("Dados inválidos");
    };
    if quantidade < 0 {
        return ApiResponse::invalid("A quantidade não pode ser negativa");
    }

    let Ok(customer_id) = u64::try_from(cliente_id).map(CustomerId::new) else {
        return ApiResponse::not_found("Cliente não encontrado");
    };
    let line = match api.cart.line(id) {
        Ok(line) => line,
        Err(e) => return api.fail(&e),
    };
    // The line must belong to the claimed customer.
    if line.customer_id != customer_id {
        return ApiResponse::not_found("Item não encontrado");
    }

    // Quantity zero removes the line through the same path.
    match api.cart.update_cart(customer_id, &line.product_id, quantidade) {
        Ok(_) => ApiResponse::ok(json!({ "message": "Item atualizado" })),
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn destroy<S: Store + 'static>(api: &Api<S>, id: &str) -> ApiResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match api.cart.remove_line(id) {
        Ok(()) => ApiResponse::ok(json!({ "message": "Item removido do carrinho" })),
        Err(e) => api.fail(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{customers, products};
    use http::StatusCode;
    use loja_store::MemoryStore;
    use std::sync::Arc;

    struct Fixture {
        api: Api<MemoryStore>,
        product_id: String,
    }

    fn fixture(stock: i64) -> Fixture {
        let api = Api::with_defaults(Arc::new(MemoryStore::new()));
        customers::create(
            &api,
            Some(&json!({
                "nome": "Ana",
                "sobrenome": "Silva",
                "cpf_cnpj": "12345678901",
                "email": "ana@example.com",
                "telefone": "11999990000",
                "endereco": "Rua A, 1",
            })),
        );
        let resp = products::create(
            &api,
            Some(&json!({
                "nome": "Teclado",
                "descricao": "Teclado mecânico",
                "preco": 100.0,
                "estoque": stock,
            })),
        );
        let product_id = resp.body["id"].as_str().map(str::to_string).unwrap();
        Fixture { api, product_id }
    }

    fn add_body(f: &Fixture, quantity: i64) -> Value {
        json!({ "cliente_id": 1, "produto_id": f.product_id, "quantidade": quantity })
    }

    #[test]
    fn test_create_and_list() {
        let f = fixture(5);
        let resp = create(&f.api, Some(&add_body(&f, 2)));
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body["message"], "Item adicionado ao carrinho");

        let listed = list(&f.api, "id_cliente=1");
        assert_eq!(listed.status, StatusCode::OK);
        let items = listed.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["quantidade"], 2);
        assert_eq!(items[0]["produto"]["preco"], "100.00");
    }

    #[test]
    fn test_list_requires_customer_query() {
        let f = fixture(5);
        let resp = list(&f.api, "");
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["error"], "Cliente ID não informado");
        assert_eq!(list(&f.api, "id_cliente=99").status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_create_rejects_over_stock() {
        let f = fixture(3);
        let resp = create(&f.api, Some(&add_body(&f, 4)));
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["error"], "Estoque insuficiente");
    }

    #[test]
    fn test_create_rejects_nonpositive_quantity() {
        let f = fixture(3);
        let resp = create(&f.api, Some(&add_body(&f, 0)));
        assert_eq!(resp.body["message"], "A quantidade deve ser maior que 0");
    }

    #[test]
    fn test_create_rejects_inactive_customer() {
        let f = fixture(3);
        customers::destroy(&f.api, "1");
        let resp = create(&f.api, Some(&add_body(&f, 1)));
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["error"], "Cliente inativo");
    }

    #[test]
    fn test_update_overwrites_quantity() {
        let f = fixture(10);
        create(&f.api, Some(&add_body(&f, 2)));
        let resp = update(&f.api, "1", Some(&json!({ "cliente_id": 1, "quantidade": 7 })));
        assert_eq!(resp.body["message"], "Item atualizado");
        assert_eq!(retrieve(&f.api, "1").body["quantidade"], 7);
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let f = fixture(10);
        create(&f.api, Some(&add_body(&f, 2)));
        update(&f.api, "1", Some(&json!({ "cliente_id": 1, "quantidade": 0 })));
        assert_eq!(retrieve(&f.api, "1").status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_update_rejects_foreign_line() {
        let f = fixture(10);
        create(&f.api, Some(&add_body(&f, 2)));
        let resp = update(&f.api, "1", Some(&json!({ "cliente_id": 2, "quantidade": 3 })));
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_destroy_removes_line() {
        let f = fixture(10);
        create(&f.api, Some(&add_body(&f, 2)));
        let resp = destroy(&f.api, "1");
        assert_eq!(resp.body["message"], "Item removido do carrinho");
        assert_eq!(destroy(&f.api, "1").status, StatusCode::NOT_FOUND);
    }
}
