//! `/compras` handlers.

use crate::handlers::int_field;
use crate::response::ApiResponse;
use crate::router::Api;
use loja_commerce::ids::{CustomerId, PurchaseId};
use loja_commerce::purchase::Purchase;
use loja_commerce::repo::Store;
use serde_json::{json, Map, Value};

/// Serialize a purchase for the wire. The per-line subtotal only appears on
/// retrieve and create, never on the list.
fn purchase_json(purchase: &Purchase, tax_id: &str, with_subtotal: bool) -> Value {
    let itens: Vec<Value> = purchase
        .lines
        .iter()
        .map(|line| {
            let mut item = Map::new();
            item.insert(
                "produto".to_string(),
                json!({
                    "id": line.product_id,
                    "nome": line.product_name,
                    "preco": line.unit_price,
                }),
            );
            item.insert("desconto_aplicado".to_string(), json!(line.discount_applied));
            item.insert("quantidade".to_string(), json!(line.quantity));
            if with_subtotal {
                item.insert("subtotal".to_string(), json!(line.subtotal()));
            }
            Value::Object(item)
        })
        .collect();

    json!({
        "id": purchase.id,
        "cliente_cpf_cnpj": tax_id,
        "itens": itens,
        "valor_total": purchase.total,
    })
}

fn with_tax_id<S: Store + 'static>(
    api: &Api<S>,
    purchase: &Purchase,
    with_subtotal: bool,
) -> ApiResponse {
    match api.store.customer(purchase.customer_id) {
        Ok(customer) => {
            ApiResponse::ok(purchase_json(purchase, &customer.tax_id, with_subtotal))
        }
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn list<S: Store + 'static>(api: &Api<S>) -> ApiResponse {
    let purchases = match api.engine.purchases() {
        Ok(purchases) => purchases,
        Err(e) => return api.fail(&e),
    };
    let mut data = Vec::with_capacity(purchases.len());
    for purchase in &purchases {
        match api.store.customer(purchase.customer_id) {
            Ok(customer) => data.push(purchase_json(purchase, &customer.tax_id, false)),
            Err(e) => return api.fail(&e),
        }
    }
    ApiResponse::ok(Value::Array(data))
}

pub(crate) fn retrieve<S: Store + 'static>(api: &Api<S>, id: &str) -> ApiResponse {
    let Ok(id) = PurchaseId::parse(id) else {
        return ApiResponse::not_found("Compra não encontrada");
    };
    match api.engine.purchase(&id) {
        Ok(purchase) => with_tax_id(api, &purchase, true),
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn create<S: Store + 'static>(api: &Api<S>, body: Option<&Value>) -> ApiResponse {
    let Some(cliente_id) = body.and_then(|b| int_field(b, "cliente_id")) else {
        return ApiResponse::bad_request("Dados inválidos");
    };
    if cliente_id == 0 {
        return ApiResponse::invalid("Informe o ID do Cliente");
    }
    let Ok(customer_id) = u64::try_from(cliente_id).map(CustomerId::new) else {
        return ApiResponse::not_found("Cliente não encontrado");
    };

    let purchase = match api.engine.create_purchase(customer_id) {
        Ok(purchase) => purchase,
        Err(e) => return api.fail(&e),
    };
    let mut resp = with_tax_id(api, &purchase, true);
    if resp.status == http::StatusCode::OK {
        resp.status = http::StatusCode::CREATED;
    }
    resp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{cart_lines, customers, products};
    use http::StatusCode;
    use loja_store::MemoryStore;
    use std::sync::Arc;

    struct Fixture {
        api: Api<MemoryStore>,
        product_id: String,
    }

    fn fixture() -> Fixture {
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
                "estoque": 5,
            })),
        );
        let product_id = resp.body["id"].as_str().map(str::to_string).unwrap();
        Fixture { api, product_id }
    }

    fn add_to_cart(f: &Fixture, quantity: i64) {
        let resp = cart_lines::create(
            &f.api,
            Some(&json!({ "cliente_id": 1, "produto_id": f.product_id, "quantidade": quantity })),
        );
        assert_eq!(resp.status, StatusCode::OK);
    }

    #[test]
    fn test_create_returns_purchase_with_subtotals() {
        let f = fixture();
        products::update(&f.api, &f.product_id, Some(&json!({ "desconto": 10 })));
        add_to_cart(&f, 3);

        let resp = create(&f.api, Some(&json!({ "cliente_id": 1 })));
        assert_eq!(resp.status, StatusCode::CREATED);
        assert_eq!(resp.body["cliente_cpf_cnpj"], "12345678901");
        assert_eq!(resp.body["valor_total"], "270.00");

        let item = &resp.body["itens"][0];
        assert_eq!(item["produto"]["preco"], "90.00");
        assert_eq!(item["desconto_aplicado"], 10);
        assert_eq!(item["quantidade"], 3);
        assert_eq!(item["subtotal"], "270.00");
    }

    #[test]
    fn test_create_clears_cart_and_decrements_stock() {
        let f = fixture();
        add_to_cart(&f, 3);
        create(&f.api, Some(&json!({ "cliente_id": 1 })));

        assert_eq!(products::retrieve(&f.api, &f.product_id).body["estoque"], 2);
        let listed = cart_lines::list(&f.api, "id_cliente=1");
        assert!(listed.body.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_create_with_empty_cart_is_rejected() {
        let f = fixture();
        let resp = create(&f.api, Some(&json!({ "cliente_id": 1 })));
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["error"], "Carrinho vazio");
    }

    #[test]
    fn test_create_for_inactive_customer_is_rejected() {
        let f = fixture();
        add_to_cart(&f, 1);
        customers::destroy(&f.api, "1");
        let resp = create(&f.api, Some(&json!({ "cliente_id": 1 })));
        assert_eq!(resp.body["error"], "Cliente inativo");
    }

    #[test]
    fn test_create_requires_customer_id() {
        let f = fixture();
        assert_eq!(create(&f.api, None).status, StatusCode::BAD_REQUEST);
        let resp = create(&f.api, Some(&json!({ "cliente_id": 0 })));
        assert_eq!(resp.body["message"], "Informe o ID do Cliente");
    }

    #[test]
    fn test_list_has_no_subtotal() {
        let f = fixture();
        add_to_cart(&f, 2);
        create(&f.api, Some(&json!({ "cliente_id": 1 })));

        let listed = list(&f.api);
        let item = &listed.body.as_array().unwrap()[0]["itens"][0];
        assert!(item.get("subtotal").is_none());
        assert_eq!(item["quantidade"], 2);
    }

    #[test]
    fn test_retrieve_unknown_purchase() {
        let f = fixture();
        assert_eq!(retrieve(&f.api, "garbage").status, StatusCode::NOT_FOUND);
        let missing = PurchaseId::generate().to_string();
        assert_eq!(retrieve(&f.api, &missing).status, StatusCode::NOT_FOUND);
    }
}
