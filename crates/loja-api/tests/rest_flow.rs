//! End-to-end flows through the dispatcher, transport included in spirit:
//! every interaction goes through `Api::dispatch` exactly as an HTTP
//! listener would drive it.

use http::{Method, StatusCode};
use loja_api::{Api, ApiConfig, ApiResponse};
use loja_store::MemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;

fn api() -> Api<MemoryStore> {
    Api::with_defaults(Arc::new(MemoryStore::new()))
}

fn post(api: &Api<MemoryStore>, path: &str, body: Value) -> ApiResponse {
    api.dispatch(&Method::POST, path, Some(&body))
}

fn get(api: &Api<MemoryStore>, path: &str) -> ApiResponse {
    api.dispatch(&Method::GET, path, None)
}

fn seed_customer(api: &Api<MemoryStore>) -> u64 {
    let resp = post(
        api,
        "/clientes",
        json!({
            "nome": "Ana",
            "sobrenome": "Silva",
            "cpf_cnpj": "12345678901",
            "email": "ana@example.com",
            "telefone": "11999990000",
            "endereco": "Rua A, 1",
        }),
    );
    assert_eq!(resp.status, StatusCode::CREATED);
    resp.body["id"].as_u64().unwrap()
}

fn seed_product(api: &Api<MemoryStore>, price: f64, stock: i64) -> String {
    let resp = post(
        api,
        "/produtos",
        json!({ "nome": "Teclado", "descricao": "Teclado mecânico", "preco": price, "estoque": stock }),
    );
    assert_eq!(resp.status, StatusCode::CREATED);
    resp.body["id"].as_str().unwrap().to_string()
}

#[test]
fn test_full_checkout_flow() {
    let api = api();
    let cliente = seed_customer(&api);
    let produto = seed_product(&api, 100.0, 5);

    // 10% discount on the product, then three units into the cart.
    let resp = api.dispatch(
        &Method::PUT,
        &format!("/produtos/{produto}"),
        Some(&json!({ "desconto": 10 })),
    );
    assert_eq!(resp.status, StatusCode::OK);

    let resp = post(
        &api,
        "/itens_carrinho",
        json!({ "cliente_id": cliente, "produto_id": produto, "quantidade": 3 }),
    );
    assert_eq!(resp.status, StatusCode::OK);

    let resp = post(&api, "/compras", json!({ "cliente_id": cliente }));
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["valor_total"], "270.00");
    assert_eq!(resp.body["itens"][0]["produto"]["preco"], "90.00");
    let purchase_id = resp.body["id"].as_str().unwrap().to_string();

    // Stock went down, the cart is empty, the record is retrievable.
    assert_eq!(get(&api, &format!("/produtos/{produto}")).body["estoque"], 2);
    assert!(get(&api, &format!("/itens_carrinho?id_cliente={cliente}"))
        .body
        .as_array()
        .unwrap()
        .is_empty());
    let resp = get(&api, &format!("/compras/{purchase_id}"));
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["itens"][0]["subtotal"], "270.00");

    // Raising the price afterwards does not touch the finalized record.
    api.dispatch(
        &Method::PUT,
        &format!("/produtos/{produto}"),
        Some(&json!({ "preco": 500.0 })),
    );
    let resp = get(&api, &format!("/compras/{purchase_id}"));
    assert_eq!(resp.body["valor_total"], "270.00");
}

#[test]
fn test_checkout_rechecks_live_stock_and_commits_nothing() {
    let api = api();
    let cliente = seed_customer(&api);
    let produto = seed_product(&api, 50.0, 4);

    post(
        &api,
        "/itens_carrinho",
        json!({ "cliente_id": cliente, "produto_id": produto, "quantidade": 4 }),
    );

    // Stock shrinks after the item was added; checkout must notice.
    let resp = api.dispatch(
        &Method::PUT,
        &format!("/produtos/{produto}"),
        Some(&json!({ "estoque": 2 })),
    );
    assert_eq!(resp.status, StatusCode::OK);

    let resp = post(&api, "/compras", json!({ "cliente_id": cliente }));
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Quantidade maior que o estoque");

    // Nothing was committed: no purchase, cart intact, stock untouched.
    assert!(get(&api, "/compras").body.as_array().unwrap().is_empty());
    assert_eq!(
        get(&api, &format!("/itens_carrinho?id_cliente={cliente}")).body[0]["quantidade"],
        4
    );
    assert_eq!(get(&api, &format!("/produtos/{produto}")).body["estoque"], 2);
}

#[test]
fn test_deactivated_customer_cannot_transact() {
    let api = api();
    let cliente = seed_customer(&api);
    let produto = seed_product(&api, 10.0, 10);

    post(
        &api,
        "/itens_carrinho",
        json!({ "cliente_id": cliente, "produto_id": produto, "quantidade": 1 }),
    );
    let resp = api.dispatch(&Method::DELETE, &format!("/clientes/{cliente}"), None);
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = post(&api, "/compras", json!({ "cliente_id": cliente }));
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "Cliente inativo");
}

#[tokio::test]
async fn test_bulk_discount_job_through_dispatch() {
    let api = api();
    seed_customer(&api);
    let stocked = seed_product(&api, 100.0, 5);

    let resp = post(&api, "/produtos/aplicar_desconto", json!({ "percentual_desconto": 20 }));
    assert_eq!(resp.status, StatusCode::ACCEPTED);
    assert!(resp.body["task_id"].as_str().is_some());

    // The job runs out-of-band; poll until the product carries the discount.
    for _ in 0..100 {
        if get(&api, &format!("/produtos/{stocked}")).body["desconto"] == 20 {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("discount job did not apply in time");
}

#[test]
fn test_base_path_is_stripped() {
    let store = Arc::new(MemoryStore::new());
    let api = Api::new(store, ApiConfig::new().with_base_path("/api"));
    assert_eq!(get(&api, "/api/produtos").status, StatusCode::OK);
}

#[test]
fn test_unknown_route_is_not_found() {
    let api = api();
    assert_eq!(get(&api, "/naoexiste").status, StatusCode::NOT_FOUND);
    assert_eq!(
        api.dispatch(&Method::DELETE, "/compras", None).status,
        StatusCode::NOT_FOUND
    );
}
