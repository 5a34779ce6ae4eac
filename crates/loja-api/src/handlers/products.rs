//! `/produtos` handlers, including the bulk discount job trigger.

use crate::handlers::{int_field, num_field, str_field};
use crate::response::ApiResponse;
use crate::router::Api;
use loja_commerce::catalog::Product;
use loja_commerce::ids::ProductId;
use loja_commerce::money::Money;
use loja_commerce::repo::Store;
use loja_jobs::queue_discount_update;
use serde_json::{json, Value};
use std::sync::Arc;

fn product_json(product: &Product) -> Value {
    json!({
        "id": product.id,
        "nome": product.name,
        "descricao": product.description,
        "preco": product.price,
        "estoque": product.stock,
        "desconto": product.discount_percent,
    })
}

fn parse_id(id: &str) -> Result<ProductId, ApiResponse> {
    ProductId::parse(id).map_err(|_| ApiResponse::not_found("Produto não encontrado"))
}

pub(crate) fn list<S: Store + 'static>(api: &Api<S>) -> ApiResponse {
    match api.catalog.products() {
        Ok(products) => {
            ApiResponse::ok(Value::Array(products.iter().map(product_json).collect()))
        }
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn retrieve<S: Store + 'static>(api: &Api<S>, id: &str) -> ApiResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match api.catalog.product(&id) {
        Ok(product) => ApiResponse::ok(product_json(&product)),
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn create<S: Store + 'static>(api: &Api<S>, body: Option<&Value>) -> ApiResponse {
    let Some(body) = body else {
        return ApiResponse::bad_request("Dados inválidos");
    };
    let (Some(nome), Some(descricao)) = (str_field(body, "nome"), str_field(body, "descricao"))
    else {
        return ApiResponse::bad_request("Dados inválidos");
    };
    let Some(preco) = num_field(body, "preco") else {
        return ApiResponse::bad_request("Dados inválidos");
    };
    let Some(estoque) = int_field(body, "estoque") else {
        return ApiResponse::bad_request("Dados inválidos");
    };

    if nome.chars().count() < 3 || descricao.chars().count() < 3 {
        return ApiResponse::invalid("O minimo de caracteres para os campos é 3");
    }
    if preco < 0.0 {
        return ApiResponse::invalid("Preço inválido");
    }
    if estoque < 0 {
        return ApiResponse::invalid("Estoque inválido");
    }

    match api
        .catalog
        .create_product(nome, descricao, Money::from_decimal(preco), estoque)
    {
        // The create echo has no discount field; a new product has none.
        Ok(product) => ApiResponse::created(json!({
            "id": product.id,
            "nome": product.name,
            "descricao": product.description,
            "preco": product.price,
            "estoque": product.stock,
        })),
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
    let mut product = match api.catalog.product(&id) {
        Ok(product) => product,
        Err(e) => return api.fail(&e),
    };
    let Some(body) = body else {
        return ApiResponse::invalid("Nenhum campo para atualizar");
    };

    // One field per request, first match wins.
    if let Some(nome) = str_field(body, "nome") {
        if nome.chars().count() < 3 {
            return ApiResponse::invalid("O minimo de caracteres para os campos é 3");
        }
        product.name = nome.to_string();
    } else if let Some(descricao) = str_field(body, "descricao") {
        if descricao.chars().count() < 3 {
            return ApiResponse::invalid("O minimo de caracteres para os campos é 3");
        }
        product.description = descricao.to_string();
    } else if let Some(preco) = num_field(body, "preco") {
        if preco < 0.0 {
            return ApiResponse::invalid("Preço inválido");
        }
        product.price = Money::from_decimal(preco);
    } else if let Some(estoque) = int_field(body, "estoque") {
        if estoque < 0 {
            return ApiResponse::invalid("Estoque inválido");
        }
        product.stock = estoque;
    } else if let Some(desconto) = int_field(body, "desconto") {
        if !(0..=100).contains(&desconto) {
            return ApiResponse::invalid("Desconto inválido");
        }
        if product.set_discount(desconto as u8).is_err() {
            return ApiResponse::invalid("Desconto inválido");
        }
    } else {
        return ApiResponse::invalid("Nenhum campo para atualizar");
    }

    match api.catalog.update(&product) {
        Ok(()) => ApiResponse::ok(product_json(&product)),
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn destroy<S: Store + 'static>(api: &Api<S>, id: &str) -> ApiResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match api.catalog.discontinue(&id) {
        Ok(_) => ApiResponse::ok(json!({
            "message": "Produto declarado como em falta no estoque"
        })),
        Err(e) => api.fail(&e),
    }
}

/// `POST /produtos/aplicar_desconto`: queue the bulk discount job.
pub(crate) fn apply_discount<S: Store + 'static>(
    api: &Api<S>,
    body: Option<&Value>,
) -> ApiResponse {
    let percent = body.and_then(|b| num_field(b, "percentual_desconto"));
    let Some(percent) = percent else {
        return ApiResponse::invalid("Informe o percentual de desconto");
    };
    if percent <= 0.0 {
        return ApiResponse::invalid("O percentual de desconto deve ser maior que 0");
    }
    if percent > 100.0 || percent.fract() != 0.0 {
        return ApiResponse::invalid("Desconto inválido");
    }

    let handle = queue_discount_update(&api.jobs, Arc::clone(&api.catalog), percent as u8);
    ApiResponse::accepted(json!({
        "task_id": handle.id.to_string(),
        "message": "Tarefa para atualização de preços enviada",
    }))
}
