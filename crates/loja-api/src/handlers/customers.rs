//! `/clientes` handlers.

use crate::handlers::str_field;
use crate::response::ApiResponse;
use crate::router::Api;
use loja_commerce::customer::{Customer, NewCustomer};
use loja_commerce::ids::CustomerId;
use loja_commerce::repo::Store;
use loja_commerce::CommerceError;
use serde_json::{json, Value};

const FIELDS: [&str; 6] = ["nome", "sobrenome", "cpf_cnpj", "email", "telefone", "endereco"];

fn customer_json(customer: &Customer) -> Value {
    // The active flag is internal; it surfaces only through behavior.
    json!({
        "id": customer.id,
        "nome": customer.name,
        "sobrenome": customer.surname,
        "cpf_cnpj": customer.tax_id,
        "email": customer.email,
        "telefone": customer.phone,
        "endereco": customer.address,
    })
}

fn parse_id(id: &str) -> Result<CustomerId, ApiResponse> {
    CustomerId::parse(id).map_err(|_| ApiResponse::not_found("Cliente não encontrado"))
}

fn valid_tax_id(tax_id: &str) -> bool {
    let len = tax_id.chars().count();
    len == 11 || len == 14
}

pub(crate) fn list<S: Store + 'static>(api: &Api<S>) -> ApiResponse {
    match api.store.customers() {
        Ok(customers) => {
            ApiResponse::ok(Value::Array(customers.iter().map(customer_json).collect()))
        }
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn retrieve<S: Store + 'static>(api: &Api<S>, id: &str) -> ApiResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match api.store.customer(id) {
        Ok(customer) => ApiResponse::ok(customer_json(&customer)),
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn create<S: Store + 'static>(api: &Api<S>, body: Option<&Value>) -> ApiResponse {
    let Some(body) = body else {
        return ApiResponse::invalid("Campos obrigatórios faltando");
    };

    // A missing key and an empty value are reported differently, matching
    // the contract clients already depend on.
    let mut values = Vec::with_capacity(FIELDS.len());
    for key in FIELDS {
        let Some(raw) = body.get(key) else {
            return ApiResponse::invalid("Campos obrigatórios faltando");
        };
        match raw.as_str().filter(|s| !s.is_empty()) {
            Some(s) => values.push(s),
            None => return ApiResponse::bad_request("Dados inválidos"),
        }
    }
    let &[nome, sobrenome, cpf_cnpj, email, telefone, endereco] = &values[..] else {
        return ApiResponse::bad_request("Dados inválidos");
    };

    if values.iter().any(|v| v.chars().count() < 3) {
        return ApiResponse::invalid("O minimo de caracteres para os campos é 3");
    }
    if !valid_tax_id(cpf_cnpj) {
        return ApiResponse::invalid("CPF/CNPJ inválido");
    }
    if !email.contains('@') {
        return ApiResponse::invalid("Email inválido");
    }

    let draft = NewCustomer {
        name: nome.to_string(),
        surname: sobrenome.to_string(),
        tax_id: cpf_cnpj.to_string(),
        email: email.to_string(),
        phone: telefone.to_string(),
        address: endereco.to_string(),
    };
    match api.store.insert_customer(draft) {
        Ok(customer) => ApiResponse::created(json!({ "id": customer.id })),
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
    let mut customer = match api.store.customer(id) {
        Ok(customer) => customer,
        Err(e) => return api.fail(&e),
    };
    if !customer.active {
        return ApiResponse::bad_request("Cliente desativado");
    }
    let Some(body) = body else {
        return ApiResponse::invalid("Nenhum campo para atualizar");
    };

    // One field per request, first match wins.
    if let Some(nome) = str_field(body, "nome") {
        if nome.chars().count() < 3 {
            return ApiResponse::invalid("O minimo de caracteres para o nome é 3");
        }
        customer.name = nome.to_string();
    } else if let Some(sobrenome) = str_field(body, "sobrenome") {
        if sobrenome.chars().count() < 3 {
            return ApiResponse::invalid("O minimo de caracteres para o sobrenome é 3");
        }
        customer.surname = sobrenome.to_string();
    } else if let Some(cpf_cnpj) = str_field(body, "cpf_cnpj") {
        if !valid_tax_id(cpf_cnpj) {
            return ApiResponse::invalid("CPF/CNPJ inválido");
        }
        customer.tax_id = cpf_cnpj.to_string();
    } else if let Some(email) = str_field(body, "email") {
        if !email.contains('@') {
            return ApiResponse::invalid("Email inválido");
        }
        customer.email = email.to_string();
    } else if let Some(telefone) = str_field(body, "telefone") {
        if telefone.chars().count() < 3 {
            return ApiResponse::invalid("O minimo de caracteres para o telefone é 3");
        }
        customer.phone = telefone.to_string();
    } else if let Some(endereco) = str_field(body, "endereco") {
        if endereco.chars().count() < 3 {
            return ApiResponse::invalid("O minimo de caracteres para o endereco é 3");
        }
        customer.address = endereco.to_string();
    } else {
        return ApiResponse::invalid("Nenhum campo para atualizar");
    }

    match api.store.update_customer(&customer) {
        Ok(()) => ApiResponse::ok(customer_json(&customer)),
        Err(CommerceError::DuplicateTaxId(v)) => {
            ApiResponse::invalid(&format!("CPF/CNPJ já cadastrado {v}"))
        }
        Err(CommerceError::DuplicateEmail(v)) => {
            ApiResponse::invalid(&format!("Email já cadastrado {v}"))
        }
        Err(e) => api.fail(&e),
    }
}

pub(crate) fn destroy<S: Store + 'static>(api: &Api<S>, id: &str) -> ApiResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut customer = match api.store.customer(id) {
        Ok(customer) => customer,
        Err(e) => return api.fail(&e),
    };
    if !customer.active {
        return ApiResponse::bad_request("Cliente já desativado");
    }
    customer.deactivate();
    match api.store.update_customer(&customer) {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => api.fail(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use loja_store::MemoryStore;
    use std::sync::Arc;

    fn api() -> Api<MemoryStore> {
        Api::with_defaults(Arc::new(MemoryStore::new()))
    }

    fn valid_body() -> Value {
        json!({
            "nome": "Ana",
            "sobrenome": "Silva",
            "cpf_cnpj": "12345678901",
            "email": "ana@example.com",
            "telefone": "11999990000",
            "endereco": "Rua A, 1",
        })
    }

    #[test]
    fn test_create_returns_id() {
        let api = api();
        let resp = create(&api, Some(&valid_body()));
        assert_eq!(resp.status, StatusCode::CREATED);
        assert_eq!(resp.body["id"], 1);
    }

    #[test]
    fn test_create_rejects_missing_field() {
        let api = api();
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("email");
        let resp = create(&api, Some(&body));
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["message"], "Campos obrigatórios faltando");
    }

    #[test]
    fn test_create_rejects_short_field() {
        let api = api();
        let mut body = valid_body();
        body["nome"] = json!("Ab");
        let resp = create(&api, Some(&body));
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["message"], "O minimo de caracteres para os campos é 3");
    }

    #[test]
    fn test_create_rejects_bad_tax_id_length() {
        let api = api();
        let mut body = valid_body();
        body["cpf_cnpj"] = json!("123");
        let resp = create(&api, Some(&body));
        assert_eq!(resp.body["message"], "CPF/CNPJ inválido");
    }

    #[test]
    fn test_create_rejects_email_without_at() {
        let api = api();
        let mut body = valid_body();
        body["email"] = json!("ana.example.com");
        let resp = create(&api, Some(&body));
        assert_eq!(resp.body["message"], "Email inválido");
    }

    #[test]
    fn test_create_rejects_duplicate_email() {
        let api = api();
        assert_eq!(create(&api, Some(&valid_body())).status, StatusCode::CREATED);
        let mut body = valid_body();
        body["cpf_cnpj"] = json!("10987654321");
        let resp = create(&api, Some(&body));
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["message"], "Email já cadastrado");
    }

    #[test]
    fn test_update_changes_one_field_and_echoes_record() {
        let api = api();
        create(&api, Some(&valid_body()));
        let resp = update(&api, "1", Some(&json!({ "nome": "Beatriz", "sobrenome": "X" })));
        assert_eq!(resp.status, StatusCode::OK);
        // Only the first matched field applies.
        assert_eq!(resp.body["nome"], "Beatriz");
        assert_eq!(resp.body["sobrenome"], "Silva");
    }

    #[test]
    fn test_update_without_fields_is_rejected() {
        let api = api();
        create(&api, Some(&valid_body()));
        let resp = update(&api, "1", Some(&json!({})));
        assert_eq!(resp.body["message"], "Nenhum campo para atualizar");
    }

    #[test]
    fn test_destroy_deactivates_then_rejects_repeat() {
        let api = api();
        create(&api, Some(&valid_body()));
        assert_eq!(destroy(&api, "1").status, StatusCode::NO_CONTENT);

        let resp = destroy(&api, "1");
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["error"], "Cliente já desativado");

        // The record survives deactivation and stays readable.
        assert_eq!(retrieve(&api, "1").status, StatusCode::OK);
    }

    #[test]
    fn test_update_rejects_deactivated_customer() {
        let api = api();
        create(&api, Some(&valid_body()));
        destroy(&api, "1");
        let resp = update(&api, "1", Some(&json!({ "nome": "Beatriz" })));
        assert_eq!(resp.body["error"], "Cliente desativado");
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let api = api();
        assert_eq!(retrieve(&api, "99").status, StatusCode::NOT_FOUND);
        assert_eq!(retrieve(&api, "abc").status, StatusCode::NOT_FOUND);
    }
}
