//! Sample data for demos and manual testing.

use loja_commerce::cart::CartService;
use loja_commerce::catalog::CatalogService;
use loja_commerce::customer::{Customer, NewCustomer};
use loja_commerce::error::CommerceError;
use loja_commerce::money::Money;
use loja_commerce::purchase::Purchase;
use loja_commerce::repo::Store;
use std::sync::Arc;
use tracing::info;

fn draft(
    name: &str,
    surname: &str,
    tax_id: &str,
    email: &str,
    phone: &str,
    address: &str,
) -> NewCustomer {
    NewCustomer {
        name: name.to_string(),
        surname: surname.to_string(),
        tax_id: tax_id.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
    }
}

fn record_purchase<S: Store>(
    store: &S,
    customer: &Customer,
    items: &[(&loja_commerce::catalog::Product, i64)],
) -> Result<(), CommerceError> {
    let mut purchase = Purchase::new(customer.id);
    for (product, quantity) in items {
        let mut product = store.product(&product.id)?;
        purchase.add_item(&mut product, *quantity)?;
        store.update_product(&product)?;
    }
    store.insert_purchase(purchase)
}

/// Populate an empty store with a small catalog, a few customers, open carts
/// and finished purchases.
///
/// Intended for demos and local exploration, not for tests that depend on
/// exact contents. Fails on a non-empty store where the fixed tax ids or
/// emails already exist.
pub fn populate<S>(store: &Arc<S>) -> Result<(), CommerceError>
where
    S: Store,
{
    let catalog = CatalogService::new(Arc::clone(store));
    let cart = CartService::new(Arc::clone(store));

    let camiseta =
        catalog.create_product("Camiseta", "Camiseta branca", Money::from_cents(2990), 100)?;
    let _calca = catalog.create_product("Calça", "Calça jeans", Money::from_cents(5990), 50)?;
    let sapato = catalog.create_product("Sapato", "Sapato social", Money::from_cents(8990), 30)?;
    let bone = catalog.create_product("Boné", "Boné preto", Money::from_cents(1990), 24)?;
    let meia = catalog.create_product("Meia", "Meia branca", Money::from_cents(990), 200)?;

    let adry = store.insert_customer(draft(
        "Adry",
        "Reis",
        "12345678901",
        "adryreis@gmail.com",
        "123456789",
        "Rua 1, 123",
    ))?;
    let joao = store.insert_customer(draft(
        "João",
        "Souza",
        "23456789012",
        "joaosouza@gmail.com",
        "234567890",
        "Rua 2, 456",
    ))?;
    let maria = store.insert_customer(draft(
        "Maria",
        "Rodrigues",
        "34567890123",
        "mariarodrigues@gmail.com",
        "345678901",
        "Rua 3, 789",
    ))?;

    cart.update_cart(adry.id, &meia.id, 2)?;
    cart.update_cart(joao.id, &bone.id, 1)?;
    cart.update_cart(maria.id, &sapato.id, 1)?;

    record_purchase(store.as_ref(), &adry, &[(&bone, 1), (&camiseta, 2)])?;
    record_purchase(store.as_ref(), &joao, &[(&sapato, 1)])?;
    record_purchase(store.as_ref(), &maria, &[(&meia, 2)])?;

    info!("sample data inserted");
    Ok(())
}
