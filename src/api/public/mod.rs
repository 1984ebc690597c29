pub mod auth;
pub mod cart;
pub mod checkout;
pub mod product;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::cart::SharedCart;
use crate::checkout::HandoffConfig;

use auth::auth_router;
use cart::cart_router;
use checkout::checkout_router;
use product::product_router;

pub fn public_api_router(
    db: Arc<DatabaseConnection>,
    cart: SharedCart,
    config: HandoffConfig,
) -> Router {
    let auth_router = auth_router(db.clone());
    let product_router = product_router(db.clone());
    let cart_router = cart_router(db.clone(), cart.clone());
    let checkout_router = checkout_router(cart, config);

    Router::new()
        .merge(auth_router)
        .merge(product_router)
        .merge(cart_router)
        .merge(checkout_router)
}
