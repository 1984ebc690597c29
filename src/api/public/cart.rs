use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::cart::{CartItem, ProductSnapshot, SharedCart};
use crate::entities::product;

//ROUTERS
pub fn cart_router(db: Arc<DatabaseConnection>, cart: SharedCart) -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_product).delete(clear_cart))
        .route("/cart/:id", patch(patch_entry).delete(remove_product))
        .layer(Extension(db))
        .layer(Extension(cart))
}

//ROUTES
async fn get_cart(Extension(cart): Extension<SharedCart>) -> impl IntoResponse {
    let cart = cart.lock().await;
    (StatusCode::OK, Json(CartResponse::new(&cart))).into_response()
}

async fn add_product(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(cart): Extension<SharedCart>,
    Json(payload): Json<AddProduct>,
) -> impl IntoResponse {
    //the snapshot comes from the catalog, not from the client
    match product::Entity::find_by_id(payload.product_id).one(&*db).await {
        Ok(Some(model)) => {
            let mut cart = cart.lock().await;
            cart.add_to_cart(ProductSnapshot::from(model));
            (
                StatusCode::CREATED,
                Json(json!({
                    "message": "Added successfully"
                })),
            )
        }
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("No product with {} id was found", payload.product_id)
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        ),
    }
}

async fn patch_entry(
    Path(id): Path<i32>,
    Extension(cart): Extension<SharedCart>,
    Json(payload): Json<PatchCart>,
) -> impl IntoResponse {
    let mut cart = cart.lock().await;
    //quantity is unsigned: a negative value never reaches the store, the
    //request is rejected during deserialization instead
    if cart.update_quantity(id, payload.quantity) {
        (
            StatusCode::OK,
            Json(json!({
                "message": "Resource patched successfully"
            })),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("No related entry with {} id was found.", id)
            })),
        )
    }
}

async fn remove_product(
    Path(id): Path<i32>,
    Extension(cart): Extension<SharedCart>,
) -> impl IntoResponse {
    let mut cart = cart.lock().await;
    //removing an absent id is a no-op, not an error
    cart.remove_from_cart(id);
    (
        StatusCode::OK,
        Json(json!({
            "message": "Resource deleted successfully"
        })),
    )
}

async fn clear_cart(Extension(cart): Extension<SharedCart>) -> impl IntoResponse {
    let mut cart = cart.lock().await;
    cart.clear();
    (
        StatusCode::OK,
        Json(json!({
            "message": "Cart cleared"
        })),
    )
}

//Structs
#[derive(Deserialize, Debug)]
struct AddProduct {
    product_id: i32,
}

#[derive(Deserialize)]
struct PatchCart {
    quantity: u32,
}

#[derive(Serialize)]
struct CartResponse {
    items: Vec<CartItem>,
    total_items: u32,
    total_price: f32,
}

impl CartResponse {
    fn new(cart: &crate::cart::CartStore) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}
