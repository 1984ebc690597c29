use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::cart::SharedCart;
use crate::checkout::{
    compose_order_summary, handoff_uri, CustomerInfo, DeliveryMethod, HandoffConfig,
};

//ROUTERS
pub fn checkout_router(cart: SharedCart, config: HandoffConfig) -> Router {
    Router::new()
        .route("/checkout", post(submit_order))
        .layer(Extension(cart))
        .layer(Extension(config))
}

//ROUTES
async fn submit_order(
    Extension(cart): Extension<SharedCart>,
    Extension(config): Extension<HandoffConfig>,
    Json(payload): Json<CheckoutPayload>,
) -> impl IntoResponse {
    let customer = CustomerInfo {
        name: payload.name,
        contact: payload.contact,
        address: payload.address,
    };
    if let Err(errors) = customer.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": errors.to_string()
            })),
        );
    }

    let mut cart = cart.lock().await;
    if cart.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Cart is empty"
            })),
        );
    }

    let summary = compose_order_summary(cart.items(), &customer);
    let handoff = handoff_uri(&summary, payload.method, &config);

    //the hand-off is fire and forget: there is no delivery confirmation
    //channel, the cart is cleared as soon as the uri is built
    cart.clear();

    (
        StatusCode::OK,
        Json(json!({
            "message": "Order placed!",
            "handoff": handoff
        })),
    )
}

//Structs
#[derive(Deserialize, Debug)]
struct CheckoutPayload {
    name: String,
    contact: String,
    address: String,
    method: DeliveryMethod,
}
