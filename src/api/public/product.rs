use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::catalog::{filter_products, group_by_brand};
use crate::entities::product::{self, Entity as ProductEntity};

//ROUTERS
pub fn product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/product", get(get_products))
        .route("/product/:id", get(get_product))
        .layer(Extension(db))
}

//ROUTES
async fn get_products(
    Query(params): Query<GetProductsQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            )
                .into_response();
        }
    };

    let result = ProductEntity::find()
        .order_by_asc(product::Column::Id)
        .all(&txn)
        .await;

    let products = match result {
        Ok(products) => products,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to load products."
                })),
            )
                .into_response();
        }
    };

    let search = params.search.unwrap_or_default();
    let filtered = filter_products(&products, &search);

    if params.grouped.unwrap_or(false) {
        let mut sections = serde_json::Map::new();
        for (brand, members) in group_by_brand(filtered) {
            let response: Vec<PublicProductResponse> = members
                .into_iter()
                .map(PublicProductResponse::new)
                .collect();
            sections.insert(brand.to_string(), json!(response));
        }
        return (StatusCode::OK, Json(serde_json::Value::Object(sections))).into_response();
    }

    let response: Vec<PublicProductResponse> = filtered
        .into_iter()
        .map(PublicProductResponse::new)
        .collect();
    (StatusCode::OK, Json(response)).into_response()
}

async fn get_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            )
                .into_response();
        }
    };
    let result = ProductEntity::find_by_id(id).one(&txn).await;
    match result {
        Ok(Some(prod)) => (StatusCode::OK, Json(PublicProductResponse::new(prod))).into_response(),
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("No product with {} id was found.", id)
            })),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        )
            .into_response(),
    }
}

//Structs
#[derive(Deserialize)]
struct GetProductsQuery {
    search: Option<String>,
    grouped: Option<bool>,
}

#[derive(Serialize)]
pub struct PublicProductResponse {
    pub id: i32,
    pub title: String,
    pub specs: String,
    pub price: f32,
    pub brand: String,
    pub images: Vec<String>,
}

impl PublicProductResponse {
    pub fn new(model: product::Model) -> Self {
        let images = model.image_list();
        PublicProductResponse {
            id: model.id,
            title: model.title,
            specs: model.specs,
            price: model.price,
            brand: model.brand.to_string(),
            images,
        }
    }
}
