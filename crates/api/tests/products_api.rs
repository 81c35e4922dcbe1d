//! HTTP-level integration tests for the catalog and the reservation flow.

mod common;

use axum::http::StatusCode;
use babylist_core::roles::{ROLE_ADMIN, ROLE_GUEST};
use babylist_db::models::product::{CreateProduct, Product};
use babylist_db::repositories::ProductRepo;
use common::{
    body_json, build_test_app, get, get_auth, login_token, post_json, post_json_auth,
    put_json_auth, seed_user,
};
use serde_json::json;
use sqlx::PgPool;

async fn seed_product(pool: &PgPool, name: &str, active: bool) -> Product {
    let input = CreateProduct {
        name: name.to_string(),
        description: String::new(),
        url: String::new(),
        image_url: String::new(),
        active,
    };
    ProductRepo::create(pool, &input).await.unwrap()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_product_with_defaults(pool: PgPool) {
    let admin = seed_user(&pool, "Boss", ROLE_ADMIN).await;
    let app = build_test_app(pool);
    let token = login_token(&app, &admin.email).await;

    let body = json!({ "product": { "name": "Stroller", "description": "Foldable" } });
    let response = post_json_auth(&app, "/api/products", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Product created successfully");
    assert_eq!(json["data"]["name"], "Stroller");
    assert_eq!(json["data"]["description"], "Foldable");
    assert_eq!(json["data"]["url"], "");
    assert_eq!(json["data"]["image_url"], "");
    assert_eq!(json["data"]["active"], true);
    assert!(json["data"]["reserved_by"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_product_requires_admin_and_name(pool: PgPool) {
    let guest = seed_user(&pool, "Guest", ROLE_GUEST).await;
    let admin = seed_user(&pool, "Boss", ROLE_ADMIN).await;
    let app = build_test_app(pool.clone());

    let body = json!({ "product": { "name": "Crib" } });
    let response = post_json(&app, "/api/products", body.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let guest_token = login_token(&app, &guest.email).await;
    let response = post_json_auth(&app, "/api/products", body, &guest_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token = login_token(&app, &admin.email).await;
    let response =
        post_json_auth(&app, "/api/products", json!({ "product": { "url": "x" } }), &admin_token)
            .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Missing required fields: name");

    assert!(ProductRepo::list_all(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn public_list_hides_inactive_products(pool: PgPool) {
    let admin = seed_user(&pool, "Boss", ROLE_ADMIN).await;
    let bottle = seed_product(&pool, "Bottle", true).await;
    seed_product(&pool, "Blanket", true).await;
    let app = build_test_app(pool);
    let token = login_token(&app, &admin.email).await;

    let uri = format!("/api/products/{}", bottle.id);
    let body = json!({ "product": { "active": false } });
    let response = put_json_auth(&app, &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["active"], false);

    let response = get(&app, "/api/products").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["name"], "Blanket");

    let response = get_auth(&app, "/api/products/all", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn full_list_requires_admin(pool: PgPool) {
    let guest = seed_user(&pool, "Guest", ROLE_GUEST).await;
    let app = build_test_app(pool);

    assert_eq!(get(&app, "/api/products/all").await.status(), StatusCode::UNAUTHORIZED);

    let token = login_token(&app, &guest.email).await;
    let response = get_auth(&app, "/api/products/all", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_product_is_partial(pool: PgPool) {
    let admin = seed_user(&pool, "Boss", ROLE_ADMIN).await;
    let product = seed_product(&pool, "Mobile", true).await;
    let app = build_test_app(pool);
    let token = login_token(&app, &admin.email).await;

    let uri = format!("/api/products/{}", product.id);
    let body = json!({ "product": { "url": "https://shop.example/mobile" } });
    let response = put_json_auth(&app, &uri, body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Product updated successfully");
    assert_eq!(json["data"]["name"], "Mobile");
    assert_eq!(json["data"]["url"], "https://shop.example/mobile");

    let response = put_json_auth(&app, &uri, json!({ "product": { "name": "  " } }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_product_is_404(pool: PgPool) {
    let admin = seed_user(&pool, "Boss", ROLE_ADMIN).await;
    let app = build_test_app(pool);
    let token = login_token(&app, &admin.email).await;

    let body = json!({ "product": { "name": "Ghost" } });
    let response = put_json_auth(&app, "/api/products/424242", body, &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_cannot_touch_reservation(pool: PgPool) {
    let admin = seed_user(&pool, "Boss", ROLE_ADMIN).await;
    let product = seed_product(&pool, "Swing", true).await;
    let app = build_test_app(pool.clone());
    let token = login_token(&app, &admin.email).await;

    let uri = format!("/api/products/{}", product.id);
    let body = json!({ "product": { "reserved_by": admin.id, "description": "Electric" } });
    let response = put_json_auth(&app, &uri, body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let stored = ProductRepo::find_by_id(&pool, product.id).await.unwrap().unwrap();
    assert_eq!(stored.description, "Electric");
    assert!(stored.reserved_by.is_none());
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn reserve_flow_first_claim_wins(pool: PgPool) {
    let admin = seed_user(&pool, "Boss", ROLE_ADMIN).await;
    let guest = seed_user(&pool, "Guest", ROLE_GUEST).await;
    let other = seed_user(&pool, "Other", ROLE_GUEST).await;
    let app = build_test_app(pool.clone());

    let admin_token = login_token(&app, &admin.email).await;
    let body = json!({ "product": { "name": "Stroller" } });
    let response = post_json_auth(&app, "/api/products", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let product_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/products/{product_id}/reserve");

    let guest_token = login_token(&app, &guest.email).await;
    let response = post_json_auth(&app, &uri, json!({}), &guest_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Product reserved successfully");
    assert_eq!(json["data"]["reserved_by"], guest.id);

    let response = post_json_auth(&app, &uri, json!({}), &guest_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let other_token = login_token(&app, &other.email).await;
    let response = post_json_auth(&app, &uri, json!({}), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "ALREADY_RESERVED");
    assert_eq!(json["error"], "Product not found or already reserved");

    let stored = ProductRepo::find_by_id(&pool, product_id).await.unwrap().unwrap();
    assert_eq!(stored.reserved_by, Some(guest.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reserved_products_stay_listed(pool: PgPool) {
    let guest = seed_user(&pool, "Guest", ROLE_GUEST).await;
    let product = seed_product(&pool, "Monitor", true).await;
    let app = build_test_app(pool);
    let token = login_token(&app, &guest.email).await;

    let uri = format!("/api/products/{}/reserve", product.id);
    assert_eq!(post_json_auth(&app, &uri, json!({}), &token).await.status(), StatusCode::OK);

    let json = body_json(get(&app, "/api/products").await).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["reserved_by"], guest.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reserve_requires_token(pool: PgPool) {
    let product = seed_product(&pool, "Rattle", true).await;
    let app = build_test_app(pool.clone());

    let uri = format!("/api/products/{}/reserve", product.id);
    let response = post_json(&app, &uri, json!({})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let stored = ProductRepo::find_by_id(&pool, product.id).await.unwrap().unwrap();
    assert!(stored.reserved_by.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reserve_unknown_product_is_404(pool: PgPool) {
    let guest = seed_user(&pool, "Guest", ROLE_GUEST).await;
    let app = build_test_app(pool);
    let token = login_token(&app, &guest.email).await;

    let response = post_json_auth(&app, "/api/products/987654/reserve", json!({}), &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}
