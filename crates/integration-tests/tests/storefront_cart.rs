//! Cart behavior through the storefront UI surface.

use smartsales_integration_tests::TestContext;

const CART_TWO_LINES: &str = r#"{
    "id": 9,
    "items": [
        {"id": 1, "catalogo": {"id": 3, "nombre": "Mouse", "precio": "50.00", "stock_disponible": 4, "estado": "activo"}, "quantity": 2, "subtotal": "100.00"},
        {"id": 2, "catalogo": {"id": 4, "nombre": "Monitor", "precio": "800.00", "stock_disponible": 1, "estado": "activo"}, "quantity": 3, "subtotal": "2400.00"}
    ],
    "total_price": "2500.00"
}"#;

#[tokio::test]
async fn anonymous_cart_page_shows_empty_cart_without_errors() {
    let ctx = TestContext::spawn().await;

    let response = ctx
        .client
        .get(ctx.url("/carrito"))
        .send()
        .await
        .expect("request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("body");
    assert!(body.contains("Tu carrito está vacío"));
    assert!(!body.contains("error-banner\">Error"));
}

#[tokio::test]
async fn anonymous_add_item_prompts_login_instead_of_generic_error() {
    let ctx = TestContext::spawn().await;

    let response = ctx
        .client
        .post(ctx.url("/carrito/agregar"))
        .form(&[("catalogo_id", "3"), ("quantity", "1")])
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body = response.text().await.expect("body");
    assert!(body.contains("Debes iniciar sesión"));
}

#[tokio::test]
async fn anonymous_badge_is_empty() {
    let ctx = TestContext::spawn().await;

    let response = ctx
        .client
        .get(ctx.url("/carrito/badge"))
        .send()
        .await
        .expect("request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("body");
    assert!(body.trim().is_empty());
}

#[tokio::test]
async fn add_item_returns_count_badge_and_update_trigger() {
    let mut ctx = TestContext::spawn().await;
    ctx.login().await;

    ctx.backend
        .mock("POST", "/cart/add_item/")
        .with_header("content-type", "application/json")
        .with_body(CART_TWO_LINES)
        .create_async()
        .await;

    let response = ctx
        .client
        .post(ctx.url("/carrito/agregar"))
        .form(&[("catalogo_id", "3"), ("quantity", "2")])
        .send()
        .await
        .expect("request");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("hx-trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
    let body = response.text().await.expect("body");
    // Quantities 2 + 3 fold to 5
    assert!(body.contains('5'));
}

#[tokio::test]
async fn failed_update_keeps_previous_items_and_shows_error() {
    let mut ctx = TestContext::spawn().await;
    ctx.login().await;

    ctx.backend
        .mock("GET", "/cart/my_cart/")
        .with_header("content-type", "application/json")
        .with_body(CART_TWO_LINES)
        .create_async()
        .await;
    ctx.backend
        .mock("PATCH", "/cart/update_item/1/")
        .with_status(500)
        .with_body("backend exploded")
        .create_async()
        .await;

    // Load the cart first so the coordinator holds a snapshot
    let response = ctx
        .client
        .get(ctx.url("/carrito"))
        .send()
        .await
        .expect("load cart");
    assert!(response.text().await.expect("body").contains("Mouse"));

    let response = ctx
        .client
        .post(ctx.url("/carrito/actualizar"))
        .form(&[("item_id", "1"), ("quantity", "9")])
        .send()
        .await
        .expect("update request");

    let body = response.text().await.expect("body");
    // Previous items survive the failed call, and the shared error shows
    assert!(body.contains("Mouse"));
    assert!(body.contains("Monitor"));
    assert!(body.contains("Error al actualizar la cantidad"));
}

#[tokio::test]
async fn clearing_the_cart_resets_the_total() {
    let mut ctx = TestContext::spawn().await;
    ctx.login().await;

    ctx.backend
        .mock("GET", "/cart/my_cart/")
        .with_body(CART_TWO_LINES)
        .create_async()
        .await;
    ctx.backend
        .mock("POST", "/cart/clear_cart/")
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Carrito vaciado", "cart": {"items": [], "total_price": 0}}"#)
        .create_async()
        .await;

    let _ = ctx.client.get(ctx.url("/carrito")).send().await;

    let response = ctx
        .client
        .post(ctx.url("/carrito/vaciar"))
        .send()
        .await
        .expect("clear request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("body");
    assert!(body.contains("Tu carrito está vacío"));
}

#[tokio::test]
async fn voice_command_adds_first_available_match() {
    let mut ctx = TestContext::spawn().await;
    ctx.login().await;

    ctx.backend
        .mock("GET", "/catalogo/")
        .match_query(mockito::Matcher::UrlEncoded(
            "search".into(),
            "teclado".into(),
        ))
        .with_body(
            r#"[
                {"id": 5, "nombre": "Teclado viejo", "precio": "100.00", "stock_disponible": 0, "estado": "activo"},
                {"id": 6, "nombre": "Teclado mecánico", "precio": "349.50", "stock_disponible": 3, "estado": "activo"}
            ]"#,
        )
        .create_async()
        .await;
    let add_mock = ctx
        .backend
        .mock("POST", "/cart/add_item/")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"catalogo_id": 6, "quantity": 1}"#.to_string(),
        ))
        .with_body(r#"{"items": [], "total_price": 0}"#)
        .create_async()
        .await;

    let response = ctx
        .client
        .post(ctx.url("/asistente/comando"))
        .form(&[("texto", "teclado.")])
        .send()
        .await
        .expect("command request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("body");
    assert!(body.contains("Teclado mecánico"));
    add_mock.assert_async().await;
}
