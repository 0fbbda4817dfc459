//! Payment flow gating and idempotency.

use smartsales_integration_tests::TestContext;

fn sale_body(total: &str) -> String {
    format!(
        r#"{{
            "id": 7,
            "cliente": 4,
            "cliente_nombre": "Ana Flores",
            "estado": "pendiente",
            "subtotal": "{total}",
            "impuesto": "0.00",
            "descuento": "0.00",
            "costo_envio": "0.00",
            "total": "{total}"
        }}"#
    )
}

#[tokio::test]
async fn zero_total_sale_never_requests_a_payment_intent() {
    let mut ctx = TestContext::spawn().await;
    ctx.login().await;

    ctx.backend
        .mock("GET", "/ventas/7/")
        .with_header("content-type", "application/json")
        .with_body(sale_body("0.00"))
        .create_async()
        .await;
    let intent_mock = ctx
        .backend
        .mock("POST", "/finanzas/stripe/create-payment-intent/")
        .expect(0)
        .create_async()
        .await;

    let response = ctx
        .client
        .get(ctx.url("/checkout/pago/7"))
        .send()
        .await
        .expect("pay page");

    assert!(response.status().is_success());
    let body = response.text().await.expect("body");
    assert!(body.contains("monto de pago inválido"));
    intent_mock.assert_async().await;
}

#[tokio::test]
async fn payment_page_requests_intent_with_idempotency_key() {
    let mut ctx = TestContext::spawn().await;
    ctx.login().await;

    ctx.backend
        .mock("GET", "/ventas/7/")
        .with_body(sale_body("123.00"))
        .expect_at_least(1)
        .create_async()
        .await;
    let intent_mock = ctx
        .backend
        .mock("POST", "/finanzas/stripe/create-payment-intent/")
        .match_header(
            "idempotency-key",
            mockito::Matcher::Regex("[0-9a-f-]{36}".to_string()),
        )
        .with_header("content-type", "application/json")
        .with_body(r#"{"client_secret": "pi_7_secret_x", "payment_intent_id": "pi_7"}"#)
        .expect(2)
        .create_async()
        .await;

    // Two renders of the same payment page (e.g. a refresh) both carry the
    // session's idempotency key, so the backend can return the same intent.
    for _ in 0..2 {
        let response = ctx
            .client
            .get(ctx.url("/checkout/pago/7"))
            .send()
            .await
            .expect("pay page");
        assert!(response.status().is_success());
        let body = response.text().await.expect("body");
        assert!(body.contains("pi_7_secret_x"));
    }

    intent_mock.assert_async().await;
}

#[tokio::test]
async fn completion_verifies_once_and_clears_cart_once() {
    let mut ctx = TestContext::spawn().await;
    ctx.login().await;

    ctx.backend
        .mock("GET", "/ventas/7/")
        .with_body(sale_body("123.00"))
        .expect_at_least(1)
        .create_async()
        .await;
    let verify_mock = ctx
        .backend
        .mock("POST", "/finanzas/stripe/verify-payment/")
        .with_header("content-type", "application/json")
        .with_body(r#"{"estado": "completado", "venta_id": 7}"#)
        .expect(1)
        .create_async()
        .await;
    let clear_mock = ctx
        .backend
        .mock("POST", "/cart/clear_cart/")
        .with_body(r#"{"cart": {"items": [], "total_price": 0}}"#)
        .expect(1)
        .create_async()
        .await;

    // The return redirect lands twice (widget callback + user refresh); the
    // completion flag makes the second pass a no-op success screen.
    for _ in 0..2 {
        let response = ctx
            .client
            .get(ctx.url("/checkout/pago/7/completar?payment_intent=pi_7"))
            .send()
            .await
            .expect("completion");
        assert!(response.status().is_success());
        let body = response.text().await.expect("body");
        assert!(body.contains("Pago exitoso"));
    }

    verify_mock.assert_async().await;
    clear_mock.assert_async().await;
}

#[tokio::test]
async fn failed_cart_clear_is_not_shown_after_successful_payment() {
    let mut ctx = TestContext::spawn().await;
    ctx.login().await;

    ctx.backend
        .mock("GET", "/ventas/7/")
        .with_body(sale_body("123.00"))
        .create_async()
        .await;
    ctx.backend
        .mock("POST", "/finanzas/stripe/verify-payment/")
        .with_body(r#"{"estado": "completado", "venta_id": 7}"#)
        .create_async()
        .await;
    ctx.backend
        .mock("POST", "/cart/clear_cart/")
        .with_status(500)
        .create_async()
        .await;

    let response = ctx
        .client
        .get(ctx.url("/checkout/pago/7/completar?payment_intent=pi_7"))
        .send()
        .await
        .expect("completion");

    // The payment already succeeded; the clear failure is logged, not shown
    assert!(response.status().is_success());
    let body = response.text().await.expect("body");
    assert!(body.contains("Pago exitoso"));
    assert!(!body.contains("Error al vaciar"));
}

#[tokio::test]
async fn widget_failure_renders_inline_error_with_manual_retry() {
    let mut ctx = TestContext::spawn().await;
    ctx.login().await;

    ctx.backend
        .mock("GET", "/ventas/7/")
        .with_body(sale_body("123.00"))
        .create_async()
        .await;
    let verify_mock = ctx
        .backend
        .mock("POST", "/finanzas/stripe/verify-payment/")
        .expect(0)
        .create_async()
        .await;

    let response = ctx
        .client
        .get(ctx.url("/checkout/pago/7/completar?payment_intent=pi_7&redirect_status=failed"))
        .send()
        .await
        .expect("completion");

    assert!(response.status().is_success());
    let body = response.text().await.expect("body");
    assert!(body.contains("El pago fue rechazado"));
    assert!(body.contains("Reintentar pago"));
    verify_mock.assert_async().await;
}
