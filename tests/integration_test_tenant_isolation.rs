mod common;

use axum::http::StatusCode;
use common::{Auth, TestApp};
use serde_json::{json, Value};

fn payment_body(description: &str) -> Value {
    json!({
        "descricao": description,
        "valor": "50.00",
        "data_competencia": "2024-02-01",
        "data_vencimento": "2024-02-10"
    })
}

fn descriptions(list: &Value) -> Vec<String> {
    list.as_array().unwrap().iter()
        .map(|p| p["descricao"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_regular_users_cannot_reach_other_tenants() {
    let app = TestApp::new().await;
    let tenant_a = app.create_tenant("Empresa A").await;
    let tenant_b = app.create_tenant("Empresa B").await;
    let alice = app.token_for(app.create_user("alice", false, Some(tenant_a)).await.id);
    let bob = app.token_for(app.create_user("bob", false, Some(tenant_b)).await.id);

    let (_, a_payment) = app.call("POST", "/api/pagamentos/", &alice, Some(payment_body("Pagamento A"))).await;
    let (_, a_category) = app.call("POST", "/api/categorias/", &alice, Some(json!({"nome": "Categoria A"}))).await;
    app.call("POST", "/api/pagamentos/", &bob, Some(payment_body("Pagamento B"))).await;

    // Listings only show the caller's tenant
    let (_, list) = app.call("GET", "/api/pagamentos/", &bob, None).await;
    assert_eq!(descriptions(&list), vec!["Pagamento B"]);
    let (_, categories) = app.call("GET", "/api/categorias/", &bob, None).await;
    assert!(categories.as_array().unwrap().is_empty());

    // Guessing ids behaves exactly like a missing record
    let payment_uri = format!("/api/pagamentos/{}/", a_payment["id"]);
    let category_uri = format!("/api/categorias/{}/", a_category["id"]);

    let (status, _) = app.call("GET", &payment_uri, &bob, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.call("PATCH", &payment_uri, &bob, Some(json!({"descricao": "hijacked"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.call("PUT", &payment_uri, &bob, Some(payment_body("hijacked"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.call("DELETE", &payment_uri, &bob, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.call("GET", &category_uri, &bob, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.call("PUT", &category_uri, &bob, Some(json!({"nome": "hijacked"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.call("DELETE", &category_uri, &bob, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Nor can Bob attach Alice's category to his own payment
    let mut sneaky = payment_body("Referência cruzada");
    sneaky["categoria"] = a_category["id"].clone();
    let (status, _) = app.call("POST", "/api/pagamentos/", &bob, Some(sneaky)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Alice's records are untouched
    let (status, still_there) = app.call("GET", &payment_uri, &alice, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(still_there["descricao"], "Pagamento A");
    let (status, _) = app.call("GET", &category_uri, &alice, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_tenant_field_in_body_is_ignored() {
    let app = TestApp::new().await;
    let tenant_a = app.create_tenant("Empresa A").await;
    let tenant_b = app.create_tenant("Empresa B").await;
    let alice = app.token_for(app.create_user("alice", false, Some(tenant_a)).await.id);
    let bob = app.token_for(app.create_user("bob", false, Some(tenant_b)).await.id);

    let mut body = payment_body("Tentativa");
    body["cliente"] = json!(tenant_b);
    body["cliente_id"] = json!(tenant_b);
    let (status, _) = app.call("POST", "/api/pagamentos/", &alice, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.call("POST", "/api/categorias/", &alice, Some(json!({"nome": "Minha", "cliente": tenant_b}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, a_list) = app.call("GET", "/api/pagamentos/", &alice, None).await;
    assert_eq!(descriptions(&a_list), vec!["Tentativa"]);
    let (_, b_list) = app.call("GET", "/api/pagamentos/", &bob, None).await;
    assert!(b_list.as_array().unwrap().is_empty());
    let (_, b_categories) = app.call("GET", "/api/categorias/", &bob, None).await;
    assert!(b_categories.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_override_header() {
    let app = TestApp::new().await;
    let own = app.create_tenant("Escritório Contábil").await;
    let managed = app.create_tenant("Cliente Gerenciado").await;
    let admin = app.create_user("root", true, Some(own)).await;
    let admin_token = app.token_for(admin.id);
    let client = app.token_for(app.create_user("cliente", false, Some(managed)).await.id);

    let managed_header = managed.to_string();

    // Valid override: create and list on behalf of the managed tenant
    let (status, created) = app.send(
        "POST", "/api/pagamentos/", Auth::Bearer(&admin_token), Some(&managed_header), Some(payment_body("Lançado pelo contador")),
    ).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, client_view) = app.call("GET", "/api/pagamentos/", &client, None).await;
    assert_eq!(descriptions(&client_view), vec!["Lançado pelo contador"]);

    let (_, managed_view) = app.send("GET", "/api/pagamentos/", Auth::Bearer(&admin_token), Some(&managed_header), None).await;
    assert_eq!(descriptions(&managed_view), vec!["Lançado pelo contador"]);

    let (status, _) = app.send(
        "GET", &format!("/api/pagamentos/{}/", created["id"]), Auth::Bearer(&admin_token), Some(&managed_header), None,
    ).await;
    assert_eq!(status, StatusCode::OK);

    // Without the header the admin sees their own tenant
    app.call("POST", "/api/pagamentos/", &admin_token, Some(payment_body("Despesa própria"))).await;
    let (_, own_view) = app.call("GET", "/api/pagamentos/", &admin_token, None).await;
    assert_eq!(descriptions(&own_view), vec!["Despesa própria"]);

    // Non-numeric and unknown overrides fall back to the admin's own tenant
    for bad in ["abc", "99999", "1.5", ""] {
        let (status, view) = app.send("GET", "/api/pagamentos/", Auth::Bearer(&admin_token), Some(bad), None).await;
        assert_eq!(status, StatusCode::OK, "override {:?}", bad);
        assert_eq!(descriptions(&view), vec!["Despesa própria"], "override {:?}", bad);
    }
}

#[tokio::test]
async fn test_override_header_ignored_for_regular_users() {
    let app = TestApp::new().await;
    let tenant_a = app.create_tenant("Empresa A").await;
    let tenant_b = app.create_tenant("Empresa B").await;
    let alice = app.token_for(app.create_user("alice", false, Some(tenant_a)).await.id);
    let bob = app.token_for(app.create_user("bob", false, Some(tenant_b)).await.id);

    app.call("POST", "/api/pagamentos/", &bob, Some(payment_body("Segredo de B"))).await;

    let header = tenant_b.to_string();
    let (status, view) = app.send("GET", "/api/pagamentos/", Auth::Bearer(&alice), Some(&header), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(view.as_array().unwrap().is_empty());

    let (status, _) = app.send(
        "POST", "/api/pagamentos/", Auth::Bearer(&alice), Some(&header), Some(payment_body("De A")),
    ).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, b_view) = app.call("GET", "/api/pagamentos/", &bob, None).await;
    assert_eq!(descriptions(&b_view), vec!["Segredo de B"]);
}

#[tokio::test]
async fn test_admin_without_tenant_needs_valid_override() {
    let app = TestApp::new().await;
    let managed = app.create_tenant("Cliente").await;
    let admin = app.token_for(app.create_user("staff", true, None).await.id);

    let (status, body) = app.call("GET", "/api/pagamentos/", &admin, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "No tenant associated with this user");

    let (status, _) = app.send("GET", "/api/categorias/", Auth::Bearer(&admin), Some("12345"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let header = managed.to_string();
    let (status, _) = app.send("GET", "/api/categorias/", Auth::Bearer(&admin), Some(&header), None).await;
    assert_eq!(status, StatusCode::OK);
}
