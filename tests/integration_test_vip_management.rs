mod common;

use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_create_vip_with_opening_balance_books_initial_recharge() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;

    let member_id = app.create_member(&token, "Zhang Wei", 500.0, 0.9).await;

    let res = app.get(&format!("/api/vip/{}", member_id), &token).await;
    assert_eq!(res.status().as_u16(), 200);
    let body = parse_body(res).await;
    assert_eq!(body["balance"], 500.0);
    assert_eq!(body["discount"], 0.9);

    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["kind"], "recharge");
    assert_eq!(history[0]["amount"], 500.0);
    assert_eq!(history[0]["bonus_amount"], 0.0);
}

#[tokio::test]
async fn test_create_vip_without_balance_has_empty_history() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;

    let member_id = app.create_member(&token, "Li Na", 0.0, 1.0).await;

    let res = app.get(&format!("/api/vip/{}", member_id), &token).await;
    let body = parse_body(res).await;
    assert!(body["history"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_vip_validation() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;

    let cases = [
        json!({ "name": "X", "phone": "13812345678" }),
        json!({ "name": "Zhang Wei", "phone": "0381234567" }),
        json!({ "name": "Zhang Wei", "phone": "13812345678", "balance": -1.0 }),
        json!({ "name": "Zhang Wei", "phone": "13812345678", "discount": 0.05 }),
        json!({ "name": "Zhang Wei", "phone": "13812345678", "discount": 1.5 }),
    ];
    for case in cases {
        let res = app.post("/api/vip", &token, case.clone()).await;
        assert_eq!(res.status().as_u16(), 400, "case should be rejected: {}", case);
    }
}

#[tokio::test]
async fn test_vip_update_never_touches_balance() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    let member_id = app.create_member(&token, "Zhang Wei", 300.0, 1.0).await;

    let res = app
        .put(
            &format!("/api/vip/{}", member_id),
            &token,
            json!({ "name": "Zhang Wei Jr", "phone": "13900001111", "discount": 0.8 }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 200);
    let body = parse_body(res).await;
    assert_eq!(body["name"], "Zhang Wei Jr");
    assert_eq!(body["discount"], 0.8);
    // Balance is ledger-owned; the profile update leaves it alone.
    assert_eq!(body["balance"], 300.0);
}

#[tokio::test]
async fn test_vip_delete_blocked_by_history() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;

    // With an opening balance there is already a transaction on record.
    let with_history = app.create_member(&token, "Zhang Wei", 100.0, 1.0).await;
    let res = app.delete(&format!("/api/vip/{}", with_history), &token).await;
    assert_eq!(res.status().as_u16(), 409);

    let clean = app.create_member(&token, "Li Na", 0.0, 1.0).await;
    let res = app.delete(&format!("/api/vip/{}", clean), &token).await;
    assert_eq!(res.status().as_u16(), 200);

    let res = app.get(&format!("/api/vip/{}", clean), &token).await;
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn test_stores_cannot_see_each_others_members() {
    let app = TestApp::new().await;
    let (_s1, token_a) = app.register_store("Lotus Spa", "lotus_owner").await;
    let (_s2, token_b) = app.register_store("Bamboo Spa", "bamboo_owner").await;

    let member_id = app.create_member(&token_a, "Zhang Wei", 100.0, 1.0).await;

    // Store B gets a 404 on store A's member, for reads and for ledger ops.
    let res = app.get(&format!("/api/vip/{}", member_id), &token_b).await;
    assert_eq!(res.status().as_u16(), 404);

    let res = app
        .post(
            &format!("/api/vip/{}/recharge", member_id),
            &token_b,
            json!({ "amount": 50.0 }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 404);

    let res = app.get("/api/vip", &token_b).await;
    let body = parse_body(res).await;
    assert!(body.as_array().unwrap().is_empty());
}
