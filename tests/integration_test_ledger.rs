mod common;

use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_recharge_credits_amount_plus_bonus() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    let member_id = app.create_member(&token, "Zhang Wei", 100.0, 1.0).await;

    let res = app
        .post(
            &format!("/api/vip/{}/recharge", member_id),
            &token,
            json!({ "amount": 200.0, "bonus_amount": 20.0, "note": "birthday promo" }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 200);
    let body = parse_body(res).await;

    assert_eq!(body["vip"]["balance"], 320.0);
    assert_eq!(body["transaction"]["kind"], "recharge");
    assert_eq!(body["transaction"]["amount"], 220.0);
    assert_eq!(body["transaction"]["bonus_amount"], 20.0);
    assert_eq!(body["transaction"]["note"], "birthday promo");
}

#[tokio::test]
async fn test_recharge_rejects_invalid_amounts_without_mutation() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    let member_id = app.create_member(&token, "Zhang Wei", 100.0, 1.0).await;

    for payload in [
        json!({ "amount": 0.0 }),
        json!({ "amount": -50.0 }),
        json!({ "amount": 10.0, "bonus_amount": -1.0 }),
    ] {
        let res = app
            .post(&format!("/api/vip/{}/recharge", member_id), &token, payload)
            .await;
        assert_eq!(res.status().as_u16(), 400);
    }

    let res = app.get(&format!("/api/vip/{}", member_id), &token).await;
    let body = parse_body(res).await;
    assert_eq!(body["balance"], 100.0);
    // Only the opening recharge is on record.
    assert_eq!(body["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_itemized_consume_applies_member_discount() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    let member_id = app.create_member(&token, "Zhang Wei", 1000.0, 0.8).await;
    let massage = app.create_project(&token, "Full Body Massage", 60.0).await;
    let facial = app.create_project(&token, "Facial", 40.0).await;

    // 60 + 40 = 100 original, 0.8 discount -> 80, plus 20 custom -> 100 debit.
    let res = app
        .post(
            &format!("/api/vip/{}/consume", member_id),
            &token,
            json!({
                "projects": [
                    { "project_id": massage, "quantity": 1 },
                    { "project_id": facial, "quantity": 1 }
                ],
                "custom_amount": 20.0
            }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 200);
    let body = parse_body(res).await;

    assert_eq!(body["vip"]["balance"], 900.0);
    let txn = &body["transaction"];
    assert_eq!(txn["kind"], "consume");
    assert_eq!(txn["amount"], 100.0);
    assert_eq!(txn["original_amount"], 100.0);
    assert_eq!(txn["discounted_amount"], 80.0);
    assert_eq!(txn["final_amount"], 100.0);
    assert_eq!(txn["custom_amount"], 20.0);
    assert_eq!(txn["discount"], 0.8);
    assert_eq!(txn["payment_method"], "vip_balance");
    assert_eq!(txn["projects"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_itemized_consume_groups_repeated_lines() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    let member_id = app.create_member(&token, "Zhang Wei", 1000.0, 1.0).await;
    let massage = app.create_project(&token, "Full Body Massage", 50.0).await;

    // Same project twice plus a zero quantity coerced to 1: 2 + 1 = 3 units.
    let res = app
        .post(
            &format!("/api/vip/{}/consume", member_id),
            &token,
            json!({
                "projects": [
                    { "project_id": massage, "quantity": 2 },
                    { "project_id": massage, "quantity": 0 }
                ]
            }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 200);
    let body = parse_body(res).await;

    assert_eq!(body["transaction"]["amount"], 150.0);
    let lines = body["transaction"]["projects"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 3);
    assert_eq!(body["vip"]["balance"], 850.0);
}

#[tokio::test]
async fn test_consume_rejects_unknown_or_foreign_projects() {
    let app = TestApp::new().await;
    let (_s1, token_a) = app.register_store("Lotus Spa", "lotus_owner").await;
    let (_s2, token_b) = app.register_store("Bamboo Spa", "bamboo_owner").await;

    let member_id = app.create_member(&token_a, "Zhang Wei", 1000.0, 1.0).await;
    let foreign_project = app.create_project(&token_b, "Foreign Facial", 40.0).await;

    for project_id in ["does-not-exist", foreign_project.as_str()] {
        let res = app
            .post(
                &format!("/api/vip/{}/consume", member_id),
                &token_a,
                json!({ "projects": [{ "project_id": project_id }] }),
            )
            .await;
        assert_eq!(res.status().as_u16(), 400);
    }

    // Balance untouched by the rejected attempts.
    let res = app.get(&format!("/api/vip/{}", member_id), &token_a).await;
    let body = parse_body(res).await;
    assert_eq!(body["balance"], 1000.0);
}

#[tokio::test]
async fn test_legacy_flat_consume_skips_discount() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    // 0.8 discount on record, but the flat path must not apply it.
    let member_id = app.create_member(&token, "Zhang Wei", 500.0, 0.8).await;

    let res = app
        .post(
            &format!("/api/vip/{}/consume", member_id),
            &token,
            json!({ "amount": 100.0, "custom_amount": 10.0 }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 200);
    let body = parse_body(res).await;

    assert_eq!(body["vip"]["balance"], 390.0);
    let txn = &body["transaction"];
    assert_eq!(txn["amount"], 110.0);
    assert_eq!(txn["original_amount"], 100.0);
    assert_eq!(txn["discounted_amount"], 100.0);
    assert_eq!(txn["final_amount"], 100.0);
    assert_eq!(txn["custom_amount"], 10.0);
}

#[tokio::test]
async fn test_consume_insufficient_balance_is_a_hard_stop() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    let member_id = app.create_member(&token, "Zhang Wei", 100.0, 1.0).await;

    let res = app
        .post(
            &format!("/api/vip/{}/consume", member_id),
            &token,
            json!({ "amount": 150.0 }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 400);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Insufficient balance");

    // No partial debit, no transaction appended.
    let res = app.get(&format!("/api/vip/{}", member_id), &token).await;
    let body = parse_body(res).await;
    assert_eq!(body["balance"], 100.0);
    assert_eq!(body["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_consume_rejects_invalid_amounts() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    let member_id = app.create_member(&token, "Zhang Wei", 100.0, 1.0).await;

    for payload in [
        json!({ "amount": 0.0 }),
        json!({ "amount": -5.0, "custom_amount": 0.0 }),
        json!({ "amount": 10.0, "custom_amount": -1.0 }),
    ] {
        let res = app
            .post(&format!("/api/vip/{}/consume", member_id), &token, payload)
            .await;
        assert_eq!(res.status().as_u16(), 400);
    }
}

#[tokio::test]
async fn test_recharge_rejects_unknown_technician() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    let member_id = app.create_member(&token, "Zhang Wei", 100.0, 1.0).await;

    let res = app
        .post(
            &format!("/api/vip/{}/recharge", member_id),
            &token,
            json!({ "amount": 50.0, "technician_id": "no-such-technician" }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 400);
}

#[tokio::test]
async fn test_ledger_operations_enqueue_notifications() {
    let app = TestApp::new().await;
    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    let member_id = app.create_member(&token, "Zhang Wei", 100.0, 1.0).await;

    app.post(
        &format!("/api/vip/{}/recharge", member_id),
        &token,
        json!({ "amount": 50.0 }),
    )
    .await;

    let pending = app.state.notification_repo.find_pending(10).await.unwrap();
    // Member creation plus the recharge.
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|j| j.status == "PENDING"));
    assert!(pending.iter().any(|j| j.kind == "RECHARGE"));
}
