//! Chat widget and carousels over HTTP.

use reqwest::StatusCode;
use serde_json::{Value, json};
use sunbag_integration_tests::{TestContext, json_body};
use sunbag_storefront::chat::responder;

fn messages(chat: &Value) -> &[Value] {
    chat["messages"].as_array().map_or(&[][..], Vec::as_slice)
}

#[tokio::test]
async fn test_chat_starts_with_welcome_and_suggestions() {
    let ctx = TestContext::spawn().await;
    let chat = json_body(ctx.get("/api/chat").await).await;

    assert_eq!(messages(&chat).len(), 1);
    assert_eq!(chat["messages"][0]["sender"], "bot");
    assert_eq!(chat["suggestions"].as_array().map(Vec::len), Some(4));
    assert_eq!(chat["loading"], false);
}

#[tokio::test]
async fn test_chat_reply_follows_rules() {
    let ctx = TestContext::spawn().await;

    let chat = json_body(
        ctx.post_json("/api/chat", &json!({ "message": "Quel est le prix du kit ?" }))
            .await,
    )
    .await;

    let transcript = messages(&chat);
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1]["sender"], "user");
    assert_eq!(transcript[2]["sender"], "bot");
    assert_eq!(
        transcript[2]["text"],
        responder::reply("Quel est le prix du kit ?")
    );
    assert_eq!(chat["loading"], false);
}

#[tokio::test]
async fn test_blank_chat_message_is_ignored() {
    let ctx = TestContext::spawn().await;
    let chat = json_body(ctx.post_json("/api/chat", &json!({ "message": "  " })).await).await;
    assert_eq!(messages(&chat).len(), 1);

    let chat = json_body(ctx.post("/api/chat/close").await).await;
    assert_eq!(messages(&chat).len(), 1);
}

#[tokio::test]
async fn test_showcase_on_home_only() {
    let ctx = TestContext::spawn().await;

    let carousel = json_body(ctx.post("/api/gallery/next").await).await;
    assert_eq!(carousel["index"], 1);
    assert_eq!(carousel["images"].as_array().map(Vec::len), Some(4));

    let carousel = json_body(ctx.post("/api/gallery/prev").await).await;
    assert_eq!(carousel["index"], 0);
    let carousel = json_body(ctx.post("/api/gallery/prev").await).await;
    assert_eq!(carousel["index"], 3);

    let carousel = json_body(
        ctx.post_json("/api/gallery/hover", &json!({ "hovered": true }))
            .await,
    )
    .await;
    assert_eq!(carousel["hovered"], true);

    ctx.post_json("/api/navigate", &json!({ "page": "story" }))
        .await;
    let resp = ctx.post("/api/gallery/next").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_showcase_autoplay_toggle() {
    let ctx = TestContext::spawn().await;

    let carousel = json_body(
        ctx.post_json("/api/gallery/autoplay", &json!({ "enabled": false }))
            .await,
    )
    .await;
    assert_eq!(carousel["autoplay"], false);

    let carousel = json_body(
        ctx.post_json("/api/gallery/autoplay", &json!({ "enabled": true }))
            .await,
    )
    .await;
    assert_eq!(carousel["autoplay"], true);

    ctx.post_json("/api/navigate", &json!({ "page": "story" }))
        .await;
    let resp = ctx
        .post_json("/api/gallery/autoplay", &json!({ "enabled": false }))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_gallery_select() {
    let ctx = TestContext::spawn().await;
    ctx.post_json("/api/view", &json!({ "product_id": "sunbag-one" }))
        .await;

    let carousel = json_body(
        ctx.post_json("/api/gallery/select", &json!({ "index": 2 }))
            .await,
    )
    .await;
    assert_eq!(carousel["index"], 2);

    let carousel = json_body(
        ctx.post_json("/api/gallery/select", &json!({ "index": 40 }))
            .await,
    )
    .await;
    assert_eq!(carousel["index"], 2);

    let carousel = json_body(ctx.post("/api/gallery/next").await).await;
    assert_eq!(carousel["index"], 3);
    let carousel = json_body(ctx.post("/api/gallery/next").await).await;
    assert_eq!(carousel["index"], 0);
}

#[tokio::test]
async fn test_container_height() {
    let ctx = TestContext::spawn().await;
    let height = |path: &'static str| {
        let ctx = &ctx;
        async move { json_body(ctx.get(path).await).await["height"].as_f64() }
    };

    // Default ratio 0.75
    assert_eq!(height("/api/gallery/height?width=400").await, Some(300.0));
    // Portrait image clamped to the maximum
    assert_eq!(
        height("/api/gallery/height?width=400&image_width=600&image_height=900").await,
        Some(450.0)
    );
    // Wide image clamped to the minimum
    assert_eq!(
        height("/api/gallery/height?width=200&image_width=1600&image_height=400").await,
        Some(180.0)
    );
}
