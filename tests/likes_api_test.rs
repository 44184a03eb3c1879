//! End-to-end coverage of the like-toggle endpoints: idempotent add,
//! rejected remove on a missing pair, and the counter staying in step with
//! the relation rows across the whole toggle lifecycle.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{create_test_app, seed_article, send, send_raw};

#[tokio::test]
async fn like_toggle_lifecycle() {
    let (app, pool) = create_test_app().await;
    seed_article(&pool, "a1", "author").await;

    let body = json!({"article_id": "a1", "user_id": "u1"});

    // First like.
    let (status, value) = send(&app, Method::POST, "/api/likes", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"likes": 1}));

    // Same like again: no duplicate, same count.
    let (status, value) = send(&app, Method::POST, "/api/likes", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"likes": 1}));

    let relation_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(relation_rows, 1);

    let (status, value) = send(
        &app,
        Method::GET,
        "/api/likes/status?article_id=a1&user_id=u1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"liked": true}));

    // Unlike.
    let (status, value) = send(&app, Method::DELETE, "/api/likes", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"likes": 0}));

    // Unlike again: the pair no longer exists.
    let (status, value) = send(&app, Method::DELETE, "/api/likes", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value, json!({"error": "Like not found"}));

    let (status, value) = send(
        &app,
        Method::GET,
        "/api/likes/status?article_id=a1&user_id=u1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"liked": false}));
}

#[tokio::test]
async fn count_tracks_distinct_users() {
    let (app, pool) = create_test_app().await;
    seed_article(&pool, "a1", "author").await;

    for (i, user) in ["u1", "u2", "u3"].iter().enumerate() {
        let (status, value) = send(
            &app,
            Method::POST,
            "/api/likes",
            Some(json!({"article_id": "a1", "user_id": user})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({"likes": i as i64 + 1}));
    }

    let (status, value) = send(&app, Method::GET, "/api/likes/count/a1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"count": 3}));

    // The denormalized column on the article matches the relation count.
    let column: i64 = sqlx::query_scalar("SELECT likes FROM articles WHERE id = 'a1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(column, 3);
}

#[tokio::test]
async fn rejected_remove_leaves_counter_untouched() {
    let (app, pool) = create_test_app().await;
    seed_article(&pool, "a1", "author").await;

    send(
        &app,
        Method::POST,
        "/api/likes",
        Some(json!({"article_id": "a1", "user_id": "u1"})),
    )
    .await;

    // u2 never liked a1.
    let (status, value) = send(
        &app,
        Method::DELETE,
        "/api/likes",
        Some(json!({"article_id": "a1", "user_id": "u2"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value, json!({"error": "Like not found"}));

    let column: i64 = sqlx::query_scalar("SELECT likes FROM articles WHERE id = 'a1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(column, 1);
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    let (app, _pool) = create_test_app().await;

    let (status, value) = send_raw(&app, Method::POST, "/api/likes", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value, json!({"error": "Invalid request"}));

    let (status, value) = send_raw(&app, Method::DELETE, "/api/likes", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value, json!({"error": "Invalid request"}));
}

#[tokio::test]
async fn likes_are_independent_across_articles() {
    let (app, pool) = create_test_app().await;
    seed_article(&pool, "a1", "author").await;
    seed_article(&pool, "a2", "author").await;

    send(
        &app,
        Method::POST,
        "/api/likes",
        Some(json!({"article_id": "a1", "user_id": "u1"})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/likes",
        Some(json!({"article_id": "a2", "user_id": "u1"})),
    )
    .await;
    send(
        &app,
        Method::DELETE,
        "/api/likes",
        Some(json!({"article_id": "a1", "user_id": "u1"})),
    )
    .await;

    let (_, value) = send(&app, Method::GET, "/api/likes/count/a1", None).await;
    assert_eq!(value, json!({"count": 0}));
    let (_, value) = send(&app, Method::GET, "/api/likes/count/a2", None).await;
    assert_eq!(value, json!({"count": 1}));
}
