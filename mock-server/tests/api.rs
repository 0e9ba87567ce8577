use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Reply, User};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri("/users.php")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn list_request() -> Request<String> {
    Request::builder()
        .uri("/users.php")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_users_empty() {
    let resp = app().oneshot(list_request()).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_user_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", r#"{"name":"Bob","email":"bob@x.com"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Bob");
    assert_eq!(user.created_at, user.updated_at);
}

#[tokio::test]
async fn create_user_blank_name_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", r#"{"name":"  ","email":"bob@x.com"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let reply: Reply = body_json(resp).await;
    assert_eq!(reply.message, "name and email are required");
}

#[tokio::test]
async fn create_user_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", r#"{"nome":"Bob"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_user_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", r#"{"id":9,"name":"Nope","email":"n@x.com"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let reply: Reply = body_json(resp).await;
    assert_eq!(reply.message, "User not found");
}

// --- delete ---

#[tokio::test]
async fn delete_user_not_found() {
    let resp = app().oneshot(json_request("DELETE", r#"{"id":9}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two
    for body in [
        r#"{"name":"Ana","email":"ana@x.com"}"#,
        r#"{"name":"Bob","email":"bob@x.com"}"#,
    ] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // duplicate email, any case
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", r#"{"name":"Dup","email":"ANA@x.com"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // list is ordered by id
    let resp = ServiceExt::ready(&mut app).await.unwrap().call(list_request()).await.unwrap();
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);

    // update keeps the id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", r#"{"id":1,"name":"Ana Maria","email":"ana@x.com"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app).await.unwrap().call(list_request()).await.unwrap();
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users[0].id, 1);
    assert_eq!(users[0].name, "Ana Maria");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("DELETE", r#"{"id":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let reply: Reply = body_json(resp).await;
    assert_eq!(reply.message, "User deleted");

    // delete again — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("DELETE", r#"{"id":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // ids are never reused
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", r#"{"name":"Cy","email":"cy@x.com"}"#))
        .await
        .unwrap();
    let user: User = body_json(resp).await;
    assert_eq!(user.id, 3);

    let resp = ServiceExt::ready(&mut app).await.unwrap().call(list_request()).await.unwrap();
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(), vec!["Bob", "Cy"]);
}

#[tokio::test]
async fn create_user_stores_trimmed_email() {
    use tower::Service;

    let mut app = app().into_service();
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", r#"{"name":"Ana","email":"ana@x.com "}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_eq!(user.email, "ana@x.com");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", r#"{"name":"Dup","email":"ana@x.com"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}
