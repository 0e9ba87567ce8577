//! In-memory stand-in for the remote users service.
//!
//! A single endpoint, `/users.php`, serves all four operations; the HTTP
//! method selects the action and the JSON body carries the arguments (the id
//! included, for update and delete). Failures answer with
//! `{"message": "..."}`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct DeleteUser {
    pub id: i64,
}

/// Body of every non-list reply.
#[derive(Debug, Serialize, Deserialize)]
pub struct Reply {
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Users {
    last_id: i64,
    rows: BTreeMap<i64, User>,
}

impl Users {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|u| Some(u.id) != except && u.email.trim().eq_ignore_ascii_case(email.trim()))
    }
}

pub type Db = Arc<RwLock<Users>>;

type Rejection = (StatusCode, Json<Reply>);

fn reject(status: StatusCode, message: &str) -> Rejection {
    (
        status,
        Json(Reply {
            message: message.to_string(),
        }),
    )
}

fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn validate(name: &str, email: &str) -> Result<(), Rejection> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "name and email are required"));
    }
    Ok(())
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Users::default()));
    Router::new()
        .route(
            "/users.php",
            get(list_users).post(create_user).put(update_user).delete(delete_user),
        )
        .with_state(db)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let users = db.read().await;
    Json(users.rows.values().cloned().collect())
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), Rejection> {
    validate(&input.name, &input.email)?;
    let mut users = db.write().await;
    if users.email_taken(&input.email, None) {
        return Err(reject(StatusCode::CONFLICT, "email already taken"));
    }
    users.last_id += 1;
    let stamp = now();
    let user = User {
        id: users.last_id,
        name: input.name,
        email: input.email.trim().to_string(),
        created_at: stamp.clone(),
        updated_at: stamp,
    };
    users.rows.insert(user.id, user.clone());
    tracing::info!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(db): State<Db>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<Reply>, Rejection> {
    validate(&input.name, &input.email)?;
    let mut users = db.write().await;
    if !users.rows.contains_key(&input.id) {
        return Err(reject(StatusCode::NOT_FOUND, "User not found"));
    }
    if users.email_taken(&input.email, Some(input.id)) {
        return Err(reject(StatusCode::CONFLICT, "email already taken"));
    }
    let user = users
        .rows
        .get_mut(&input.id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "User not found"))?;
    user.name = input.name;
    user.email = input.email.trim().to_string();
    user.updated_at = now();
    Ok(Json(Reply {
        message: "User updated".to_string(),
    }))
}

async fn delete_user(
    State(db): State<Db>,
    Json(input): Json<DeleteUser>,
) -> Result<Json<Reply>, Rejection> {
    let mut users = db.write().await;
    users
        .rows
        .remove(&input.id)
        .map(|_| {
            Json(Reply {
                message: "User deleted".to_string(),
            })
        })
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "User not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_to_json() {
        let user = User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            created_at: "2024-01-01 00:00:00".to_string(),
            updated_at: "2024-01-01 00:00:00".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["created_at"], "2024-01-01 00:00:00");
    }

    #[test]
    fn create_user_rejects_missing_email() {
        let result: Result<CreateUser, _> = serde_json::from_str(r#"{"name":"Ana"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_user_requires_id() {
        let result: Result<UpdateUser, _> = serde_json::from_str(r#"{"name":"Ana","email":"a@x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn blank_fields_fail_validation() {
        assert!(validate("Ana", "ana@x.com").is_ok());
        assert_eq!(validate(" ", "ana@x.com").unwrap_err().0, StatusCode::BAD_REQUEST);
        assert_eq!(validate("Ana", "").unwrap_err().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn email_uniqueness_ignores_case_and_self() {
        let mut users = Users::default();
        users.rows.insert(
            1,
            User {
                id: 1,
                name: "Ana".to_string(),
                email: "ana@x.com".to_string(),
                created_at: now(),
                updated_at: now(),
            },
        );
        assert!(users.email_taken("ANA@x.com", None));
        assert!(!users.email_taken("ana@x.com", Some(1)));
        assert!(!users.email_taken("bob@x.com", None));
    }

    #[test]
    fn email_uniqueness_ignores_surrounding_whitespace() {
        let mut users = Users::default();
        users.rows.insert(
            1,
            User {
                id: 1,
                name: "Ana".to_string(),
                email: "ana@x.com ".to_string(),
                created_at: now(),
                updated_at: now(),
            },
        );
        assert!(users.email_taken("ana@x.com", None));
        assert!(users.email_taken("  ANA@x.com", None));
    }
}
