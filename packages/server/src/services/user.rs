use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use tracing::{debug, info};

use crate::config::AuthConfig;
use crate::entity::{blog, user};
use crate::error::AppError;
use crate::models::auth::{LoginRequest, LoginResponse, validate_login_request};
use crate::models::user::{RegisterRequest, UserBlog, UserResponse, validate_register_request};
use crate::utils::{hash, jwt};

const USERNAME_TAKEN: &str = "expected `username` to be unique";

pub struct UserService<'a, C: ConnectionTrait> {
    conn: &'a C,
    auth: &'a AuthConfig,
}

impl<'a, C: ConnectionTrait> UserService<'a, C> {
    pub fn new(conn: &'a C, auth: &'a AuthConfig) -> Self {
        Self { conn, auth }
    }

    /// Create an account. The password is hashed before it is stored.
    pub async fn register(&self, payload: RegisterRequest) -> Result<UserResponse, AppError> {
        validate_register_request(&payload)?;

        let username = payload.username.trim().to_string();

        let taken = user::Entity::find()
            .filter(user::Column::Username.eq(username.as_str()))
            .one(self.conn)
            .await?
            .is_some();
        if taken {
            return Err(AppError::Validation(USERNAME_TAKEN.into()));
        }

        let password_hash = hash::hash_password(&payload.password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

        let new_user = user::ActiveModel {
            username: Set(username),
            name: Set(payload.name.filter(|n| !n.trim().is_empty())),
            password_hash: Set(password_hash),
            blog_ids: Set(serde_json::json!([])),
            ..Default::default()
        };

        let user = new_user.insert(self.conn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                debug!("Registration race condition: unique constraint caught on insert");
                AppError::Validation(USERNAME_TAKEN.into())
            }
            _ => AppError::from(e),
        })?;

        info!(user_id = user.id, "User registered");
        Ok(UserResponse::new(user, Vec::new()))
    }

    /// Check credentials and issue a bearer token.
    pub async fn login(&self, payload: LoginRequest) -> Result<LoginResponse, AppError> {
        validate_login_request(&payload)?;

        let user = user::Entity::find()
            .filter(user::Column::Username.eq(payload.username.trim()))
            .one(self.conn)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let is_valid = hash::verify_password(&payload.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = jwt::sign(
            user.id,
            &user.username,
            &self.auth.jwt_secret,
            self.auth.token_ttl_hours,
        )
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

        Ok(LoginResponse {
            token,
            username: user.username,
            name: user.name,
        })
    }

    /// Every user with the blogs in its back-reference list. References to
    /// deleted blogs are skipped.
    pub async fn list(&self) -> Result<Vec<UserResponse>, DbErr> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(self.conn)
            .await?;

        let refs_by_user = users
            .iter()
            .map(user::Model::blog_refs)
            .collect::<Result<Vec<_>, _>>()?;
        let all_refs: Vec<i32> = refs_by_user.iter().flatten().copied().collect();
        let mut blogs: HashMap<i32, blog::Model> = if all_refs.is_empty() {
            HashMap::new()
        } else {
            blog::Entity::find()
                .filter(blog::Column::Id.is_in(all_refs))
                .all(self.conn)
                .await?
                .into_iter()
                .map(|b| (b.id, b))
                .collect()
        };

        Ok(users
            .into_iter()
            .zip(refs_by_user)
            .map(|(user, refs)| {
                let owned = refs
                    .into_iter()
                    .filter_map(|id| blogs.remove(&id))
                    .map(UserBlog::from)
                    .collect();
                UserResponse::new(user, owned)
            })
            .collect())
    }
}
