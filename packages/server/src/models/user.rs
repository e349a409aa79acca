use serde::{Deserialize, Serialize};

use crate::entity::{blog, user};
use crate::error::AppError;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 3;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique username, at least 3 characters.
    #[schema(example = "mluukkai")]
    #[serde(default)]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    #[serde(default)]
    pub name: Option<String>,
    /// Password, at least 3 characters. Only its hash is stored.
    #[schema(example = "salainen")]
    #[serde(default)]
    pub password: String,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    if payload.username.trim().chars().count() < MIN_USERNAME_LENGTH {
        return Err(AppError::Validation(format!(
            "username must be at least {MIN_USERNAME_LENGTH} characters long"
        )));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Blog projection embedded in a user.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserBlog {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i32,
}

impl From<blog::Model> for UserBlog {
    fn from(m: blog::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            author: m.author,
            url: m.url,
            likes: m.likes,
        }
    }
}

/// A user without its password hash.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: Option<String>,
    pub blogs: Vec<UserBlog>,
}

impl UserResponse {
    pub fn new(user: user::Model, blogs: Vec<UserBlog>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs,
        }
    }
}
