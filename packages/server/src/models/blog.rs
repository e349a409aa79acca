use serde::{Deserialize, Serialize};

use crate::entity::{blog, user};
use crate::error::AppError;

/// Request body for creating a blog.
///
/// Every field is optional at the JSON level so that a missing `title` or
/// `url` is reported as a validation error rather than a parse error.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct CreateBlogRequest {
    #[schema(example = "First class tests")]
    #[serde(default)]
    pub title: Option<String>,
    #[schema(example = "Robert C. Martin")]
    #[serde(default)]
    pub author: Option<String>,
    #[schema(example = "http://blog.cleancoder.com/uncle-bob/2017/05/05/TestDefinitions.html")]
    #[serde(default)]
    pub url: Option<String>,
    /// Defaults to 0 when absent.
    #[schema(example = 10)]
    #[serde(default)]
    pub likes: Option<i32>,
}

/// Request body for updating a blog. Empty strings and `likes: 0` count as
/// absent and leave the stored value untouched.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateBlogRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub likes: Option<i32>,
}

/// Returns the trimmed value, or `None` when absent or blank.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn validate_likes(likes: Option<i32>) -> Result<(), AppError> {
    if let Some(likes) = likes
        && likes < 0
    {
        return Err(AppError::Validation("likes must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_create_blog(req: &CreateBlogRequest) -> Result<(), AppError> {
    if non_empty(req.title.as_deref()).is_none() || non_empty(req.url.as_deref()).is_none() {
        return Err(AppError::Validation("title and url are required".into()));
    }
    validate_likes(req.likes)
}

pub fn validate_update_blog(req: &UpdateBlogRequest) -> Result<(), AppError> {
    validate_likes(req.likes)
}

/// A blog as returned by create and update; `user` is the owner's id.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "First class tests")]
    pub title: String,
    #[schema(example = "Robert C. Martin")]
    pub author: Option<String>,
    #[schema(example = "http://blog.cleancoder.com/uncle-bob/2017/05/05/TestDefinitions.html")]
    pub url: String,
    #[schema(example = 10)]
    pub likes: i32,
    #[schema(example = 1)]
    pub user: i32,
}

impl From<blog::Model> for BlogResponse {
    fn from(m: blog::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            author: m.author,
            url: m.url,
            likes: m.likes,
            user: m.user_id,
        }
    }
}

/// Owner projection embedded in list results.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OwnerSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: Option<String>,
}

impl From<user::Model> for OwnerSummary {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
        }
    }
}

/// A blog in the public listing, with its owner resolved.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogListItem {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i32,
    pub user: Option<OwnerSummary>,
}

impl BlogListItem {
    pub fn new(blog: blog::Model, owner: Option<user::Model>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner.map(OwnerSummary::from),
        }
    }
}
