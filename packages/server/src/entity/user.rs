use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,

    /// JSON array of the ids of blogs created by this user, oldest first.
    /// Only ever appended to.
    #[sea_orm(column_type = "Json")]
    pub blog_ids: Json,

    #[sea_orm(has_many)]
    pub blogs: HasMany<super::blog::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The back-reference list decoded into ids.
    pub fn blog_refs(&self) -> Result<Vec<i32>, DbErr> {
        serde_json::from_value(self.blog_ids.clone()).map_err(|e| {
            DbErr::Json(format!(
                "user {} has a malformed blog_ids column: {}",
                self.id, e
            ))
        })
    }
}
