use common::BlogStats;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder, QuerySelect, Set,
    TransactionSession, TransactionTrait, sea_query::LockType,
};
use tracing::{info, warn};

use crate::entity::{blog, user};
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::models::blog::{
    BlogListItem, CreateBlogRequest, UpdateBlogRequest, non_empty, validate_create_blog,
    validate_update_blog,
};

pub struct BlogService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> BlogService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Every blog in insertion order, each with its owner resolved.
    pub async fn list(&self) -> Result<Vec<BlogListItem>, DbErr> {
        let rows = blog::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(blog::Column::Id)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(blog, owner)| BlogListItem::new(blog, owner))
            .collect())
    }

    /// Aggregations over every stored blog.
    pub async fn stats(&self) -> Result<BlogStats, DbErr> {
        let blogs = blog::Entity::find()
            .order_by_asc(blog::Column::Id)
            .all(self.conn)
            .await?;
        Ok(common::blog_stats(&blogs))
    }

    /// Persist a new blog owned by `actor`, then append it to the owner's
    /// back-reference list.
    ///
    /// The two writes are not atomic. If the second one fails the blog stays
    /// without a back-reference and the error is returned. Concurrent creates
    /// by the same owner are serialized on the owner row, so no append is lost.
    pub async fn create(
        &self,
        actor: &AuthUser,
        payload: CreateBlogRequest,
    ) -> Result<blog::Model, AppError> {
        validate_create_blog(&payload)?;

        let owner = user::Entity::find_by_id(actor.user_id)
            .one(self.conn)
            .await?
            .ok_or_else(|| {
                warn!(user_id = actor.user_id, "Token refers to a missing user");
                AppError::PermissionDenied("user not found".into())
            })?;

        let title = non_empty(payload.title.as_deref()).unwrap_or_default();
        let url = non_empty(payload.url.as_deref()).unwrap_or_default();
        let author = non_empty(payload.author.as_deref()).map(str::to_string);

        let new_blog = blog::ActiveModel {
            title: Set(title.to_string()),
            author: Set(author),
            url: Set(url.to_string()),
            likes: Set(payload.likes.unwrap_or(0)),
            user_id: Set(owner.id),
            ..Default::default()
        };
        let saved = new_blog.insert(self.conn).await?;

        self.append_blog_ref(owner.id, saved.id)
            .await
            .map_err(|e| {
                warn!(
                    blog_id = saved.id,
                    "Blog saved but owner back-reference update failed"
                );
                AppError::from(e)
            })?;

        info!(blog_id = saved.id, user_id = saved.user_id, "Blog created");
        Ok(saved)
    }

    /// Replace every truthy field of the payload; the owner never changes.
    pub async fn update(
        &self,
        actor: &AuthUser,
        id: i32,
        payload: UpdateBlogRequest,
    ) -> Result<blog::Model, AppError> {
        validate_update_blog(&payload)?;

        let existing = self.find_owned(actor, id).await?;
        let mut active: blog::ActiveModel = existing.clone().into();

        if let Some(title) = non_empty(payload.title.as_deref()) {
            active.title = Set(title.to_string());
        }
        if let Some(author) = non_empty(payload.author.as_deref()) {
            active.author = Set(Some(author.to_string()));
        }
        if let Some(url) = non_empty(payload.url.as_deref()) {
            active.url = Set(url.to_string());
        }
        if let Some(likes) = payload.likes.filter(|&likes| likes != 0) {
            active.likes = Set(likes);
        }

        if !active.is_changed() {
            return Ok(existing);
        }

        let model = active.update(self.conn).await?;
        Ok(model)
    }

    /// Remove a blog owned by `actor`. The owner's back-reference list is
    /// left as is.
    pub async fn delete(&self, actor: &AuthUser, id: i32) -> Result<(), AppError> {
        let blog = self.find_owned(actor, id).await?;
        blog::Entity::delete_by_id(blog.id).exec(self.conn).await?;
        info!(blog_id = id, user_id = actor.user_id, "Blog deleted");
        Ok(())
    }

    /// Re-read the owner under a row lock and append `blog_id` to its list.
    async fn append_blog_ref(&self, user_id: i32, blog_id: i32) -> Result<(), DbErr> {
        let txn = self.conn.begin().await?;

        let owner = user::Entity::find_by_id(user_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {user_id} not found")))?;

        let mut refs = owner.blog_refs()?;
        refs.push(blog_id);
        let mut active: user::ActiveModel = owner.into();
        active.blog_ids = Set(serde_json::json!(refs));
        active.update(&txn).await?;

        txn.commit().await
    }

    async fn find_owned(&self, actor: &AuthUser, id: i32) -> Result<blog::Model, AppError> {
        let blog = blog::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("blog {id} not found")))?;

        if blog.user_id != actor.user_id {
            warn!(
                blog_id = id,
                owner_id = blog.user_id,
                actor_id = actor.user_id,
                "Rejected mutation by non-owner"
            );
            return Err(AppError::NotOwner);
        }
        Ok(blog)
    }
}
