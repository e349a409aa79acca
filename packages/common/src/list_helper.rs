//! Aggregations over an in-memory list of blogs.
//!
//! Every helper borrows its input, has no side effects, and returns a zeroed
//! result for an empty list. Ties always go to whichever candidate appears
//! first in input order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Read access to the fields the aggregation helpers work on.
pub trait BlogLike {
    fn title(&self) -> &str;
    /// Credited author, `None` when the blog has none. Such blogs are grouped
    /// under the empty author `""`.
    fn author(&self) -> Option<&str>;
    fn likes(&self) -> i64;
}

impl<T: BlogLike + ?Sized> BlogLike for &T {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn author(&self) -> Option<&str> {
        (**self).author()
    }

    fn likes(&self) -> i64 {
        (**self).likes()
    }
}

/// A blog reduced to title, author and like count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogRecord {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub likes: i64,
}

impl BlogRecord {
    pub fn new(title: impl Into<String>, author: impl Into<String>, likes: i64) -> Self {
        Self {
            title: title.into(),
            author: Some(author.into()),
            likes,
        }
    }
}

impl BlogLike for BlogRecord {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    fn likes(&self) -> i64 {
        self.likes
    }
}

/// The blog with the most likes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FavoriteBlog {
    #[schema(example = "Canonical string reduction")]
    pub title: String,
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: String,
    #[schema(example = 12)]
    pub likes: i64,
}

/// The author with the most blogs, and how many.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthorBlogs {
    #[schema(example = "Robert C. Martin")]
    pub author: String,
    #[schema(example = 3)]
    pub blogs: u64,
}

/// The author whose blogs collected the most likes, and the total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthorLikes {
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: String,
    #[schema(example = 17)]
    pub likes: i64,
}

/// All aggregations computed over the same list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogStats {
    #[schema(example = 36)]
    pub total_likes: i64,
    pub favorite_blog: FavoriteBlog,
    pub most_blogs: AuthorBlogs,
    pub most_likes: AuthorLikes,
}

struct AuthorGroup<'a> {
    author: &'a str,
    blogs: u64,
    likes: i64,
}

/// Groups blogs by author, keeping authors in the order they were first seen.
fn group_by_author<T: BlogLike>(blogs: &[T]) -> Vec<AuthorGroup<'_>> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<AuthorGroup<'_>> = Vec::new();

    for blog in blogs {
        let author = blog.author().unwrap_or_default();
        let slot = *slots.entry(author).or_insert_with(|| {
            groups.push(AuthorGroup {
                author,
                blogs: 0,
                likes: 0,
            });
            groups.len() - 1
        });
        groups[slot].blogs += 1;
        groups[slot].likes += blog.likes();
    }

    groups
}

/// Strictly-greater scan: the earliest item wins on ties.
fn first_max_by_key<'a, T, K, F>(items: impl IntoIterator<Item = &'a T>, key: F) -> Option<&'a T>
where
    T: 'a,
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut best: Option<(&'a T, K)> = None;
    for item in items {
        let k = key(item);
        let replace = match &best {
            Some((_, best_key)) => k > *best_key,
            None => true,
        };
        if replace {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

/// Sum of the likes of every blog.
pub fn total_likes<T: BlogLike>(blogs: &[T]) -> i64 {
    blogs.iter().map(BlogLike::likes).sum()
}

pub fn favorite_blog<T: BlogLike>(blogs: &[T]) -> FavoriteBlog {
    first_max_by_key(blogs, BlogLike::likes)
        .map(|blog| FavoriteBlog {
            title: blog.title().to_string(),
            author: blog.author().unwrap_or_default().to_string(),
            likes: blog.likes(),
        })
        .unwrap_or_default()
}

pub fn most_blogs<T: BlogLike>(blogs: &[T]) -> AuthorBlogs {
    let groups = group_by_author(blogs);
    first_max_by_key(&groups, |g: &AuthorGroup<'_>| g.blogs)
        .map(|g| AuthorBlogs {
            author: g.author.to_string(),
            blogs: g.blogs,
        })
        .unwrap_or_default()
}

pub fn most_likes<T: BlogLike>(blogs: &[T]) -> AuthorLikes {
    let groups = group_by_author(blogs);
    first_max_by_key(&groups, |g: &AuthorGroup<'_>| g.likes)
        .map(|g| AuthorLikes {
            author: g.author.to_string(),
            likes: g.likes,
        })
        .unwrap_or_default()
}

pub fn blog_stats<T: BlogLike>(blogs: &[T]) -> BlogStats {
    BlogStats {
        total_likes: total_likes(blogs),
        favorite_blog: favorite_blog(blogs),
        most_blogs: most_blogs(blogs),
        most_likes: most_likes(blogs),
    }
}
