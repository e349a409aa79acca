pub mod list_helper;

pub use list_helper::{
    AuthorBlogs, AuthorLikes, BlogLike, BlogRecord, BlogStats, FavoriteBlog, blog_stats,
    favorite_blog, most_blogs, most_likes, total_likes,
};
