pub mod reddit_post;

pub use reddit_post::{RedditPost, RedditPostStatus};
