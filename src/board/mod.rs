//! Board module for postboard.
//!
//! Posts on the free and notice boards: the model, its repository, and the
//! service that applies the ownership and notice rules.

mod post;
mod repository;
mod service;
mod types;

pub use post::{NewPost, Post, PostUpdate, PostWithAuthor};
pub use repository::PostRepository;
pub use service::{parse_page, total_pages, BoardService, ListQuery, PostPage, PAGE_SIZE};
pub use types::PostType;
