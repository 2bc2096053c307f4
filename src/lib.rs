//! postboard - a server-rendered discussion board.
//!
//! Free and notice boards with session login, ownership checks and
//! paginated title search.

pub mod auth;
pub mod board;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, register, validate_password, verify_password, PasswordError, PermissionError,
    RegistrationError, RegistrationRequest, SessionError, ValidationError,
};
pub use board::{BoardService, ListQuery, NewPost, Post, PostPage, PostRepository, PostType};
pub use config::Config;
pub use db::{Database, NewUser, Role, User, UserRepository};
pub use error::{BoardError, Result};
pub use web::{create_router, WebServer};
