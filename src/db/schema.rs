//! Database schema and migrations for postboard.
//!
//! Migrations are applied sequentially when the database is first opened or
//! upgraded.

/// Database migrations.
///
/// Each entry is a SQL script executed in order. The schema_version table
/// records which ones have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    user_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name   TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password    TEXT NOT NULL,           -- Argon2 hash
    role        TEXT NOT NULL DEFAULT 'member',  -- 'member', 'admin'
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: posts
    r#"
CREATE TABLE posts (
    post_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    type        TEXT NOT NULL DEFAULT 'free' CHECK (type IN ('free', 'notice')),
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    view_count  INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_posts_type_created ON posts(type, created_at DESC);
CREATE INDEX idx_posts_user_id ON posts(user_id);
"#,
];
