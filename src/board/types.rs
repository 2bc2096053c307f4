//! Post type for postboard.

use std::fmt;
use std::str::FromStr;

/// Board a post belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostType {
    /// General discussion.
    #[default]
    Free,
    /// Announcement. Only administrators may write these.
    Notice,
}

impl PostType {
    /// Convert post type to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Free => "free",
            PostType::Notice => "notice",
        }
    }

    /// Board title shown above the list.
    pub fn display_name(&self) -> &'static str {
        match self {
            PostType::Free => "자유게시판",
            PostType::Notice => "공지사항",
        }
    }

    /// Interpret a request parameter. Absent or unknown values mean `Free`;
    /// only the exact lowercase names match.
    pub fn from_param(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Check if this is the notice board.
    pub fn is_notice(&self) -> bool {
        *self == PostType::Notice
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(PostType::Free),
            "notice" => Ok(PostType::Notice),
            _ => Err(format!("unknown post type: {s}")),
        }
    }
}
