//! Domain DTOs for the blog API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! The wire format uses camelCase foreign keys (`userId`, `postId`); the Rust
//! side uses snake_case. Integration tests catch any schema drift between the
//! two crates.

use serde::{Deserialize, Serialize};

/// An author. Any extra fields the server sends are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// A comment as stored by the server, with its server-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// A comment draft before it is attached to a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentData {
    pub name: String,
    pub email: String,
    pub body: String,
}

impl CommentData {
    pub fn for_post(self, post_id: u64) -> NewComment {
        NewComment {
            post_id,
            name: self.name,
            email: self.email,
            body: self.body,
        }
    }
}

/// Request payload for creating a comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub body: String,
    pub post_id: u64,
}
