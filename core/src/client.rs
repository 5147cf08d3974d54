//! Stateless HTTP request builder and response parser for the blog API.
//!
//! # Design
//! `BlogClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Comment, NewComment, Post, User};

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Synchronous, stateless client for the users/posts/comments collections.
#[derive(Debug, Clone)]
pub struct BlogClient {
    base_url: String,
}

impl BlogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.get(format!("{}/users", self.base_url))
    }

    pub fn build_list_posts(&self, user_id: u64) -> HttpRequest {
        self.get(format!("{}/posts?userId={user_id}", self.base_url))
    }

    pub fn build_list_comments(&self, post_id: u64) -> HttpRequest {
        self.get(format!("{}/comments?postId={post_id}", self.base_url))
    }

    pub fn build_create_comment(&self, input: &NewComment) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/comments", self.base_url),
            headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_comment(&self, comment_id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/comments/{comment_id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_comments(&self, response: HttpResponse) -> Result<Vec<Comment>, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        parse_json(response)
    }

    /// Any 2xx answer counts; the body, if any, is ignored.
    pub fn parse_delete_comment(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BlogClient {
        BlogClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_users_produces_correct_request() {
        let req = client().build_list_users();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/users");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_posts_filters_by_user() {
        let req = client().build_list_posts(4);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/posts?userId=4");
    }

    #[test]
    fn build_list_comments_filters_by_post() {
        let req = client().build_list_comments(12);
        assert_eq!(req.path, "http://localhost:3000/comments?postId=12");
    }

    #[test]
    fn build_create_comment_produces_correct_request() {
        let input = NewComment {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            body: "Nice post".to_string(),
            post_id: 12,
        };
        let req = client().build_create_comment(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/comments");
        assert_eq!(
            req.headers,
            vec![(
                "content-type".to_string(),
                "application/json; charset=UTF-8".to_string()
            )]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Ann");
        assert_eq!(body["email"], "ann@example.com");
        assert_eq!(body["body"], "Nice post");
        assert_eq!(body["postId"], 12);
    }

    #[test]
    fn build_delete_comment_uses_comment_id() {
        let req = client().build_delete_comment(7);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/comments/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = BlogClient::new("http://localhost:3000/api/");
        assert_eq!(client.build_list_users().path, "http://localhost:3000/api/users");
    }

    #[test]
    fn parse_list_posts_success() {
        let posts = client()
            .parse_list_posts(response(
                200,
                r#"[{"id":1,"userId":2,"title":"First","body":"Text"}]"#,
            ))
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].user_id, 2);
    }

    #[test]
    fn parse_list_comments_empty() {
        let comments = client().parse_list_comments(response(200, "[]")).unwrap();
        assert!(comments.is_empty());
    }

    #[test]
    fn parse_create_comment_accepts_201() {
        let comment = client()
            .parse_create_comment(response(
                201,
                r#"{"id":31,"postId":12,"name":"Ann","email":"ann@example.com","body":"Hi"}"#,
            ))
            .unwrap();
        assert_eq!(comment.id, 31);
        assert_eq!(comment.post_id, 12);
    }

    #[test]
    fn parse_delete_comment_accepts_empty_200_and_204() {
        assert!(client().parse_delete_comment(response(204, "")).is_ok());
        assert!(client().parse_delete_comment(response(200, "{}")).is_ok());
    }

    #[test]
    fn non_success_status_is_an_http_error() {
        let err = client().parse_list_users(response(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));

        let err = client().parse_delete_comment(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
    }

    #[test]
    fn parse_list_users_bad_json() {
        let err = client().parse_list_users(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
