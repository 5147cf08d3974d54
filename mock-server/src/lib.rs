use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub name: String,
    pub email: String,
    pub body: String,
    pub post_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    pub user_id: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsQuery {
    pub post_id: Option<u64>,
}

/// In-memory collections served by the mock API.
#[derive(Clone, Debug)]
pub struct Store {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    /// Listing posts answers 500 while set.
    pub fail_posts: bool,
    /// Listing comments answers 500 while set.
    pub fail_comments: bool,
    next_comment_id: u64,
}

impl Store {
    pub fn new(users: Vec<User>, posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        let next_comment_id = comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            users,
            posts,
            comments,
            fail_posts: false,
            fail_comments: false,
            next_comment_id,
        }
    }

    /// Three users: the first has two posts, the second one post, the third
    /// none. Only posts 1 and 3 have comments.
    pub fn seeded() -> Self {
        let user = |id, name: &str, email: &str| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
        };
        let post = |id, user_id, title: &str| Post {
            id,
            user_id,
            title: title.to_string(),
            body: format!("Body of post {id}"),
        };
        let comment = |id, post_id, name: &str, email: &str| Comment {
            id,
            post_id,
            name: name.to_string(),
            email: email.to_string(),
            body: format!("Comment {id}"),
        };
        Self::new(
            vec![
                user(1, "Leanne Graham", "Sincere@april.biz"),
                user(2, "Ervin Howell", "Shanna@melissa.tv"),
                user(3, "Clementine Bauch", "Nathan@yesenia.net"),
            ],
            vec![
                post(1, 1, "sunt aut facere"),
                post(2, 1, "qui est esse"),
                post(3, 2, "ea molestias quasi"),
            ],
            vec![
                comment(1, 1, "id labore ex et quam laborum", "Eliseo@gardner.biz"),
                comment(2, 1, "quo vero reiciendis velit", "Jayne_Kuhic@sydney.com"),
                comment(3, 3, "odio adipisci rerum aut", "Lew@alysha.tv"),
            ],
        )
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/users", get(list_users))
        .route("/posts", get(list_posts))
        .route("/comments", get(list_comments).post(create_comment))
        .route("/comments/{id}", delete(delete_comment))
        .with_state(db)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.read().await.users.clone())
}

async fn list_posts(
    State(db): State<Db>,
    Query(query): Query<PostsQuery>,
) -> Result<Json<Vec<Post>>, StatusCode> {
    let store = db.read().await;
    if store.fail_posts {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let posts = store
        .posts
        .iter()
        .filter(|post| query.user_id.map_or(true, |id| post.user_id == id))
        .cloned()
        .collect();
    Ok(Json(posts))
}

async fn list_comments(
    State(db): State<Db>,
    Query(query): Query<CommentsQuery>,
) -> Result<Json<Vec<Comment>>, StatusCode> {
    let store = db.read().await;
    if store.fail_comments {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let comments = store
        .comments
        .iter()
        .filter(|comment| query.post_id.map_or(true, |id| comment.post_id == id))
        .cloned()
        .collect();
    Ok(Json(comments))
}

async fn create_comment(
    State(db): State<Db>,
    Json(input): Json<CreateComment>,
) -> (StatusCode, Json<Comment>) {
    let mut store = db.write().await;
    let comment = Comment {
        id: store.next_comment_id,
        post_id: input.post_id,
        name: input.name,
        email: input.email,
        body: input.body,
    };
    store.next_comment_id += 1;
    store.comments.push(comment.clone());
    (StatusCode::CREATED, Json(comment))
}

async fn delete_comment(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut store = db.write().await;
    let before = store.comments.len();
    store.comments.retain(|comment| comment.id != id);
    if store.comments.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
