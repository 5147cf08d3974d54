//! What each panel shows, derived on demand from the authoritative state.
//!
//! Nothing here is stored. Front ends call these functions after every state
//! change and draw the result.

use crate::dashboard::Dashboard;
use crate::details::PostDetails;
use crate::form::{CommentForm, Field};
use crate::load::LoadState;
use crate::users::UserSelector;

pub const NO_USER_SELECTED: &str = "No user selected";
pub const NO_POSTS_YET: &str = "No posts yet";
pub const POSTS_LOADING_ERROR: &str = "Something went wrong!";
pub const NO_COMMENTS_YET: &str = "No comments yet";
pub const COMMENTS_ERROR: &str = "Something went wrong";
pub const COMMENT_DELETE_ERROR: &str = "Unable to delete a comment";
pub const COMMENT_SEND_ERROR: &str = "Unable to add a comment";
pub const CHOOSE_A_USER: &str = "Choose a user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMenuView {
    pub label: String,
    pub open: bool,
    pub items: Vec<UserItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserItem {
    pub id: u64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainPanel {
    pub no_user_selected: bool,
    pub loader: bool,
    pub error: Option<&'static str>,
    pub no_posts: bool,
    /// Empty unless the list itself is shown.
    pub posts: Vec<PostRow>,
    pub sidebar_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: u64,
    pub title: String,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsPanel {
    pub heading: String,
    pub body: String,
    pub loader: bool,
    pub error: Option<&'static str>,
    pub no_comments: bool,
    pub comments: Vec<CommentView>,
    pub delete_error: Option<&'static str>,
    pub write_button: bool,
    pub form: Option<FormView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub id: u64,
    pub author: String,
    pub mailto: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub busy: bool,
    pub send_error: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub value: String,
    /// Shown beneath the input together with the inline error icon.
    pub error: Option<&'static str>,
}

pub fn user_menu(selector: &UserSelector, selected: Option<u64>) -> UserMenuView {
    let label = selected
        .and_then(|id| selector.find(id))
        .map_or_else(|| CHOOSE_A_USER.to_string(), |user| user.name.clone());
    UserMenuView {
        label,
        open: selector.is_open(),
        items: selector
            .users()
            .iter()
            .map(|user| UserItem {
                id: user.id,
                name: user.name.clone(),
                active: Some(user.id) == selected,
            })
            .collect(),
    }
}

pub fn main_panel(dashboard: &Dashboard) -> MainPanel {
    let selected = dashboard.selection().user().is_some();
    let posts = dashboard.posts();
    let loading = posts.is_loading();
    let failed = posts.is_failed();
    let chosen = dashboard.selection().post().map(|post| post.id);

    let loaded = posts.value().map(Vec::as_slice).unwrap_or_default();
    let rows = if loading {
        Vec::new()
    } else {
        loaded
            .iter()
            .map(|post| PostRow {
                id: post.id,
                title: post.title.clone(),
                open: Some(post.id) == chosen,
            })
            .collect()
    };

    MainPanel {
        no_user_selected: !selected,
        loader: loading,
        error: (!loading && failed).then_some(POSTS_LOADING_ERROR),
        no_posts: selected && matches!(posts.state(), LoadState::Loaded(list) if list.is_empty()),
        posts: rows,
        sidebar_open: dashboard.details().is_some(),
    }
}

pub fn details_panel(details: &PostDetails) -> DetailsPanel {
    let post = details.post();
    let comments = details.comments();
    let loading = comments.is_loading();
    let failed = comments.is_failed();
    let loaded = comments.value();

    DetailsPanel {
        heading: format!("#{}: {}", post.id, post.title),
        body: post.body.clone(),
        loader: loading,
        error: (!loading && failed).then_some(COMMENTS_ERROR),
        no_comments: loaded.is_some_and(Vec::is_empty),
        comments: loaded
            .into_iter()
            .flatten()
            .map(|comment| CommentView {
                id: comment.id,
                author: comment.name.clone(),
                mailto: format!("mailto:{}", comment.email),
                body: comment.body.clone(),
            })
            .collect(),
        delete_error: details.delete_failed().then_some(COMMENT_DELETE_ERROR),
        write_button: details.form().is_none() && !loading,
        form: details.form().map(comment_form),
    }
}

pub fn comment_form(form: &CommentForm) -> FormView {
    let errors = form.errors();
    FormView {
        fields: Field::ALL
            .into_iter()
            .map(|field| FieldView {
                field,
                value: form.value(field).to_string(),
                error: errors.has(field).then(|| field.error_message()),
            })
            .collect(),
        busy: form.is_sending(),
        send_error: form.send_failed().then_some(COMMENT_SEND_ERROR),
    }
}
