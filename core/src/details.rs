//! The details pane for one chosen post and its comments.
//!
//! A `PostDetails` lives exactly as long as its post stays chosen. Choosing a
//! post again builds a new one, which drops the compose form and starts a
//! fresh comment fetch.

use tracing::warn;

use crate::error::ApiError;
use crate::form::CommentForm;
use crate::load::{Loader, RequestToken, Settled};
use crate::types::{Comment, Post};

#[derive(Debug)]
pub struct PostDetails {
    post: Post,
    instance: RequestToken,
    comments: Loader<Vec<Comment>>,
    form: Option<CommentForm>,
    delete_failed: bool,
}

impl PostDetails {
    /// `instance` identifies this pane; `fetch` is the token of the comment
    /// request started along with it.
    pub fn open(post: Post, instance: RequestToken, fetch: RequestToken) -> Self {
        let mut comments = Loader::default();
        comments.begin(fetch);
        Self {
            post,
            instance,
            comments,
            form: None,
            delete_failed: false,
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn instance(&self) -> RequestToken {
        self.instance
    }

    pub fn comments(&self) -> &Loader<Vec<Comment>> {
        &self.comments
    }

    pub fn form(&self) -> Option<&CommentForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut CommentForm> {
        self.form.as_mut()
    }

    pub fn delete_failed(&self) -> bool {
        self.delete_failed
    }

    pub fn open_form(&mut self) {
        self.form.get_or_insert_with(CommentForm::default);
    }

    pub fn finish_comments(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Comment>, ApiError>,
    ) -> Settled {
        if let Err(err) = &result {
            warn!(post_id = self.post.id, error = %err, "comments failed to load");
        }
        self.comments.finish(token, result)
    }

    /// Appends the created comment at the end, or hands the failure to the
    /// form. The list is never re-fetched.
    pub fn finish_create(&mut self, result: Result<Comment, ApiError>) {
        let succeeded = result.is_ok();
        match result {
            Ok(comment) => match self.comments.value_mut() {
                Some(comments) => comments.push(comment),
                None => warn!(
                    comment_id = comment.id,
                    "comment created while the list is not loaded"
                ),
            },
            Err(err) => warn!(post_id = self.post.id, error = %err, "comment create failed"),
        }
        if let Some(form) = self.form.as_mut() {
            form.settle(succeeded);
        }
    }

    /// Drops the notice left by an earlier failed delete.
    pub fn begin_delete(&mut self) {
        self.delete_failed = false;
    }

    /// Removes `comment_id` on success. A failure leaves the list alone and
    /// raises the delete notice.
    pub fn finish_delete(&mut self, comment_id: u64, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.delete_failed = false;
                if let Some(comments) = self.comments.value_mut() {
                    comments.retain(|comment| comment.id != comment_id);
                }
            }
            Err(err) => {
                warn!(comment_id, error = %err, "comment delete failed");
                self.delete_failed = true;
            }
        }
    }
}
