//! The selected user and the post chosen for the details pane.

use crate::types::{Post, User};

/// What a call to `Selection::select_user` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChange {
    /// A different user is now selected.
    Changed,
    /// The already selected user was picked again.
    Same,
    /// No user is selected any more.
    Cleared,
}

#[derive(Debug, Default)]
pub struct Selection {
    user: Option<User>,
    post: Option<Post>,
}

impl Selection {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    /// Every call drops the chosen post.
    pub fn select_user(&mut self, user: Option<User>) -> UserChange {
        self.post = None;
        match user {
            None => {
                self.user = None;
                UserChange::Cleared
            }
            Some(user) if self.user.as_ref().is_some_and(|current| current.id == user.id) => {
                UserChange::Same
            }
            Some(user) => {
                self.user = Some(user);
                UserChange::Changed
            }
        }
    }

    pub fn choose_post(&mut self, post: Post) {
        self.post = Some(post);
    }

    pub fn close_post(&mut self) {
        self.post = None;
    }
}
