//! The whole client state: user selector, selection, post list and details.
//!
//! # Design
//! Every user action that needs the network returns a `PendingCall`. The host
//! executes its `request`, then passes the `call` back to
//! `Dashboard::complete` together with the outcome. Calls carry the token they
//! were issued with, so a response that belongs to an older selection is
//! recognised and dropped instead of overwriting the current state. No request
//! is ever cancelled.

use tracing::{debug, warn};

use crate::client::BlogClient;
use crate::details::PostDetails;
use crate::error::ApiError;
use crate::form::Field;
use crate::http::{HttpRequest, HttpResponse};
use crate::load::{Loader, RequestToken, Settled, TokenSource};
use crate::pointer::PointerBus;
use crate::selection::{Selection, UserChange};
use crate::types::{Post, User};
use crate::users::UserSelector;

/// What an outgoing request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    ListUsers { token: RequestToken },
    ListPosts { token: RequestToken },
    ListComments { token: RequestToken },
    CreateComment { details: RequestToken },
    DeleteComment { details: RequestToken, comment_id: u64 },
}

/// A request the host has to execute.
#[derive(Debug, Clone)]
pub struct PendingCall {
    pub call: Call,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The response belonged to a selection that is no longer current.
    Stale,
}

impl From<Settled> for Completion {
    fn from(settled: Settled) -> Self {
        match settled {
            Settled::Applied => Completion::Applied,
            Settled::Stale => Completion::Stale,
        }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    client: BlogClient,
    tokens: TokenSource,
    pointer: PointerBus,
    users: UserSelector,
    selection: Selection,
    posts: Loader<Vec<Post>>,
    details: Option<PostDetails>,
}

impl Dashboard {
    pub fn new(client: BlogClient) -> Self {
        Self::with_pointer_bus(client, PointerBus::default())
    }

    pub fn with_pointer_bus(client: BlogClient, pointer: PointerBus) -> Self {
        Self {
            client,
            tokens: TokenSource::default(),
            pointer,
            users: UserSelector::default(),
            selection: Selection::default(),
            posts: Loader::default(),
            details: None,
        }
    }

    pub fn pointer_bus(&self) -> &PointerBus {
        &self.pointer
    }

    pub fn users(&self) -> &UserSelector {
        &self.users
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn posts(&self) -> &Loader<Vec<Post>> {
        &self.posts
    }

    pub fn details(&self) -> Option<&PostDetails> {
        self.details.as_ref()
    }

    /// Loads the user list. Called once when the client starts.
    pub fn mount(&mut self) -> PendingCall {
        let token = self.tokens.next();
        self.users.loader_mut().begin(token);
        self.pending(Call::ListUsers { token }, self.client.build_list_users())
    }

    pub fn toggle_user_menu(&mut self) {
        self.users.toggle(&self.pointer);
    }

    pub fn process_pointer_events(&mut self) {
        self.users.process_pointer_events();
    }

    /// Picks a user from the dropdown. An id that is not in the list clears
    /// the selection.
    pub fn select_user(&mut self, user_id: u64) -> Option<PendingCall> {
        let user = self.users.find(user_id).cloned();
        self.users.close();
        self.apply_user(user)
    }

    pub fn deselect_user(&mut self) {
        self.users.close();
        self.apply_user(None);
    }

    fn apply_user(&mut self, user: Option<User>) -> Option<PendingCall> {
        let retry = self.posts.is_failed();
        let change = self.selection.select_user(user);
        self.details = None;

        match change {
            UserChange::Cleared => {
                self.posts.clear();
                None
            }
            UserChange::Same if !retry => None,
            UserChange::Same | UserChange::Changed => {
                let user_id = self.selection.user()?.id;
                let token = self.tokens.next();
                self.posts.begin(token);
                Some(self.pending(Call::ListPosts { token }, self.client.build_list_posts(user_id)))
            }
        }
    }

    /// Opens `post_id`, or closes it if it is the post already open.
    pub fn toggle_post(&mut self, post_id: u64) -> Option<PendingCall> {
        if self.details.as_ref().is_some_and(|d| d.post().id == post_id) {
            self.close_post();
            return None;
        }
        self.choose_post(post_id)
    }

    /// Always builds a fresh details pane, even for the post already open.
    pub fn choose_post(&mut self, post_id: u64) -> Option<PendingCall> {
        let post = self
            .posts
            .value()?
            .iter()
            .find(|post| post.id == post_id)?
            .clone();

        let instance = self.tokens.next();
        let token = self.tokens.next();
        let request = self.client.build_list_comments(post.id);
        self.selection.choose_post(post.clone());
        self.details = Some(PostDetails::open(post, instance, token));
        Some(self.pending(Call::ListComments { token }, request))
    }

    pub fn close_post(&mut self) {
        self.selection.close_post();
        self.details = None;
    }

    pub fn open_comment_form(&mut self) {
        if let Some(details) = self.details.as_mut() {
            details.open_form();
        }
    }

    pub fn edit_comment(&mut self, field: Field, value: impl Into<String>) {
        if let Some(form) = self.details.as_mut().and_then(PostDetails::form_mut) {
            form.set(field, value);
        }
    }

    pub fn clear_comment_form(&mut self) {
        if let Some(form) = self.details.as_mut().and_then(PostDetails::form_mut) {
            form.clear();
        }
    }

    /// Validates the open form. Returns `None` when there is no form or a
    /// field is invalid; the form then shows the errors.
    pub fn submit_comment(&mut self) -> Option<PendingCall> {
        let details = self.details.as_mut()?;
        let post_id = details.post().id;
        let instance = details.instance();
        let form = details.form_mut()?;
        let draft = form.submit().ok()?;

        let request = match self.client.build_create_comment(&draft.for_post(post_id)) {
            Ok(request) => request,
            Err(err) => {
                warn!(post_id, error = %err, "could not build comment request");
                form.settle(false);
                return None;
            }
        };
        Some(self.pending(Call::CreateComment { details: instance }, request))
    }

    pub fn delete_comment(&mut self, comment_id: u64) -> Option<PendingCall> {
        let details = self.details.as_mut()?;
        if !details.comments().value()?.iter().any(|c| c.id == comment_id) {
            return None;
        }
        details.begin_delete();
        let call = Call::DeleteComment {
            details: details.instance(),
            comment_id,
        };
        Some(self.pending(call, self.client.build_delete_comment(comment_id)))
    }

    /// Applies the outcome of a pending call.
    pub fn complete(&mut self, call: Call, result: Result<HttpResponse, ApiError>) -> Completion {
        let completion: Completion = match call {
            Call::ListUsers { token } => {
                let users = result.and_then(|r| self.client.parse_list_users(r));
                if let Err(err) = &users {
                    warn!(error = %err, "users failed to load");
                }
                self.users.loader_mut().finish(token, users).into()
            }
            Call::ListPosts { token } => {
                let posts = result.and_then(|r| self.client.parse_list_posts(r));
                if let Err(err) = &posts {
                    warn!(error = %err, "posts failed to load");
                }
                self.posts.finish(token, posts).into()
            }
            Call::ListComments { token } => {
                let comments = result.and_then(|r| self.client.parse_list_comments(r));
                match self.details.as_mut() {
                    Some(details) => details.finish_comments(token, comments).into(),
                    None => Completion::Stale,
                }
            }
            Call::CreateComment { details } => {
                let comment = result.and_then(|r| self.client.parse_create_comment(r));
                match self.open_details(details) {
                    Some(details) => {
                        details.finish_create(comment);
                        Completion::Applied
                    }
                    None => Completion::Stale,
                }
            }
            Call::DeleteComment {
                details,
                comment_id,
            } => {
                let deleted = result.and_then(|r| self.client.parse_delete_comment(r));
                match self.open_details(details) {
                    Some(details) => {
                        details.finish_delete(comment_id, deleted);
                        Completion::Applied
                    }
                    None => Completion::Stale,
                }
            }
        };
        if completion == Completion::Stale {
            debug!(?call, "discarded response for a closed selection");
        }
        completion
    }

    fn open_details(&mut self, instance: RequestToken) -> Option<&mut PostDetails> {
        self.details
            .as_mut()
            .filter(|details| details.instance() == instance)
    }

    fn pending(&self, call: Call, request: HttpRequest) -> PendingCall {
        debug!(?call, method = %request.method, path = %request.path, "dispatching request");
        PendingCall { call, request }
    }
}
