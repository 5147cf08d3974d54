//! Async driver that connects a `Dashboard` to a `Transport`.
//!
//! Each action method applies the user action to the dashboard, executes the
//! resulting request (if any) and completes it before returning. Hosts that
//! want several requests in flight at once use `dispatch` and `complete`
//! directly; the dashboard's request tokens make the completion order
//! irrelevant.

use blog_core::{
    ApiError, BlogClient, Completion, Dashboard, Field, HttpResponse, PendingCall, PointerEvent,
};
use tracing::debug;

use crate::config::Config;
use crate::transport::Transport;

pub struct Session<T> {
    dashboard: Dashboard,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(client: BlogClient, transport: T) -> Self {
        Self {
            dashboard: Dashboard::new(client),
            transport,
        }
    }

    pub fn from_config(config: &Config, transport: T) -> Self {
        Self::new(config.client(), transport)
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes the request without touching the dashboard.
    pub async fn dispatch(&self, pending: &PendingCall) -> Result<HttpResponse, ApiError> {
        self.transport.execute(pending.request.clone()).await
    }

    pub fn complete(
        &mut self,
        pending: PendingCall,
        result: Result<HttpResponse, ApiError>,
    ) -> Completion {
        self.dashboard.complete(pending.call, result)
    }

    async fn run(&mut self, pending: Option<PendingCall>) -> Option<Completion> {
        let pending = pending?;
        let result = self.dispatch(&pending).await;
        let completion = self.complete(pending, result);
        debug!(?completion, "request settled");
        Some(completion)
    }

    pub async fn mount(&mut self) -> Completion {
        let pending = self.dashboard.mount();
        let result = self.dispatch(&pending).await;
        self.complete(pending, result)
    }

    pub fn toggle_user_menu(&mut self) {
        self.dashboard.toggle_user_menu();
    }

    /// Publishes a click on the pointer bus and lets subscribed panels react.
    pub fn click(&mut self, event: PointerEvent) {
        self.dashboard.pointer_bus().publish(event);
        self.dashboard.process_pointer_events();
    }

    pub async fn select_user(&mut self, user_id: u64) -> Option<Completion> {
        let pending = self.dashboard.select_user(user_id);
        self.run(pending).await
    }

    pub fn deselect_user(&mut self) {
        self.dashboard.deselect_user();
    }

    pub async fn toggle_post(&mut self, post_id: u64) -> Option<Completion> {
        let pending = self.dashboard.toggle_post(post_id);
        self.run(pending).await
    }

    pub async fn choose_post(&mut self, post_id: u64) -> Option<Completion> {
        let pending = self.dashboard.choose_post(post_id);
        self.run(pending).await
    }

    pub fn open_comment_form(&mut self) {
        self.dashboard.open_comment_form();
    }

    pub fn edit_comment(&mut self, field: Field, value: impl Into<String>) {
        self.dashboard.edit_comment(field, value);
    }

    pub fn clear_comment_form(&mut self) {
        self.dashboard.clear_comment_form();
    }

    /// `None` when validation failed and nothing was sent.
    pub async fn submit_comment(&mut self) -> Option<Completion> {
        let pending = self.dashboard.submit_comment();
        self.run(pending).await
    }

    pub async fn delete_comment(&mut self, comment_id: u64) -> Option<Completion> {
        let pending = self.dashboard.delete_comment(comment_id);
        self.run(pending).await
    }
}
