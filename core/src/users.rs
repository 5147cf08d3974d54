//! The author dropdown.
//!
//! The user list is fetched once when the dashboard mounts. While the menu is
//! open the selector holds a pointer subscription and closes itself on the
//! first click outside `USER_SELECTOR`.

use crate::load::Loader;
use crate::pointer::{PointerBus, PointerSubscription, Region};
use crate::types::User;

pub const USER_SELECTOR: Region = Region("user-selector");

#[derive(Debug, Default)]
pub struct UserSelector {
    users: Loader<Vec<User>>,
    outside_clicks: Option<PointerSubscription>,
}

impl UserSelector {
    pub fn users(&self) -> &[User] {
        self.users.value().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find(&self, user_id: u64) -> Option<&User> {
        self.users().iter().find(|user| user.id == user_id)
    }

    pub fn is_open(&self) -> bool {
        self.outside_clicks.is_some()
    }

    pub fn toggle(&mut self, bus: &PointerBus) {
        if self.is_open() {
            self.close();
        } else {
            self.outside_clicks = Some(bus.subscribe());
        }
    }

    pub fn close(&mut self) {
        self.outside_clicks = None;
    }

    /// Processes pointer events received since the last call.
    pub fn process_pointer_events(&mut self) {
        let Some(subscription) = self.outside_clicks.as_mut() else {
            return;
        };
        let clicked_outside = subscription
            .drain()
            .iter()
            .any(|event| !event.is_inside(USER_SELECTOR));
        if clicked_outside {
            self.close();
        }
    }

    pub(crate) fn loader_mut(&mut self) -> &mut Loader<Vec<User>> {
        &mut self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::TokenSource;
    use crate::pointer::PointerEvent;

    #[test]
    fn toggle_subscribes_and_unsubscribes() {
        let bus = PointerBus::default();
        let mut selector = UserSelector::default();

        selector.toggle(&bus);
        assert!(selector.is_open());
        assert_eq!(bus.subscriber_count(), 1);

        selector.toggle(&bus);
        assert!(!selector.is_open());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn click_outside_closes_menu() {
        let bus = PointerBus::default();
        let mut selector = UserSelector::default();
        selector.toggle(&bus);

        bus.publish(PointerEvent::on([Region("sidebar")]));
        selector.process_pointer_events();

        assert!(!selector.is_open());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn click_inside_keeps_menu_open() {
        let bus = PointerBus::default();
        let mut selector = UserSelector::default();
        selector.toggle(&bus);

        bus.publish(PointerEvent::on([Region("dropdown-item"), USER_SELECTOR]));
        selector.process_pointer_events();

        assert!(selector.is_open());
    }

    #[test]
    fn clicks_while_closed_are_never_seen() {
        let bus = PointerBus::default();
        let mut selector = UserSelector::default();
        bus.publish(PointerEvent::elsewhere());

        selector.toggle(&bus);
        selector.process_pointer_events();
        assert!(selector.is_open());
    }

    #[test]
    fn find_looks_up_loaded_users() {
        let mut tokens = TokenSource::default();
        let mut selector = UserSelector::default();
        let token = tokens.next();
        selector.loader_mut().begin(token);
        selector.loader_mut().finish(
            token,
            Ok(vec![User {
                id: 3,
                name: "Clementine".to_string(),
            }]),
        );

        assert_eq!(selector.find(3).map(|u| u.name.as_str()), Some("Clementine"));
        assert!(selector.find(4).is_none());
    }
}
