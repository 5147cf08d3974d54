//! Process-wide pointer-event stream.
//!
//! Panels that need to react to clicks anywhere (outside-click dismissal)
//! subscribe while they are open and hold the returned guard. Dropping the
//! guard unsubscribes, so a closed or torn-down panel never sees events.

use tokio::sync::broadcast;

const CAPACITY: usize = 64;

/// A named area of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region(pub &'static str);

/// A pointer click, described by the chain of regions under the pointer from
/// innermost to outermost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    pub path: Vec<Region>,
}

impl PointerEvent {
    pub fn on(path: impl IntoIterator<Item = Region>) -> Self {
        Self {
            path: path.into_iter().collect(),
        }
    }

    /// A click that hit no named region.
    pub fn elsewhere() -> Self {
        Self { path: Vec::new() }
    }

    pub fn is_inside(&self, region: Region) -> bool {
        self.path.contains(&region)
    }
}

#[derive(Debug, Clone)]
pub struct PointerBus {
    sender: broadcast::Sender<PointerEvent>,
}

impl Default for PointerBus {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(CAPACITY);
        Self { sender }
    }
}

impl PointerBus {
    /// Delivers `event` to every live subscription. Returns how many there
    /// were.
    pub fn publish(&self, event: PointerEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> PointerSubscription {
        PointerSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Receives pointer events until dropped.
#[derive(Debug)]
pub struct PointerSubscription {
    receiver: broadcast::Receiver<PointerEvent>,
}

impl PointerSubscription {
    /// Takes every event published since the last call.
    ///
    /// Lagged events are skipped; only the ones still buffered are returned.
    pub fn drain(&mut self) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        events
    }
}
