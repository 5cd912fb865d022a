use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::warn;

use crate::core::PageId;
use crate::runtime::event::EditorEvent;

/// Subscription list for editor events. Subscribers whose receiver has been
/// dropped are pruned on the next publish.
#[derive(Debug, Default)]
pub struct RerenderBus {
    subscribers: Vec<Sender<EditorEvent>>,
}

impl RerenderBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<EditorEvent> {
        let (tx, rx) = mpsc::channel::<EditorEvent>();
        self.subscribers.push(tx);
        rx
    }

    /// Lets several editors feed one host channel.
    pub fn attach(&mut self, tx: Sender<EditorEvent>) {
        self.subscribers.push(tx);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, event: EditorEvent) {
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            warn!(page = %event.page(), dropped, "dropped disconnected editor subscribers");
        }
    }
}

pub fn drain_ready(rx: &Receiver<EditorEvent>) -> Vec<EditorEvent> {
    let mut out = Vec::<EditorEvent>::new();
    loop {
        match rx.try_recv() {
            Ok(event) => out.push(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
    out
}

/// Pages that need a new render pass, one entry per page however many
/// mutations arrived.
pub fn pages_to_rerender(events: &[EditorEvent]) -> BTreeSet<PageId> {
    events
        .iter()
        .filter(|event| event.requests_rerender())
        .map(|event| event.page().clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{RerenderBus, drain_ready, pages_to_rerender};
    use crate::core::PageId;
    use crate::core::value_path::ValuePath;
    use crate::runtime::event::{Change, ChangeKind, EditorEvent};

    fn mutated(page: &str, revision: u64) -> EditorEvent {
        EditorEvent::Mutated {
            page: PageId::from(page),
            revision,
            change: Change::new(ChangeKind::Edited, "root_Name", ValuePath::empty().key("Name")),
        }
    }

    #[test]
    fn publish_reaches_every_live_subscriber() {
        let mut bus = RerenderBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();
        bus.publish(mutated("tunnels", 1));
        assert_eq!(drain_ready(&first).len(), 1);
        assert_eq!(drain_ready(&second).len(), 1);
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let mut bus = RerenderBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        bus.publish(mutated("tunnels", 1));
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(drain_ready(&kept).len(), 1);
    }

    #[test]
    fn rerenders_coalesce_per_page() {
        let events = vec![
            mutated("tunnels", 1),
            mutated("tunnels", 2),
            EditorEvent::Saved {
                page: PageId::from("servers"),
            },
            mutated("dns", 1),
        ];
        let pages: Vec<String> = pages_to_rerender(&events)
            .into_iter()
            .map(PageId::into_inner)
            .collect();
        assert_eq!(pages, vec!["dns".to_string(), "tunnels".to_string()]);
    }
}
