use crate::model::Coordinate;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Description of a filter's active predicate, carried on `Filter`
/// notifications so listeners (and tests) can observe state changes
/// without poking at controller internals.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Pass-all: no restriction.
    All,
    /// Category labels; a feature passes when its key is a member.
    Labels(BTreeSet<String>),
    /// Proximity: origin plus radius.
    Near {
        origin: Coordinate,
        distance_km: f64,
    },
    /// Region ids; a feature passes inside any of them.
    Regions(BTreeSet<String>),
}

impl Selection {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    /// A controller changed its dimension; the composite view and the
    /// widgets have been (or are about to be) refreshed.
    Updated { filter: String },
    /// The active predicate changed to `active`.
    Filter { filter: String, active: Selection },
    /// The external user location became (or changed while) valid.
    LocationChanged { location: Coordinate },
}

/// Handle returned by [`Emitter::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

type Listener = Box<dyn FnMut(&FilterEvent)>;

/// Synchronous observer registry. Listeners are invoked in
/// subscription order, on the caller's stack — there is no queue and
/// no deferral, so a notification is fully delivered before `notify`
/// returns.
#[derive(Default)]
pub struct Emitter {
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field(
                "listeners",
                &self.listeners.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FilterEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false when the id is not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self, event: &FilterEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn updated(name: &str) -> FilterEvent {
        FilterEvent::Updated {
            filter: name.to_string(),
        }
    }

    #[test]
    fn delivers_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::new();

        for tag in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            emitter.subscribe(move |_| seen.borrow_mut().push(tag));
        }

        emitter.notify(&updated("category"));
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut emitter = Emitter::new();

        let counter = Rc::clone(&count);
        let id = emitter.subscribe(move |_| *counter.borrow_mut() += 1);

        emitter.notify(&updated("category"));
        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        emitter.notify(&updated("category"));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn listeners_receive_the_event_payload() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::new();

        let sink = Rc::clone(&seen);
        emitter.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let event = FilterEvent::Filter {
            filter: "activityName".to_string(),
            active: Selection::Labels(BTreeSet::from(["FOOD".to_string()])),
        };
        emitter.notify(&event);

        assert_eq!(seen.borrow().as_slice(), &[event]);
    }
}
