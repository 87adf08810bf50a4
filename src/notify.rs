//! Widget event notification.
//!
//! The widget redraws through a direct call; [`Notifier`] only fans events out to
//! subscribers registered from outside.

use std::fmt;

/// Events a histogram widget emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Points were merged and the widget redrew.
    Plot,
    /// A redraw was requested through [`crate::widget::Histo::change`].
    Change,
}

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(Event)>;

/// Ordered list of event callbacks.
#[derive(Default)]
pub struct Notifier {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Event, Callback)>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Notifier {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `callback` every time `event` is emitted.
    pub fn subscribe(
        &mut self,
        event: Event,
        callback: impl FnMut(Event) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, event, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Invoke every subscriber of `event` in subscription order.
    pub fn emit(&mut self, event: Event) {
        for (_, wanted, callback) in &mut self.subscribers {
            if *wanted == event {
                callback(event);
            }
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether there are no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_matching_subscribers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();

        let l = Rc::clone(&log);
        notifier.subscribe(Event::Plot, move |e| l.borrow_mut().push((1, e)));
        let l = Rc::clone(&log);
        notifier.subscribe(Event::Change, move |e| l.borrow_mut().push((2, e)));
        let l = Rc::clone(&log);
        notifier.subscribe(Event::Plot, move |e| l.borrow_mut().push((3, e)));

        notifier.emit(Event::Plot);
        assert_eq!(*log.borrow(), vec![(1, Event::Plot), (3, Event::Plot)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::new();

        let c = Rc::clone(&count);
        let id = notifier.subscribe(Event::Change, move |_| *c.borrow_mut() += 1);
        notifier.emit(Event::Change);
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.emit(Event::Change);

        assert_eq!(*count.borrow(), 1);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_emit_without_subscribers_is_noop() {
        let mut notifier = Notifier::new();
        notifier.emit(Event::Plot);
        assert_eq!(notifier.len(), 0);
        assert!(format!("{notifier:?}").contains("subscribers"));
    }
}
