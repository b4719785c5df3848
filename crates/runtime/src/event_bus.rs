/// An event as recorded on the bus, stamped with its emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded<E> {
    pub seq: u64,
    pub event: E,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Outbound notification channel.
///
/// Every emitted event is delivered synchronously to the current listeners,
/// in subscription order, and kept in a log until drained. With a log limit
/// the oldest undrained entries are dropped first; sequence numbers keep
/// counting, so a gap in `seq` shows what was lost.
pub struct EventBus<E> {
    next_seq: u64,
    next_subscription: u64,
    log_limit: Option<usize>,
    events: Vec<Recorded<E>>,
    listeners: Vec<(SubscriptionId, Listener<E>)>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            next_subscription: 0,
            log_limit: None,
            events: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("next_seq", &self.next_seq)
            .field("pending", &self.events.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_limit(limit: usize) -> Self {
        Self {
            log_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: E) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Recorded { seq, event });
        if let Some(limit) = self.log_limit {
            let excess = self.events.len().saturating_sub(limit);
            self.events.drain(..excess);
        }
    }

    pub fn events(&self) -> &[Recorded<E>] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Recorded<E>> {
        std::mem::take(&mut self.events)
    }
}
