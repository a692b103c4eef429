/*
 * Host Module
 *
 * The frame host hands out subscriptions for the frame loop and for the
 * resize and pointer listeners. A subscription is released when it is
 * dropped, so a component that owns its subscriptions cannot leak them.
 *
 * Everything here is single-threaded: the host, the frame callback and the
 * event handlers all run on the window's event loop thread.
 */

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionKind {
    FrameLoop,
    Resize,
    PointerMove,
}

impl SubscriptionKind {
    fn slot(self) -> usize {
        match self {
            SubscriptionKind::FrameLoop => 0,
            SubscriptionKind::Resize => 1,
            SubscriptionKind::PointerMove => 2,
        }
    }
}

#[derive(Debug, Default)]
struct LiveCounts {
    counts: [usize; 3],
}

#[derive(Debug, Clone, Default)]
pub struct FrameHost {
    live: Rc<RefCell<LiveCounts>>,
}

impl FrameHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, kind: SubscriptionKind) -> Subscription {
        self.live.borrow_mut().counts[kind.slot()] += 1;
        log::trace!("Acquired {:?} subscription", kind);

        Subscription {
            kind,
            live: Rc::downgrade(&self.live),
        }
    }

    pub fn live(&self, kind: SubscriptionKind) -> usize {
        self.live.borrow().counts[kind.slot()]
    }

    pub fn live_total(&self) -> usize {
        self.live.borrow().counts.iter().sum()
    }
}

// Releases its slot on drop; a host that is already gone is ignored
#[derive(Debug)]
pub struct Subscription {
    kind: SubscriptionKind,
    live: Weak<RefCell<LiveCounts>>,
}

impl Subscription {
    pub fn kind(&self) -> SubscriptionKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(live) = self.live.upgrade() {
            let mut live = live.borrow_mut();
            let slot = &mut live.counts[self.kind.slot()];
            *slot = slot.saturating_sub(1);
            log::trace!("Released {:?} subscription", self.kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriptions_release_on_drop() {
        let host = FrameHost::new();

        let frame = host.subscribe(SubscriptionKind::FrameLoop);
        let resize = host.subscribe(SubscriptionKind::Resize);
        assert_eq!(host.live(SubscriptionKind::FrameLoop), 1);
        assert_eq!(host.live(SubscriptionKind::Resize), 1);
        assert_eq!(host.live(SubscriptionKind::PointerMove), 0);
        assert_eq!(host.live_total(), 2);

        drop(frame);
        assert_eq!(host.live(SubscriptionKind::FrameLoop), 0);
        assert_eq!(resize.kind(), SubscriptionKind::Resize);

        drop(resize);
        assert_eq!(host.live_total(), 0);
    }

    #[test]
    fn test_subscription_outliving_host() {
        let host = FrameHost::new();
        let subscription = host.subscribe(SubscriptionKind::PointerMove);
        drop(host);
        drop(subscription);
    }
}
