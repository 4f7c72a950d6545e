// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Typed publish/subscribe event dispatch.
//!
//! The [`EventBus`] decouples the UI components from one another: none of
//! them holds a reference to any other, they only publish [`Event`]s and
//! drain their own [`Mailbox`]. Delivery is asynchronous — `publish` returns
//! immediately and each subscriber consumes its copy on its own processing
//! turn in the main loop.
//!
//! # Delivery contract
//!
//! * An event is delivered once to every subscriber registered for its kind
//!   *at the moment of the publish*; later subscribers do not receive it.
//! * Within one mailbox, events arrive in publish order (FIFO).
//! * Publishing a kind nobody subscribes to is a silent no-op.
//! * An event already enqueued into a mailbox when the subscriber is removed
//!   stays readable from that mailbox; nothing published after the removal
//!   is delivered. (The registry cannot reach into a receiver the component
//!   owns, so "deliver-anyway" is the honest policy here.)
//!
//! # Locking
//!
//! The registry is guarded by one mutex with short critical sections (map
//! mutation and sender snapshots only). The lock is never held while events
//! are pushed into mailboxes, so a handler may re-enter the bus freely.
//!
//! Mailboxes are unbounded: there is no back-pressure, and a subscriber that
//! stops draining grows its queue without limit. Bounding the queues is an
//! explicit non-goal.

mod debounce;
mod event;

pub(crate) use debounce::{Debouncer, TREE_DEBOUNCE};
pub(crate) use event::{Event, EventKind};

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        mpsc::{Receiver, Sender, TryRecvError, channel},
    },
};

use log::trace;

/// Unique handle identifying one registered subscriber.
pub(crate) type SubscriberId = u64;

struct Registry {
    next_id: SubscriberId,
    /// Mailbox senders for every registered subscriber.
    senders: HashMap<SubscriberId, Sender<Event>>,
    /// Which subscribers want which kinds.
    interests: HashMap<EventKind, HashSet<SubscriberId>>,
}

/// Process-wide event dispatcher.
///
/// Cheap to clone; all clones share one registry. One instance is created at
/// startup and handed to every component — there is no global.
#[derive(Clone)]
pub(crate) struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 1,
                senders: HashMap::new(),
                interests: HashMap::new(),
            })),
        }
    }

    /// Allocates a subscriber identity and its mailbox.
    ///
    /// The returned [`Mailbox`] unsubscribes itself when dropped, so a
    /// destroyed component can never leave a dangling registration behind.
    pub(crate) fn register(&self) -> Mailbox {
        let (tx, rx) = channel();
        let id = {
            let mut reg = self.registry.lock().unwrap();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.senders.insert(id, tx);
            id
        };
        Mailbox {
            id,
            rx,
            bus: self.clone(),
        }
    }

    /// Registers interest in the given kinds.
    ///
    /// Idempotent per `(subscriber, kind)` pair; subscribing twice changes
    /// nothing. Unknown subscriber ids are ignored.
    pub(crate) fn subscribe(&self, id: SubscriberId, kinds: &[EventKind]) {
        let mut reg = self.registry.lock().unwrap();
        if !reg.senders.contains_key(&id) {
            return;
        }
        for kind in kinds {
            reg.interests.entry(*kind).or_default().insert(id);
        }
    }

    /// Removes the subscriber from every kind and drops its mailbox sender.
    ///
    /// Safe to call for an id that was never subscribed, or twice.
    pub(crate) fn unsubscribe(&self, id: SubscriberId) {
        let mut reg = self.registry.lock().unwrap();
        reg.senders.remove(&id);
        for subscribers in reg.interests.values_mut() {
            subscribers.remove(&id);
        }
        reg.interests.retain(|_, subscribers| !subscribers.is_empty());
    }

    /// Fans the event out to every current subscriber of its kind.
    ///
    /// The subscriber snapshot is taken under the lock; the sends happen
    /// after it is released. Send failures (a receiver that disappeared
    /// without unsubscribing) are ignored — each delivery is independent and
    /// the fan-out never fails partway through.
    pub(crate) fn publish(&self, event: Event) {
        let kind = event.kind();
        let targets: Vec<Sender<Event>> = {
            let reg = self.registry.lock().unwrap();
            match reg.interests.get(&kind) {
                Some(subscribers) => subscribers
                    .iter()
                    .filter_map(|id| reg.senders.get(id).cloned())
                    .collect(),
                None => return,
            }
        };

        trace!("publish {:?} -> {} subscriber(s)", kind, targets.len());
        for tx in targets {
            let _ = tx.send(event.clone());
        }
    }
}

/// The receiving end of one subscriber's event queue.
pub(crate) struct Mailbox {
    id: SubscriberId,
    rx: Receiver<Event>,
    bus: EventBus,
}

impl Mailbox {
    pub(crate) fn id(&self) -> SubscriberId {
        self.id
    }

    /// Takes the next pending event, if any. Never blocks.
    pub(crate) fn try_recv(&self) -> Option<Event> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

impl Drop for Mailbox {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}
