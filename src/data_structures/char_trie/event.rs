//! Structural change notifications.
//!
//! Listeners subscribe to one of four channels. The channels nest: a broader
//! channel also hears every occurrence reported on the narrower channels it
//! covers, so a single registration may feed several dispatch lists. The
//! fan-out is fixed by [`EventChannel::feeds`].
//!
//! | subscribed on          | hears                                             |
//! |------------------------|---------------------------------------------------|
//! | `CharacterAdded`       | character, terminus character, node, terminus node |
//! | `NodeAdded`            | node, terminus node                               |
//! | `TerminusCharacterAdded` | terminus character, terminus node               |
//! | `TerminusNodeAdded`    | terminus node                                     |

use std::fmt;
use std::sync::Arc;

use super::node::{NodeArena, NodeId};

/// The four kinds of structural change a trie reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventChannel {
    /// An existing interior node was walked while inserting a term.
    CharacterAdded,
    /// A term that was already present was inserted again.
    TerminusCharacterAdded,
    /// A new interior node was created.
    NodeAdded,
    /// A node became the end of a term, either newly created or converted.
    TerminusNodeAdded,
}

impl EventChannel {
    /// Every channel, in dispatch list order.
    pub const ALL: [EventChannel; 4] = [
        EventChannel::CharacterAdded,
        EventChannel::TerminusCharacterAdded,
        EventChannel::NodeAdded,
        EventChannel::TerminusNodeAdded,
    ];

    /// Dispatch lists a registration on this channel is added to.
    pub fn feeds(self) -> &'static [EventChannel] {
        use EventChannel::*;
        match self {
            CharacterAdded => &[CharacterAdded, TerminusCharacterAdded, NodeAdded, TerminusNodeAdded],
            NodeAdded => &[NodeAdded, TerminusNodeAdded],
            TerminusCharacterAdded => &[TerminusCharacterAdded, TerminusNodeAdded],
            TerminusNodeAdded => &[TerminusNodeAdded],
        }
    }

    /// Whether this channel carries the term ending at the node.
    pub fn is_terminus(self) -> bool {
        matches!(
            self,
            EventChannel::TerminusCharacterAdded | EventChannel::TerminusNodeAdded
        )
    }

    fn index(self) -> usize {
        match self {
            EventChannel::CharacterAdded => 0,
            EventChannel::TerminusCharacterAdded => 1,
            EventChannel::NodeAdded => 2,
            EventChannel::TerminusNodeAdded => 3,
        }
    }
}

/// A single change notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeEvent {
    /// Which occurrence this is.
    pub channel: EventChannel,
    /// The affected node.
    pub node: NodeId,
    /// Character held by the affected node.
    pub value: char,
    /// Term ending at the node, present only for terminus occurrences.
    pub term: Option<String>,
}

/// Receives change notifications from a trie.
///
/// Every method defaults to doing nothing, so implementors only override the
/// occurrences they care about.
#[cfg_attr(test, mockall::automock)]
pub trait NodeListener: Send + Sync {
    /// An existing interior node was walked during insertion.
    fn character_added(&self, _event: &NodeEvent) {}

    /// An already present term was inserted again.
    fn terminus_character_added(&self, _event: &NodeEvent) {}

    /// A new interior node was created.
    fn node_added(&self, _event: &NodeEvent) {}

    /// A node became the end of a term.
    fn terminus_node_added(&self, _event: &NodeEvent) {}
}

/// Handle returned by a subscription and used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Registration = (ListenerId, Arc<dyn NodeListener>);

/// Registry of listeners, one dispatch list per channel.
#[derive(Default)]
pub struct NodeEventListeners {
    lists: [Vec<Registration>; 4],
    next_id: u64,
}

impl NodeEventListeners {
    /// Creates a registry with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` on `channel` and on every list that channel feeds.
    pub fn subscribe(&mut self, channel: EventChannel, listener: Arc<dyn NodeListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        for fed in channel.feeds() {
            self.lists[fed.index()].push((id, Arc::clone(&listener)));
        }
        id
    }

    /// Removes the registration `id` from the lists `channel` feeds.
    ///
    /// Returns `true` if anything was removed. Lists outside the channel's
    /// fan-out are left untouched.
    pub fn unsubscribe(&mut self, channel: EventChannel, id: ListenerId) -> bool {
        let mut removed = false;
        for fed in channel.feeds() {
            let list = &mut self.lists[fed.index()];
            if let Some(position) = list.iter().position(|(registered, _)| *registered == id) {
                list.remove(position);
                removed = true;
            }
        }
        removed
    }

    /// Number of listeners that will hear occurrences on `channel`.
    pub fn listener_count(&self, channel: EventChannel) -> usize {
        self.lists[channel.index()].len()
    }

    /// Whether no listener is registered on any channel.
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Notifies every listener on `channel` about `node`.
    ///
    /// The event is only built, and the term only reconstructed, when
    /// someone is listening.
    pub fn dispatch(&self, channel: EventChannel, arena: &NodeArena, node: NodeId) {
        let listeners = &self.lists[channel.index()];
        if listeners.is_empty() {
            return;
        }

        let event = NodeEvent {
            channel,
            node,
            value: arena.node(node).value(),
            term: channel.is_terminus().then(|| arena.term(node)),
        };
        for (_, listener) in listeners {
            match channel {
                EventChannel::CharacterAdded => listener.character_added(&event),
                EventChannel::TerminusCharacterAdded => listener.terminus_character_added(&event),
                EventChannel::NodeAdded => listener.node_added(&event),
                EventChannel::TerminusNodeAdded => listener.terminus_node_added(&event),
            }
        }
    }
}

impl fmt::Debug for NodeEventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("NodeEventListeners");
        for channel in EventChannel::ALL {
            debug.field(&format!("{channel:?}"), &self.listener_count(channel));
        }
        debug.finish()
    }
}
