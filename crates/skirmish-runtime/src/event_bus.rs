//! Trigger queue between perception, scripts, and the enemy system

use crate::event::GameEvent;
use skirmish_core::EntityId;

/// FIFO queue of triggers: perception and scripts push, the enemy system drains
#[derive(Debug)]
pub struct EventBus {
    events: Vec<GameEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Push several events, keeping their order
    pub fn extend<I: IntoIterator<Item = GameEvent>>(&mut self, events: I) {
        self.events.extend(events);
    }

    /// Drain all events from the bus in push order
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events aimed at `enemy`, oldest first
    pub fn pending_for(&self, enemy: EntityId) -> impl Iterator<Item = &GameEvent> + '_ {
        self.events.iter().filter(move |e| e.enemy() == enemy)
    }

    /// Drop every pending event aimed at `enemy`, returning how many were removed
    pub fn discard_for(&mut self, enemy: EntityId) -> usize {
        let before = self.events.len();
        self.events.retain(|e| e.enemy() != enemy);
        before - self.events.len()
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
