//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for aggregate roots whose state is only ever changed by applying
/// their own events.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the current version (number of events applied).
    fn version(&self) -> i64;

    /// Apply an event to mutate internal state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns events produced by command handling that have not been applied.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Clears uncommitted events once they are applied or discarded.
    fn clear_uncommitted_events(&mut self);
}
