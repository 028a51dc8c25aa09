//! Notifications raised by the engine for the owning view.
//!
//! The engine never acts on these itself. It queues them and the owning
//! view drains the queue after each user interaction, routing each event
//! to the collaborator service it belongs to.

/// A request raised by the table for its owning view.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<T> {
    /// The create button was pressed.
    CreateRequested,
    /// A row action was triggered.
    ActionRequested {
        /// The action's tag (see [`Action::tag`](crate::Action::tag)).
        action: String,
        /// The row the action applies to.
        row: T,
    },
}

impl<T> TableEvent<T> {
    /// The action tag, if this is an action request.
    pub fn action(&self) -> Option<&str> {
        match self {
            TableEvent::ActionRequested { action, .. } => Some(action),
            TableEvent::CreateRequested => None,
        }
    }
}
