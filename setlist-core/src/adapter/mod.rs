//! Presentation adapter between the workout engine and a chat transport.
//!
//! Transports deliver button presses and commands as `InboundEvent`s; the
//! `WorkoutBot` turns them into engine calls and renders the results as
//! `Directive`s through a `ChatTransport`.

mod bot;
mod directives;
mod events;
mod memory;
mod transport;

pub use bot::{CONTINUE_TEXT, DAY_MENU_TEXT, WorkoutBot};
pub use directives::{DeletionReport, Directive};
pub use events::{Callback, EventKind, InboundEvent};
pub use memory::{ChatMessage, MemoryTransport};
pub use transport::{ChatTransport, Choice};
