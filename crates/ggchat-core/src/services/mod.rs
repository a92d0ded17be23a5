//! Stateful services composing the ports into a chat session.

mod app;
mod lifecycle;
mod session;

pub use app::{ChatCore, CoreSnapshot};
pub use lifecycle::{LifecycleState, ModelLifecycle};
pub use session::{ConversationSession, GenerationPolicy};
