//! Process-wide message registry.
//!
//! The wire only carries a message's *name*; a decoder needs a way to turn
//! that name back into a concrete, empty instance before it can call
//! `unpack` on it. The original reference keeps this as a module-level
//! `std::unordered_map<std::string, message_factory>` (`core.hpp`); the
//! idiomatic Rust equivalent is a `Lazy<Mutex<HashMap<..>>>` (the same
//! pattern `once_cell`-using workers in the retrieved pack reach for).
//!
//! Mutation is confined to service construction (`register`, guarded by a
//! per-service `Once` in the generated stub); steady-state serving only
//! reads from it.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::message::{MessageFactory, SrpcMessage};

static MESSAGE_REGISTRY: Lazy<Mutex<HashMap<String, MessageFactory>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Installs (or replaces) the factory for `name`. Idempotent: registering
/// the same name twice with an equivalent factory is observably a no-op.
pub fn register(name: impl Into<String>, factory: MessageFactory) {
    MESSAGE_REGISTRY
        .lock()
        .expect("message registry poisoned")
        .insert(name.into(), factory);
}

/// Constructs a fresh, empty instance of the message type registered under
/// `name`, or `None` if no such type has been registered.
pub fn instantiate(name: &str) -> Option<Box<dyn SrpcMessage + Send>> {
    let factory = *MESSAGE_REGISTRY
        .lock()
        .expect("message registry poisoned")
        .get(name)?;
    Some(factory())
}

pub fn contains(name: &str) -> bool {
    MESSAGE_REGISTRY
        .lock()
        .expect("message registry poisoned")
        .contains_key(name)
}
