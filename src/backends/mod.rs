// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reference implementations of the store, resolver and dispatcher seams.
//!
//! * `memory` - configuration-seeded in-process store and resolver
//! * `scripted` - a dispatcher that answers from a status script
//! * `stub` - fault injectors wrapping any store or resolver

pub mod memory;
pub mod scripted;
pub mod stub;

pub use memory::{InMemoryEndpointStore, StaticForwardingResolver};
pub use scripted::{ScriptedDispatcher, SentNotification};
pub use stub::{FaultyStore, UnreachableResolver};
