// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process store and resolver backed by configuration seeds.

mod resolver;
mod store;

pub use resolver::StaticForwardingResolver;
pub use store::InMemoryEndpointStore;
