// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod dispatcher;
pub mod resolver;
pub mod store;

pub use dispatcher::EventDispatcher;
pub use resolver::ForwardingResolver;
pub use store::EndpointStore;
