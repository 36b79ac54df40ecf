// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod routing_table;
mod runtime;
mod validation;

pub mod consts;

pub use loader::{
    check_config, load_and_validate_config, load_config, parse_config, Config, ConfigFormat,
    EndpointSeed, InteractionNames, SeedAttributes, SettlePolicy, SimulationConfig, StackConfig,
};
pub use routing_table::{RouteConfig, RoutingTable};
pub use runtime::{Runtime, RuntimeBuilder};
pub use validation::{config_warnings, validate_config};
