// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Value types shared by the reconcile, plan and cascade stages.

mod change_set;
mod dispatch;
mod endpoint;
mod forwarding;
mod plan;

pub use change_set::{AttributeChange, ChangeSet};
pub use dispatch::{Correlation, DispatchResult, StatusClass};
pub use endpoint::{
    Address, Attribute, AttributeValue, DesiredConfig, EndpointId, EndpointRole, EndpointStack,
    IpAddress, Protocol,
};
pub use forwarding::{ForwardingConstruct, Port, PortDirection};
pub use plan::{AutomationPlan, AutomationStep, PayloadAttribute, StepPayload};
