// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

// Change group labels
pub const GROUP_IDENTITY: &str = "identity";
pub const GROUP_NETWORK: &str = "network";
pub const GROUP_OPERATION: &str = "operation";
pub const GROUP_SERVER: &str = "server";
pub const GROUP_PREDECESSOR: &str = "predecessor";
pub const GROUP_REGISTRATION: &str = "registration";
pub const GROUP_HANDOFF: &str = "handoff";

/// Forwarding that tells the topology peers an endpoint record changed.
pub const LTP_UPDATE_FORWARDING: &str = "ServiceRequestCausesLtpUpdateRequest";
pub const REGISTRATION_FORWARDING: &str = "PromptForRegisteringCausesRegistrationRequest";
pub const BEQUEATH_FORWARDING: &str = "PromptForEmbeddingCausesRequestForBequeathingData";
pub const SERVER_REPLACEMENT_FORWARDING: &str =
    "PromptForBequeathingDataCausesRequestForBroadcastingInfoAboutServerReplacement";
pub const OPERATION_UPDATE_FORWARDING: &str =
    "PromptingNewReleaseForUpdatingServerCausesRequestForBroadcastingInfoAboutBackwardCompatibleUpdateOfOperation";
pub const DEREGISTRATION_FORWARDING: &str =
    "PromptForBequeathingDataCausesRequestForDeregisteringOfOldRelease";
pub const LOCAL_HTTP_SERVER_STACK: &str = "LocalHttpServer";

/// Built-in precedence: a peer description is announced identity first,
/// then where it lives, then what it serves, then handoff details.
///
/// The last column says whether terminal success on that route may settle
/// the cascade. Ltp updates are topology bookkeeping and never do.
pub const DEFAULT_ROUTES: [(&str, &str, u32, bool); 7] = [
    (GROUP_IDENTITY, LTP_UPDATE_FORWARDING, 10, false),
    (GROUP_NETWORK, LTP_UPDATE_FORWARDING, 20, false),
    (GROUP_OPERATION, LTP_UPDATE_FORWARDING, 30, false),
    (GROUP_SERVER, LTP_UPDATE_FORWARDING, 40, false),
    (GROUP_PREDECESSOR, LTP_UPDATE_FORWARDING, 50, false),
    (GROUP_REGISTRATION, REGISTRATION_FORWARDING, 60, true),
    (GROUP_HANDOFF, BEQUEATH_FORWARDING, 70, true),
];

/// HTTP status the scripted dispatcher answers with when nothing is scripted.
pub const DEFAULT_SIMULATED_STATUS: u16 = 200;

// Fact names carried in planner context payloads
pub const FACT_PRECEDING_APPLICATION_NAME: &str = "preceding-application-name";
pub const FACT_PRECEDING_RELEASE_NUMBER: &str = "preceding-release-number";
pub const FACT_OLD_APPLICATION_NAME: &str = "old-application-name";
