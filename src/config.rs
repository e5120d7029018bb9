//! # Configuration Module
//!
//! Runtime configuration for the mock core. The CLI / bootstrap layer is
//! expected to parse flags and environment into a [`MockConfig`] before the
//! core is constructed; the core itself never reads the environment.

/// Configuration handed to the core by the bootstrap layer.
///
/// All fields have conservative defaults: stateless generation, fresh entropy
/// per request, no artificial latency, no fault injection, no auth stub.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Persist CRUD state in the in-memory [`StateStore`](crate::store::StateStore).
    /// When off (the default) every request generates fresh data.
    pub stateful: bool,
    /// Seed the per-request random source so repeated runs produce identical
    /// generated values.
    pub deterministic: bool,
    /// Seed used in deterministic mode. Falls back to a fixed default when unset.
    pub seed: Option<u64>,
    /// Artificial latency range in milliseconds, applied per request.
    /// A per-operation `x-mock-delay` override takes precedence.
    pub delay_ms: Option<(u64, u64)>,
    /// Percentage of requests (0-100) answered with an injected 500.
    pub error_rate: u8,
    /// Reject requests carrying no `Authorization` / `X-API-Key` header with 401.
    /// Presence check only; tokens are never verified.
    pub auth_required: bool,
}

impl MockConfig {
    /// Seed used when deterministic mode is enabled but no seed was supplied.
    pub const DEFAULT_SEED: u64 = 0x6d6f_636b;

    /// Configuration for a stateful server with otherwise default behavior.
    #[must_use]
    pub fn stateful() -> Self {
        MockConfig {
            stateful: true,
            ..MockConfig::default()
        }
    }

    /// Configuration for deterministic generation with the given seed.
    #[must_use]
    pub fn deterministic(seed: u64) -> Self {
        MockConfig {
            deterministic: true,
            seed: Some(seed),
            ..MockConfig::default()
        }
    }
}
