//! # Mockbird
//!
//! **Mockbird** is the core of a local-development mock server driven entirely
//! by an [OpenAPI 3.1.0](https://spec.openapis.org/oas/v3.1.0) specification.
//! Point it at a spec and it answers every declared route with realistic,
//! schema-conforming fake data instead of `"string"` placeholders.
//!
//! ## Overview
//!
//! The crate is transport-agnostic: it loads a spec, resolves `$ref` chains,
//! and builds one [`handler::MockHandler`] per declared operation. A mounting
//! layer (any HTTP server) matches an inbound request to a route template,
//! binds path parameters, and calls the handler, which returns a status, a
//! JSON body, and an optional delay hint.
//!
//! ## Architecture
//!
//! - **[`spec`]** - OpenAPI document loading and per-operation metadata
//! - **[`resolver`]** - Recursive, memoized `$ref` resolution (cycle-tolerant)
//! - **[`schema`]** - Typed view over raw JSON Schema nodes
//! - **[`generator`]** - Constrained random value generation with
//!   property-name heuristics and a string-format table
//! - **[`handler`]** - Per-operation response assembly: stateless generation
//!   or stateful CRUD
//! - **[`store`]** - In-memory collection store backing stateful mode
//! - **[`validator`]** - Request-body validation via JSON Schema
//! - **[`service`]** - Facade wiring everything together for one spec
//!
//! ## Quick Start
//!
//! ```no_run
//! use mockbird::{MockConfig, MockService};
//!
//! let service = MockService::from_file("openapi.yaml", MockConfig::stateful())
//!     .expect("failed to load spec");
//! for route in service.routes() {
//!     println!("{} {}", route.method, route.path);
//! }
//! ```
//!
//! ## Generation behavior
//!
//! Values honor schema constraints (`enum`, min/max bounds, `required`,
//! string formats) and fall back to property-name heuristics: a field called
//! `email` gets a plausible address, `city` a city name, `price` a small
//! decimal. `example` values are returned verbatim. Recursion through cyclic
//! schemas is bounded by a fixed depth budget.
//!
//! Three vendor extensions tune generation per operation: `x-mock-count`
//! (fixed array length), `x-mock-delay` (response delay hint in ms), and
//! `x-mock-seed` (stable per-route seed for reproducible payloads).

pub mod config;
pub mod generator;
pub mod handler;
pub mod resolver;
pub mod schema;
pub mod service;
pub mod spec;
pub mod store;
pub mod validator;

pub use config::MockConfig;
pub use handler::{MockHandler, MockRequest, MockResponse};
pub use resolver::{ResolveError, SchemaResolver};
pub use service::MockService;
pub use spec::{load_spec, load_spec_from_value, OperationMeta, RouteInfo};
pub use store::StateStore;
