//! Koyeb API - typed records and an HTTP client for the Koyeb control plane.
//!
//! The exporter only ever *lists* resources, so this crate covers the seven
//! list endpoints it scrapes and nothing else.
//!
//! # Architecture
//!
//! ```text
//!     Koyeb control plane (https://app.koyeb.com/v1/...)
//!          ↑
//!     Bearer token (embedded at construction)
//!          ↑
//! ┌─────────────────────────────────────────┐
//! │       KoyebClient (implements trait)     │
//! │  - GET /v1/<resource>?limit=&offset=     │
//! │  - follow pages while has_next           │
//! └─────────────────────────────────────────┘
//!          ↑
//! ┌─────────────────────────────────────────┐
//! │       PlatformApi (trait)                │
//! │  - one list operation per resource kind  │
//! └─────────────────────────────────────────┘
//!          ↑
//!     Exporter collectors
//! ```
//!
//! # Core Types
//!
//! - [`PlatformApi`] - Trait the collectors depend on
//! - [`KoyebClient`] - reqwest-backed implementation
//! - [`App`], [`Credential`], [`Deployment`], [`Domain`], [`Instance`],
//!   [`Secret`], [`Service`] - list records
//!
//! # Example
//!
//! ```no_run
//! use koyeb_api::{KoyebClient, PlatformApi};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = KoyebClient::new("token".to_string())?;
//! for app in client.list_apps().await? {
//!     println!("{} {}", app.name, app.status);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod platform;
pub mod types;

pub use client::{ClientOptions, KoyebClient, BASE_URL, DEFAULT_PAGE_SIZE, MAX_PAGES};
pub use platform::PlatformApi;
pub use types::{
    App, Credential, Deployment, DeploymentDefinition, Domain, Instance, RegistrySources, Secret,
    Service,
};
