//! Infrastructure layer — adapters implementing the application ports.
//!
//! Each adapter wires a port trait to a concrete mechanism: the HTTP backend,
//! the session file, the config file. Imports flow inward only — infra
//! depends on `crate::application::ports` and `crate::domain`, never on
//! `crate::commands` or `crate::output`.

pub mod api;
pub mod config;
pub mod session;

#[allow(unused_imports)]
pub use api::HttpApi;
#[allow(unused_imports)]
pub use config::YamlConfigStore;
#[allow(unused_imports)]
pub use session::SessionManager;
