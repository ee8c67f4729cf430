//! Quickmenu Engine
//!
//! The engine coordinates one popup cycle end to end:
//! - loads and validates the menu document afresh for every cycle
//! - builds the native menu and the click-capture surface
//! - arbitrates the three dismissal paths (selection, outside click, Escape)
//! - guarantees transient resources are released exactly once per cycle,
//!   whatever path dismissed the menu and even if a handler panicked
//!
//! The crate is platform-free by design: everything the coordinator touches
//! goes through the traits in [`deps`], so the full state machine can be
//! exercised in tests with mock collaborators. The real implementations
//! (tao windows, muda menus, the global hotkey manager) live in the
//! `quickmenu` binary crate.

mod coordinator;
mod deps;
mod error;
mod executor;
pub mod mocks;

pub use coordinator::{Coordinator, CycleFlag, Phase};
pub use deps::{ConfigSource, Notifier, Point, PopupShell, SystemOps};
pub use error::{Error, Result};
pub use executor::Executor;
