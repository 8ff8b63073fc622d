//! Storm Dashboard: administrative status widgets for a Storm CMS deployment.
//!
//! Two stateless widgets over injected platform capabilities: configuration
//! drift between the synchronized snapshot and the active configuration, and
//! critical/warning counts from the database log store. Widgets recompute on
//! every build and declare a zero-duration cache lifetime.

pub mod cli;
pub mod comparer;
pub mod config;
pub mod dblog;
pub mod drift;
pub mod error;
pub mod features;
pub mod logging;
pub mod render;
pub mod snapshot;
pub mod transform;
pub mod types;
pub mod widget;
