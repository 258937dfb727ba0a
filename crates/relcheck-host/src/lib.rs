//! Host-facing integration of the release checker.
//!
//! The host owns one [`PluginUpdater`] and calls into it from its update
//! manager, its "view details" modal, and its plugin lifecycle events.

mod error;
mod meta;
mod types;
mod updater;

pub use error::HostError;
pub use meta::PluginMeta;
pub use types::{InfoArgs, PLUGIN_INFORMATION_ACTION, PluginInfo, UpdateDescriptor, UpdateTransient};
pub use updater::{ACTIVATED_AT_OPTION_KEY, PluginUpdater};
