#![forbid(unsafe_code)]

//! Host runtime for windowed lists.
//!
//! # Key Components
//!
//! - [`ListHost`] - rows, viewport and coalesced scroll events for one list
//! - [`RefreshTask`] - cancellable periodic refresh on a background thread
//! - `logging::install` - JSON log subscriber (feature `tracing-json`)
//!
//! All list state lives on the host's thread. The refresh task only sends
//! messages; the host drains them and swaps rows in with
//! [`ListHost::replace_rows`].

pub mod host;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod refresh;

pub use host::ListHost;
pub use refresh::{RefreshTask, StopSignal, StopTrigger};
