//! Location resolution subsystem.
//!
//! Turns an ambiguous input — device geolocation or a free-text query — into
//! a confirmed coordinate via external providers.

pub mod providers;
pub mod resolver;
pub mod types;

pub use resolver::{LocationProvider, ResolveLocation};
pub use types::{LocationError, LocationSource, ResolvedOrigin};
