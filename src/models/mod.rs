//! Plain data types shared across the crate.
//!
//! This includes the detected distro profile, the persisted tweak state, and
//! host facts (desktop, filesystem, hardware) used to pick tweaks and render reports.

mod distro;
mod state;
mod system;

pub use distro::*;
pub use state::*;
pub use system::*;
