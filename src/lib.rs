// src/lib.rs
// ────────────────────────────────────────────────────────────────────────────
// Public library entry point. Re-exports the session type, wire report, and
// backend seam for embedding applications and integration tests.

//! User-mode bridge to the G HUB virtual bus driver.
//!
//! Injects synthetic mouse updates straight into the vendor kernel driver,
//! bypassing the normal input stack: candidate device objects are probed by
//! instance ordinal, the first one that opens receives fixed 5-byte mouse
//! records over a single IOCTL, and a transiently failing request is retried
//! once after reopening the device.
//!
//! Key responsibilities:
//! - Locate and open the live device instance among the enumerated ones.
//! - Encode and dispatch [`MouseReport`]s through [`DeviceSession`].
//! - Release the handle deterministically, with `Drop` as the safety net.
//!
//! One session, one caller: the crate is fully synchronous and does no
//! internal locking. Only works against driver version 2021.10.

pub mod backend;
pub mod constants;
pub mod error;
pub mod report;
pub mod session;

pub use backend::DeviceBackend;
#[cfg(windows)]
pub use backend::{NtBackend, RawDeviceHandle};
pub use error::SessionError;
pub use report::{MouseReport, buttons, clamp_byte};
pub use session::DeviceSession;
