//! Device session: discovery, dispatch, retry, and release.
//!
//! One `DeviceSession` owns at most one handle to the virtual bus device and
//! drives it synchronously — every call blocks until the kernel returns.
//!
//! Key responsibilities:
//! - Probe the candidate instance paths (highest ordinal first) and keep the
//!   first handle that opens.
//! - Marshal mouse updates through `IOCTL_UPDATE_MOUSE`, recovering from a
//!   single transient failure by reopening the device once.
//! - Release the handle deterministically on `close`/`dispose`, with `Drop`
//!   as the non-deterministic fallback.
//!
//! The session is single-caller: there is no internal locking, and a session
//! shared across threads needs external synchronization. All methods take
//! `&mut self`, so the borrow checker already rules out aliased use.

use std::io;

use crate::backend::DeviceBackend;
use crate::constants::{IOCTL_UPDATE_MOUSE, MAX_INSTANCE_INDEX, candidate_path};
use crate::error::SessionError;
use crate::report::MouseReport;

#[cfg(windows)]
use crate::backend::NtBackend;

/// A session with the mouse device.
///
/// Lifecycle: created empty, populated by [`open`](Self::open), emptied by
/// [`close`](Self::close), terminated by [`dispose`](Self::dispose). Once
/// disposed, every operation fails with [`SessionError::Disposed`]; there is
/// no way back.
pub struct DeviceSession<B: DeviceBackend> {
    backend: B,
    handle: Option<B::Handle>,
    disposed: bool,
}

#[cfg(windows)]
impl DeviceSession<NtBackend> {
    /// Session over the real NT backend. Does not open anything yet.
    pub fn new() -> Self {
        Self::with_backend(NtBackend)
    }
}

#[cfg(windows)]
impl Default for DeviceSession<NtBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: DeviceBackend> DeviceSession<B> {
    /// Session over an arbitrary backend (tests inject a mock here).
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            handle: None,
            disposed: false,
        }
    }

    /// Open the device if not already open.
    ///
    /// Probes instance ordinals from [`MAX_INSTANCE_INDEX`] down to 0 and
    /// keeps the first that opens; stale ordinals left behind by driver
    /// reloads make the highest one the most likely to be live. Per-index
    /// failures are skipped silently; only the aggregate outcome is
    /// reported. Idempotent: an already-open session returns `true` without
    /// touching the handle.
    pub fn open(&mut self) -> Result<bool, SessionError> {
        self.ensure_live()?;
        Ok(self.handle.is_some() || self.probe_open())
    }

    /// Send one mouse update to the device.
    ///
    /// Each field is clamped into `[0, 255]` before encoding. If no handle
    /// is owned, discovery runs first; if that fails the call errors with
    /// [`SessionError::DeviceUnavailable`]. A failed dispatch triggers
    /// exactly one recovery cycle (close, reopen, reissue); the outcome of
    /// the reissued request is not inspected — past the single retry, the
    /// update is fire-and-forget and the call returns `Ok(())` either way.
    pub fn update_mouse(
        &mut self,
        button: i32,
        x: i32,
        y: i32,
        wheel: i32,
    ) -> Result<(), SessionError> {
        self.ensure_live()?;
        if self.handle.is_none() && !self.probe_open() {
            return Err(SessionError::DeviceUnavailable);
        }

        let report = MouseReport::clamped(button, x, y, wheel);
        if self.dispatch(&report).is_ok() {
            return Ok(());
        }

        // One recovery cycle: the driver drops the odd request transiently
        // (power state changes); repeated failure means real unavailability
        // and is not retried further.
        log::warn!("mouse update rejected, reopening device once");
        self.release_handle();
        if self.probe_open() {
            let _ = self.dispatch(&report);
        }
        Ok(())
    }

    /// Release the device handle, if any. Idempotent.
    pub fn close(&mut self) -> Result<(), SessionError> {
        self.ensure_live()?;
        self.release_handle();
        Ok(())
    }

    /// Close the handle and mark the session disposed. Idempotent; after the
    /// first call every other operation fails with [`SessionError::Disposed`].
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.release_handle();
        self.disposed = true;
    }

    fn ensure_live(&self) -> Result<(), SessionError> {
        if self.disposed {
            return Err(SessionError::Disposed);
        }
        Ok(())
    }

    fn probe_open(&mut self) -> bool {
        for index in (0..=MAX_INSTANCE_INDEX).rev() {
            let path = candidate_path(index);
            match self.backend.open_candidate(&path) {
                Ok(handle) => {
                    log::debug!("opened device instance {index} at {path}");
                    self.handle = Some(handle);
                    return true;
                }
                Err(err) => log::trace!("device instance {index}: {err}"),
            }
        }
        log::debug!(
            "no device instance answered across {} candidates",
            MAX_INSTANCE_INDEX + 1
        );
        false
    }

    fn dispatch(&mut self, report: &MouseReport) -> io::Result<()> {
        match &self.handle {
            Some(handle) => {
                self.backend
                    .control_request(handle, IOCTL_UPDATE_MOUSE, &report.as_bytes())
            }
            None => Err(io::Error::other("no open device handle")),
        }
    }

    fn release_handle(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.backend.close(handle);
        }
    }
}

impl<B: DeviceBackend> Drop for DeviceSession<B> {
    fn drop(&mut self) {
        // Fallback only; timely release is dispose()'s job.
        self.release_handle();
    }
}
