//! Native device backend seam.
//!
//! The session logic never calls the operating system directly; it goes
//! through [`DeviceBackend`], a two-and-a-half-operation seam (open a
//! candidate path, issue a control request, release a handle). The real
//! implementation talks to the NT native API; tests substitute a scripted
//! mock so discovery and retry behaviour can be exercised without a live
//! driver.

use std::io;

/// Low-level device access used by the session.
///
/// `Handle` is a move-only resource token: `close` consumes it, so a released
/// handle cannot be used or released twice.
pub trait DeviceBackend {
    type Handle;

    /// Open an existing device object at `path` for synchronous write access.
    fn open_candidate(&mut self, path: &str) -> io::Result<Self::Handle>;

    /// Issue one device-control request with `input` as the sole input
    /// buffer; no output buffer is expected.
    fn control_request(&mut self, handle: &Self::Handle, code: u32, input: &[u8])
    -> io::Result<()>;

    /// Release the handle. Must not fail; an already-dead kernel object is
    /// simply let go.
    fn close(&mut self, handle: Self::Handle);
}

#[cfg(windows)]
pub use nt::{NtBackend, RawDeviceHandle};

#[cfg(windows)]
mod nt {
    use std::{ffi::OsStr, io, os::windows::prelude::OsStrExt, ptr};

    use windows_sys::Wdk::Foundation::OBJECT_ATTRIBUTES;
    use windows_sys::Wdk::Storage::FileSystem::NtCreateFile;
    use windows_sys::Wdk::System::IO::NtDeviceIoControlFile;
    use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, STATUS_SUCCESS, UNICODE_STRING};
    use windows_sys::Win32::System::IO::IO_STATUS_BLOCK;

    use super::DeviceBackend;
    use crate::constants::{
        FILE_ATTRIBUTE_NORMAL, FILE_NON_DIRECTORY_FILE, FILE_OPEN, FILE_SYNCHRONOUS_IO_NONALERT,
        GENERIC_WRITE, SYNCHRONIZE,
    };

    /// Owned NT handle to an open device object.
    ///
    /// Move-only on purpose: the only way out is [`NtBackend::close`], which
    /// consumes it, so a double `CloseHandle` cannot be written.
    pub struct RawDeviceHandle(HANDLE);

    /// [`DeviceBackend`] over the NT native API (`ntdll`).
    ///
    /// Stateless; every call blocks until the kernel returns. No timeout
    /// exists at this layer, so a hung driver call blocks the caller.
    #[derive(Default)]
    pub struct NtBackend;

    impl DeviceBackend for NtBackend {
        type Handle = RawDeviceHandle;

        fn open_candidate(&mut self, path: &str) -> io::Result<RawDeviceHandle> {
            // NUL-terminated UTF-16 for the object-manager name.
            let mut wide: Vec<u16> = OsStr::new(path).encode_wide().chain(Some(0)).collect();
            let byte_len = ((wide.len() - 1) * 2) as u16;
            let name = UNICODE_STRING {
                Length: byte_len,
                MaximumLength: byte_len,
                Buffer: wide.as_mut_ptr(),
            };
            let attrs = OBJECT_ATTRIBUTES {
                Length: size_of::<OBJECT_ATTRIBUTES>() as u32,
                RootDirectory: ptr::null_mut(),
                ObjectName: &name,
                Attributes: 0,
                SecurityDescriptor: ptr::null(),
                SecurityQualityOfService: ptr::null(),
            };

            let mut iosb: IO_STATUS_BLOCK = unsafe { std::mem::zeroed() };
            let mut handle: HANDLE = ptr::null_mut();
            // Open-existing only: the device object must already be there.
            let status = unsafe {
                NtCreateFile(
                    &mut handle,
                    GENERIC_WRITE | SYNCHRONIZE,
                    &attrs,
                    &mut iosb,
                    ptr::null_mut(),
                    FILE_ATTRIBUTE_NORMAL,
                    0, // no sharing
                    FILE_OPEN,
                    FILE_NON_DIRECTORY_FILE | FILE_SYNCHRONOUS_IO_NONALERT,
                    ptr::null_mut(),
                    0,
                )
            };
            if status != STATUS_SUCCESS || handle.is_null() {
                return Err(io::Error::other(format!(
                    "NtCreateFile({path}) returned {status:#010x}"
                )));
            }
            Ok(RawDeviceHandle(handle))
        }

        fn control_request(
            &mut self,
            handle: &RawDeviceHandle,
            code: u32,
            input: &[u8],
        ) -> io::Result<()> {
            let mut iosb: IO_STATUS_BLOCK = unsafe { std::mem::zeroed() };
            let status = unsafe {
                NtDeviceIoControlFile(
                    handle.0,
                    ptr::null_mut(), // no event
                    None,            // no APC
                    ptr::null_mut(),
                    &mut iosb,
                    code,
                    input.as_ptr().cast(),
                    input.len() as u32,
                    ptr::null_mut(), // no output buffer
                    0,
                )
            };
            if status != STATUS_SUCCESS {
                return Err(io::Error::other(format!(
                    "NtDeviceIoControlFile({code:#010x}) returned {status:#010x}"
                )));
            }
            Ok(())
        }

        fn close(&mut self, handle: RawDeviceHandle) {
            unsafe { CloseHandle(handle.0) };
        }
    }
}
