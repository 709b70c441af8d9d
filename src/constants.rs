//! Protocol constants shared with the kernel peer.
//!
//! The virtual bus driver registers its device objects under the object
//! manager as `\??\ROOT#SYSTEM#<nnnn>#{interface-guid}`, where `<nnnn>` is a
//! zero-padded enumeration ordinal. Driver reloads and hot-plugs leave stale
//! ordinals behind, so several instances may exist at once for the same
//! logical device.
//!
//! The numeric NT flags below are the ntifs.h values used when opening the
//! device object; they are fixed by the driver's expectations (write access,
//! open-existing, synchronous non-directory I/O).

/// Object-manager prefix of every candidate device path.
pub const DEVICE_PATH_PREFIX: &str = r"\??\ROOT#SYSTEM#";

/// Interface GUID the virtual bus driver registers its devices under.
pub const DEVICE_INTERFACE_GUID: &str = "{1abc05c0-c378-41b9-9cef-df1aba82b015}";

/// Highest instance ordinal probed during discovery (inclusive).
pub const MAX_INSTANCE_INDEX: u32 = 9;

/// IOCTL accepted by the device for a single mouse update.
pub const IOCTL_UPDATE_MOUSE: u32 = 0x002A_2010;

// NtCreateFile parameters (ntifs.h).
pub const GENERIC_WRITE: u32 = 0x4000_0000;
pub const SYNCHRONIZE: u32 = 0x0010_0000;
pub const FILE_ATTRIBUTE_NORMAL: u32 = 0x0000_0080;
pub const FILE_OPEN: u32 = 0x0000_0001;
pub const FILE_NON_DIRECTORY_FILE: u32 = 0x0000_0040;
pub const FILE_SYNCHRONOUS_IO_NONALERT: u32 = 0x0000_0020;

/// Build the candidate device path for one instance ordinal.
///
/// Recomputed per open attempt; never persisted.
pub fn candidate_path(index: u32) -> String {
    format!("{DEVICE_PATH_PREFIX}{index:04}#{DEVICE_INTERFACE_GUID}")
}
