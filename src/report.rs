//! Wire-level mouse report.
//!
//! The driver consumes a fixed 5-byte record per update:
//!
//!   `[button:u8][x:u8][y:u8][wheel:u8][reserved:u8 = 0]`
//!
//! The layout is bit-exact; the peer is a binary-protocol kernel driver with
//! no tolerance for reordering or implicit padding. Callers pass arbitrary
//! `i32` values and the constructor clamps them into the encodable range —
//! a large negative delta becomes 0, never a wrapped-around byte.

/// Bit flags for the `button` byte of a [`MouseReport`].
pub mod buttons {
    pub const NONE: u8 = 0x00;
    pub const LEFT: u8 = 0x01;
    pub const RIGHT: u8 = 0x02;
    pub const MIDDLE: u8 = 0x04;
    pub const SIDE4: u8 = 0x08;
    pub const SIDE5: u8 = 0x10;
}

/// One mouse update as the driver expects it on the wire.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseReport {
    pub button: u8,
    pub x: u8,
    pub y: u8,
    pub wheel: u8,
    pub reserved: u8,
}

// The driver rejects any other record size.
const _: () = assert!(size_of::<MouseReport>() == 5);

impl MouseReport {
    /// Build a report from arbitrary integers, clamping each field to `[0, 255]`.
    pub fn clamped(button: i32, x: i32, y: i32, wheel: i32) -> Self {
        Self {
            button: clamp_byte(button),
            x: clamp_byte(x),
            y: clamp_byte(y),
            wheel: clamp_byte(wheel),
            reserved: 0,
        }
    }

    /// Encode the record exactly as it crosses the IOCTL boundary.
    pub fn as_bytes(&self) -> [u8; 5] {
        [self.button, self.x, self.y, self.wheel, self.reserved]
    }
}

/// Clamp an arbitrary integer into the encodable byte range.
pub fn clamp_byte(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
