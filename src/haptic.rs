//! Haptic feedback capability.
//!
//! The original error affordance is a device vibration; in a terminal the
//! closest equivalent is the BEL character. Behind a trait so engine tests
//! can count pulses instead of ringing bells.

use std::io::{Write, stdout};

pub trait Haptics {
    /// Emit one short feedback pulse.
    fn buzz(&mut self);
}

/// Rings the terminal bell. Most emulators render this as an audible or
/// visual flash even in raw mode.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Haptics for TerminalBell {
    fn buzz(&mut self) {
        let _ = stdout().write_all(b"\x07");
        let _ = stdout().flush();
    }
}

/// No feedback at all.
#[derive(Debug, Default)]
pub struct SilentHaptics;

impl Haptics for SilentHaptics {
    fn buzz(&mut self) {}
}
