use clap::ValueEnum;
use std::fmt;

use crate::FRAGMENTS_PER_PROFILE;

/// The face-button slot a DualSense Edge profile is bound to. The
/// discriminant is the feature report id of the first of the three
/// fragments holding that slot's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[repr(u8)]
pub enum ProfileSlot {
    /// Profile on the square button slot
    Square = 0x73,

    /// Profile on the cross button slot
    Cross = 0x76,

    /// Profile on the circle button slot
    Circle = 0x79,
}

impl ProfileSlot {
    /// All slots, in the order the controller reports them.
    pub const ALL: [ProfileSlot; 3] = [
        ProfileSlot::Square,
        ProfileSlot::Cross,
        ProfileSlot::Circle,
    ];

    pub fn base_report_id(self) -> u8 {
        self as u8
    }

    /// The three consecutive feature report ids holding this slot's profile.
    pub fn report_ids(self) -> [u8; FRAGMENTS_PER_PROFILE] {
        let base = self as u8;
        [base, base + 1, base + 2]
    }
}

impl fmt::Display for ProfileSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileSlot::Square => write!(f, "square"),
            ProfileSlot::Cross => write!(f, "cross"),
            ProfileSlot::Circle => write!(f, "circle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_ids_are_consecutive() {
        assert_eq!(ProfileSlot::Square.report_ids(), [0x73, 0x74, 0x75]);
        assert_eq!(ProfileSlot::Cross.report_ids(), [0x76, 0x77, 0x78]);
        assert_eq!(ProfileSlot::Circle.report_ids(), [0x79, 0x7a, 0x7b]);
    }

    #[test]
    fn all_slots_in_controller_order() {
        let bases: Vec<u8> = ProfileSlot::ALL.iter().map(|s| s.base_report_id()).collect();
        assert_eq!(bases, [0x73, 0x76, 0x79]);
    }
}
