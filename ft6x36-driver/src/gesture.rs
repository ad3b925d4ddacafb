/// Coarse gesture classification computed by the controller firmware.
///
/// Gesture support depends on the firmware flashed on the panel; many panels
/// only ever report [`Gesture::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Gesture {
    #[default]
    None,
    MoveUp,
    MoveLeft,
    MoveDown,
    MoveRight,
    ZoomIn,
    ZoomOut,
}

impl Gesture {
    /// Map the raw gesture id register to a gesture.
    /// Unrecognized values map to [`Gesture::None`].
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0x10 => Gesture::MoveUp,
            0x14 => Gesture::MoveRight,
            0x18 => Gesture::MoveDown,
            0x1C => Gesture::MoveLeft,
            0x48 => Gesture::ZoomIn,
            0x49 => Gesture::ZoomOut,
            _ => Gesture::None,
        }
    }
}

impl From<u8> for Gesture {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_gestures() {
        assert_eq!(Gesture::from_raw(0x10), Gesture::MoveUp);
        assert_eq!(Gesture::from_raw(0x14), Gesture::MoveRight);
        assert_eq!(Gesture::from_raw(0x18), Gesture::MoveDown);
        assert_eq!(Gesture::from_raw(0x1C), Gesture::MoveLeft);
        assert_eq!(Gesture::from_raw(0x48), Gesture::ZoomIn);
        assert_eq!(Gesture::from_raw(0x49), Gesture::ZoomOut);
    }

    #[test]
    fn unknown_gesture_is_none() {
        assert_eq!(Gesture::from_raw(0x99), Gesture::None);
        assert_eq!(Gesture::from_raw(0x00), Gesture::None);
        assert_eq!(Gesture::from(0x11), Gesture::None);
    }
}
