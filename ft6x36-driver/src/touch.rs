/// Maximum number of simultaneous contacts the controller tracks.
pub const MAX_TOUCH_POINTS: usize = 2;

/// Size of the touch report burst, starting at the device mode register.
pub const REPORT_SIZE: usize = 16;

// Offsets into the touch report.
const STATUS: usize = 0x02;
const P1_XH: usize = 0x03;
const P1_XL: usize = 0x04;
const P1_YH: usize = 0x05;
const P1_YL: usize = 0x06;
const P2_XH: usize = 0x09;
const P2_XL: usize = 0x0A;
const P2_YH: usize = 0x0B;
const P2_YL: usize = 0x0C;

/// A single contact. Coordinates are 12 bit panel units, not clamped to any
/// screen resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

/// Event flag of the first touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum EventFlag {
    PutDown,
    PutUp,
    Contact,
    #[default]
    None,
}

impl EventFlag {
    /// Decode the two top bits of an `XH` register.
    const fn from_xh(xh: u8) -> Self {
        match (xh >> 6) & 0b11 {
            0b00 => EventFlag::PutDown,
            0b01 => EventFlag::PutUp,
            0b10 => EventFlag::Contact,
            _ => EventFlag::None,
        }
    }
}

/// One decoded touch report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct TouchReport {
    point_count: u8,
    points: [TouchPoint; MAX_TOUCH_POINTS],
    event: EventFlag,
}

impl TouchReport {
    /// Decode a raw touch report.
    ///
    /// A zero count yields an empty report without looking at the coordinate
    /// bytes. Any other count decodes the first point; the second one is only
    /// decoded when the count is exactly two. Counts outside `0..=2` are
    /// treated as a single contact.
    pub fn decode(buf: &[u8; REPORT_SIZE]) -> Self {
        let raw_count = buf[STATUS] & 0x0F;
        if raw_count == 0 {
            return Self::default();
        }

        let mut report = Self {
            point_count: 1,
            points: [TouchPoint::default(); MAX_TOUCH_POINTS],
            event: EventFlag::from_xh(buf[P1_XH]),
        };
        report.points[0] = TouchPoint {
            x: coordinate(buf[P1_XH], buf[P1_XL]),
            y: coordinate(buf[P1_YH], buf[P1_YL]),
        };

        if raw_count == 2 {
            report.points[1] = TouchPoint {
                x: coordinate(buf[P2_XH], buf[P2_XL]),
                y: coordinate(buf[P2_YH], buf[P2_YL]),
            };
            report.point_count = 2;
        }

        report
    }

    /// Number of valid points, at most [`MAX_TOUCH_POINTS`].
    pub fn point_count(&self) -> u8 {
        self.point_count
    }

    /// The valid points of this report.
    pub fn points(&self) -> &[TouchPoint] {
        &self.points[..usize::from(self.point_count)]
    }

    pub fn event(&self) -> EventFlag {
        self.event
    }

    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    /// Copy as many points as `out` can hold, returning the number of points
    /// in the report. Points that do not fit are dropped.
    pub fn copy_points(&self, out: &mut [TouchPoint]) -> u8 {
        for (slot, point) in out.iter_mut().zip(self.points()) {
            *slot = *point;
        }
        self.point_count
    }
}

/// Assemble a 12 bit coordinate from its high nibble and low byte.
fn coordinate(high: u8, low: u8) -> u16 {
    (u16::from(high & 0x0F) << 8) | u16::from(low)
}
