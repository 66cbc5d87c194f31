//! Calendar slot - a free interval eligible for a viewing

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display format for slot start times, e.g. `Monday Mar 02, 06:00PM`
pub const SLOT_DISPLAY_FORMAT: &str = "%A %b %d, %I:%M%p";

/// A free calendar interval
///
/// Identity for plan purposes is the `(start, end)` pair; the display
/// string is presentation only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub display: String,
}

impl Slot {
    /// Build a slot, rendering the display string from the start time
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let display = start.format(SLOT_DISPLAY_FORMAT).to_string();
        Self { start, end, display }
    }

    /// Identity key for slot-uniqueness checks
    pub fn key(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start, self.end)
    }
}
