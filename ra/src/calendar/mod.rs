//! Calendar provider - free/busy queries, slot computation, event CRUD

mod error;
mod google;
mod provider;
mod slots;

use chrono::NaiveDateTime;
use tracing::debug;

pub use error::CalendarError;
pub use google::GoogleCalendarProvider;
pub use provider::{CalendarEvent, CalendarProvider, EventRequest};
pub use slots::{PreferredTimes, compute_slots, parse_preferred_times};

use crate::domain::Slot;

/// Compute free viewing slots for a request window
///
/// Fetches busy intervals from the provider, then derives hour-aligned
/// candidate slots inside the preferred windows, excluding busy overlaps.
pub async fn get_available_slots(
    provider: &dyn CalendarProvider,
    preferred_times_text: Option<&str>,
    time_min: NaiveDateTime,
    time_max: NaiveDateTime,
    slot_duration_minutes: i64,
) -> Result<Vec<Slot>, CalendarError> {
    debug!(?preferred_times_text, %time_min, %time_max, "get_available_slots: called");
    let preferred = parse_preferred_times(preferred_times_text);
    let busy = provider.free_busy(time_min, time_max).await?;
    let slots = compute_slots(time_min, time_max, slot_duration_minutes, &preferred, &busy);
    debug!(slot_count = slots.len(), "get_available_slots: done");
    Ok(slots)
}
