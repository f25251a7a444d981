//! Command logic, derived figures, and the supporting time primitives.

pub mod clock;
pub mod cycle;
pub mod services;

pub use clock::{Clock, ManualClock, SystemClock};
pub use cycle::{cycle_start, month_key, EntryWindow};
