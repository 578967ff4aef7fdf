//! Pure logic behind the site's small UI behaviors.
//!
//! The browser glue (observers, timers, event listeners) stays in the page;
//! these functions decide what it should do.

pub mod plaque;
pub mod toggle;
pub mod typewriter;

use chrono::{Datelike, NaiveDate};

/// Year shown in the footer copyright line.
#[must_use]
pub fn copyright_year(today: NaiveDate) -> i32 {
    today.year()
}
