//! Build-time source for `<lastBuildDate>`.
//!
//! The builder never reads the system time on its own; a host that wants a
//! `lastBuildDate` passes a clock (or a fixed date) explicitly.

use crate::utils::date::DateTimeUtc;
use std::time::SystemTime;

pub trait Clock {
    fn now(&self) -> DateTimeUtc;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTimeUtc {
        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        DateTimeUtc::from_unix_secs(secs)
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTimeUtc);

impl Clock for FixedClock {
    fn now(&self) -> DateTimeUtc {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTimeUtc {
        (**self).now()
    }
}
