// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Wall-clock source used to time a run.

use core::fmt;

use chrono::{DateTime, Local, Timelike};

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The platform clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A `HH:MM:SS` rendering of a time of day, stored inline.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp([u8; 8]);

impl Timestamp {
    /// Renders the time-of-day part of `time`.
    pub fn of<T: Timelike>(time: &T) -> Self {
        let mut buf = [b':'; 8];
        for (slot, value) in [(0, time.hour()), (3, time.minute()), (6, time.second())] {
            let value = value.min(99) as u8;
            buf[slot] = b'0' + value / 10;
            buf[slot + 1] = b'0' + value % 10;
        }
        Self(buf)
    }

    pub fn as_str(&self) -> &str {
        // Every byte is an ASCII digit or ':'.
        core::str::from_utf8(&self.0).unwrap_or("??:??:??")
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Timestamp").field(&self.as_str()).finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    #[test]
    fn timestamp_is_zero_padded() {
        let t = NaiveTime::from_hms_opt(7, 5, 9).unwrap();
        assert_eq!(Timestamp::of(&t).as_str(), "07:05:09");
    }

    #[test]
    fn timestamp_end_of_day() {
        let t = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        assert_eq!(Timestamp::of(&t).to_string(), "23:59:59");
    }

    #[test]
    fn system_clock_renders_eight_chars() {
        let stamp = Timestamp::of(&SystemClock.now());
        assert_eq!(stamp.as_str().len(), 8);
        assert_eq!(&stamp.as_str()[2..3], ":");
    }
}
