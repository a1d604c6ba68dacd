use chrono::{DateTime, Utc};

/// Wall-clock source for session timestamps; fixed in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// A clock pinned at `FIXED_TEST_TIMESTAMP`.
#[must_use]
pub fn fixed_clock() -> Clock {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0).map_or(Clock::System, Clock::fixed)
}
