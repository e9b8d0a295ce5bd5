//! Injectable source of the current local date-time.

use chrono::{Local, NaiveDateTime, SubsecRound};

/// Supplies "now" to the service; read once per mutating operation.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the host's local time, truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(0)
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}
