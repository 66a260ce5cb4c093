use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// billing-cycle state for a due day relative to "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueCycle {
    /// day of month the instrument is due, before clamping
    pub due_day: u32,
    /// this month's due date, clamped to the month's last day
    pub current_due_date: NaiveDate,
    /// the due date `due_in_days` counts towards
    pub next_due_date: NaiveDate,
    /// this month's due date is on or before today
    pub due_applied: bool,
    pub due_in_days: i64,
}

impl DueCycle {
    /// resolve the cycle for `due_day` as seen on `today`
    ///
    /// A due day past the end of a short month falls on that month's last day,
    /// so day 31 resolves to Feb 29 in a leap year and Feb 28 otherwise.
    pub fn resolve(due_day: u32, today: NaiveDate) -> Self {
        let month_start = first_of_month(today);
        let current_due_date = clamped_due_date(month_start, due_day);

        let (due_applied, next_due_date) = if current_due_date <= today {
            let next_month_start = first_of_next_month(month_start);
            (true, clamped_due_date(next_month_start, due_day))
        } else {
            (false, current_due_date)
        };

        Self {
            due_day,
            current_due_date,
            next_due_date,
            due_applied,
            due_in_days: (next_due_date - today).num_days(),
        }
    }

    /// the clamped due date `cycles` months after `next_due_date`
    pub fn due_date_after(&self, cycles: u32) -> NaiveDate {
        let mut month_start = first_of_month(self.next_due_date);
        for _ in 0..cycles {
            month_start = first_of_next_month(month_start);
        }
        clamped_due_date(month_start, self.due_day)
    }
}

/// first day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

fn first_of_next_month(month_start: NaiveDate) -> NaiveDate {
    month_start + Duration::days(days_in_month(month_start.year(), month_start.month()) as i64)
}

/// `due_day` within the month starting at `month_start`, clamped to its last day
pub fn clamped_due_date(month_start: NaiveDate, due_day: u32) -> NaiveDate {
    let last_day = days_in_month(month_start.year(), month_start.month());
    let day = due_day.clamp(1, last_day);
    month_start + Duration::days((day - 1) as i64)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
