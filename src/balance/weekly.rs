use serde::Serialize;
use time::{Date, Duration};

use super::daily::{compute_daily_balance, DailyBalance};
use super::error::BalanceError;
use super::model::{round_kcal, DailyActivityAggregate, Profile};
use crate::day::iso_date;

pub const WINDOW_DAYS: i64 = 7;

/// One day of a balance report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayBalance {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub has_data: bool,
    #[serde(flatten)]
    pub balance: DailyBalance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyBalance {
    /// Oldest first, ending on the last day of the window.
    pub days: Vec<DayBalance>,
    pub average_balance: i32,
    pub total_deficit: i32,
}

/// The trailing window `[end - 6, end]`, oldest first.
pub fn window(end: Date) -> Vec<Date> {
    (0..WINDOW_DAYS)
        .rev()
        .map(|back| end - Duration::days(back))
        .collect()
}

pub fn day_balance(
    profile: &Profile,
    today: Date,
    aggregate: &DailyActivityAggregate,
) -> Result<DayBalance, BalanceError> {
    let balance = compute_daily_balance(
        profile,
        today,
        aggregate.consumed_kcal,
        aggregate.workout_kcal,
        aggregate.step_count,
    )?;
    Ok(DayBalance {
        date: aggregate.date,
        has_data: aggregate.has_data(),
        balance,
    })
}

/// Builds the seven-day report ending on `end`.
///
/// Dates without an aggregate are reported with `has_data = false`; such days
/// are left out of both the average and the total.
pub fn compute_weekly_balance(
    profile: &Profile,
    today: Date,
    end: Date,
    aggregates: &[DailyActivityAggregate],
) -> Result<WeeklyBalance, BalanceError> {
    let days = window(end)
        .into_iter()
        .map(|date| {
            let aggregate = aggregates
                .iter()
                .find(|a| a.date == date)
                .copied()
                .unwrap_or_else(|| DailyActivityAggregate::empty(date));
            day_balance(profile, today, &aggregate)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (total, counted) = days
        .iter()
        .filter(|d| d.has_data)
        .fold((0i64, 0i64), |(sum, n), d| (sum + i64::from(d.balance.balance), n + 1));

    let average_balance = if counted == 0 {
        0
    } else {
        round_kcal(total as f64 / counted as f64)
    };
    let total_deficit = i32::try_from(total)
        .map_err(|_| BalanceError::invalid("weekly total out of range"))?;

    Ok(WeeklyBalance {
        days,
        average_balance,
        total_deficit,
    })
}
