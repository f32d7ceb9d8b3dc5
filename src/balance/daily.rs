use serde::Serialize;
use time::Date;

use super::error::BalanceError;
use super::model::{round_kcal, Profile};
use super::steps::steps_to_kcal;
use super::tmb::{estimate_tmb, TmbMode};

/// Share of consumed energy spent digesting it.
pub const THERMOGENIC_RATIO: f64 = 0.10;

pub const DEFAULT_DEFICIT_GOAL: i32 = -500;

/// Energy balance of one day. Positive `balance` is a surplus, negative a deficit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyBalance {
    pub tmb: i32,
    pub thermogenic: i32,
    pub steps_kcal: i32,
    pub workout_kcal: i32,
    pub burned: i32,
    pub consumed: i32,
    pub balance: i32,
    pub deficit_goal: i32,
}

/// Combines the basal estimate with the day's logged energy.
///
/// Steps and workouts are summed explicitly, so the basal TMB mode is used.
/// `today` only feeds the age calculation.
pub fn compute_daily_balance(
    profile: &Profile,
    today: Date,
    consumed_kcal: i32,
    workout_kcal: i32,
    step_count: i32,
) -> Result<DailyBalance, BalanceError> {
    if consumed_kcal < 0 {
        return Err(BalanceError::invalid("consumed kcal must not be negative"));
    }
    if workout_kcal < 0 {
        return Err(BalanceError::invalid("workout kcal must not be negative"));
    }

    let tmb = estimate_tmb(profile, today, TmbMode::Basal)?;
    let steps_kcal = steps_to_kcal(step_count)?;
    let thermogenic = round_kcal(f64::from(consumed_kcal) * THERMOGENIC_RATIO);

    let burned = [workout_kcal, steps_kcal, thermogenic]
        .into_iter()
        .try_fold(tmb, i32::checked_add)
        .ok_or_else(|| BalanceError::invalid("burned kcal out of range"))?;
    let balance = consumed_kcal
        .checked_sub(burned)
        .ok_or_else(|| BalanceError::invalid("balance out of range"))?;

    Ok(DailyBalance {
        tmb,
        thermogenic,
        steps_kcal,
        workout_kcal,
        burned,
        consumed: consumed_kcal,
        balance,
        deficit_goal: profile.caloric_deficit_goal.unwrap_or(DEFAULT_DEFICIT_GOAL),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::model::Sex;
    use crate::balance::tmb::FALLBACK_TMB_KCAL;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 06 - 15);

    fn male_30() -> Profile {
        Profile {
            sex: Some(Sex::Male),
            birth_date: Some(date!(1994 - 03 - 02)),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            ..Profile::default()
        }
    }

    #[test]
    fn sums_every_energy_term() {
        let day = compute_daily_balance(&male_30(), TODAY, 2000, 300, 8000).unwrap();
        assert_eq!(
            day,
            DailyBalance {
                tmb: 1780,
                thermogenic: 200,
                steps_kcal: 480,
                workout_kcal: 300,
                burned: 2760,
                consumed: 2000,
                balance: -760,
                deficit_goal: DEFAULT_DEFICIT_GOAL,
            }
        );
    }

    #[test]
    fn ignores_activity_level() {
        let mut p = male_30();
        p.activity_level = Some(crate::balance::model::ActivityLevel::VeryActive);
        let day = compute_daily_balance(&p, TODAY, 0, 0, 0).unwrap();
        assert_eq!(day.tmb, 1780);
        assert_eq!(day.balance, -1780);
    }

    #[test]
    fn copies_deficit_goal_verbatim() {
        let mut p = male_30();
        p.caloric_deficit_goal = Some(-300);
        assert_eq!(compute_daily_balance(&p, TODAY, 0, 0, 0).unwrap().deficit_goal, -300);
        p.caloric_deficit_goal = Some(0);
        assert_eq!(compute_daily_balance(&p, TODAY, 0, 0, 0).unwrap().deficit_goal, 0);
    }

    #[test]
    fn empty_profile_uses_fallback() {
        let day = compute_daily_balance(&Profile::default(), TODAY, 1500, 0, 0).unwrap();
        assert_eq!(day.tmb, FALLBACK_TMB_KCAL);
        assert_eq!(day.burned, 1800 + 150);
        assert_eq!(day.balance, 1500 - 1950);
    }

    #[test]
    fn thermogenic_effect_is_rounded() {
        let day = compute_daily_balance(&male_30(), TODAY, 1235, 0, 0).unwrap();
        // 123.5 rounds up
        assert_eq!(day.thermogenic, 124);
    }

    #[test]
    fn rejects_negative_inputs() {
        let p = male_30();
        assert!(compute_daily_balance(&p, TODAY, -1, 0, 0).is_err());
        assert!(compute_daily_balance(&p, TODAY, 0, -1, 0).is_err());
        assert!(compute_daily_balance(&p, TODAY, 0, 0, -1).is_err());
    }

    #[test]
    fn huge_workout_is_rejected_not_wrapped() {
        let err = compute_daily_balance(&Profile::default(), TODAY, 0, i32::MAX, 0).unwrap_err();
        assert!(matches!(err, BalanceError::InvalidInput(_)));
    }

    #[test]
    fn huge_intake_with_workouts_is_rejected() {
        // thermogenic share of i32::MAX pushes burned past the range
        let p = male_30();
        assert!(compute_daily_balance(&p, TODAY, i32::MAX, 2_000_000_000, 0).is_err());
        assert!(compute_daily_balance(&p, TODAY, i32::MAX - 10, 300, 8000).is_ok());
    }

    #[test]
    fn idempotent() {
        let p = male_30();
        let a = compute_daily_balance(&p, TODAY, 2000, 300, 8000).unwrap();
        let b = compute_daily_balance(&p, TODAY, 2000, 300, 8000).unwrap();
        assert_eq!(a, b);
        assert_eq!(p, male_30());
    }
}
