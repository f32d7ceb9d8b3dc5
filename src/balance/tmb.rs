use time::Date;

use super::error::BalanceError;
use super::model::{round_kcal, Profile, Sex};

/// Returned when weight, height or birth date is missing. Degraded accuracy, not an error.
pub const FALLBACK_TMB_KCAL: i32 = 1800;

/// Factor used when the profile has no activity level.
pub const DEFAULT_ACTIVITY_FACTOR: f64 = 1.55;

/// How activity energy is accounted for.
///
/// The two modes are mutually exclusive: a balance that sums steps and
/// workouts explicitly must use `Basal`, otherwise activity is counted twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TmbMode {
    Basal,
    ActivityAdjusted,
}

fn sex_constant(sex: Option<Sex>) -> f64 {
    match sex {
        Some(Sex::Male) => 5.0,
        Some(Sex::Female) => -161.0,
        // midpoint of the two
        Some(Sex::Other) | None => -78.0,
    }
}

/// Zero and absent are both treated as "not filled in".
fn measured(name: &str, value: Option<f64>) -> Result<Option<f64>, BalanceError> {
    match value {
        Some(v) if v.is_nan() || v.is_infinite() => {
            Err(BalanceError::invalid(format!("{name} must be a finite number")))
        }
        Some(v) if v < 0.0 => Err(BalanceError::invalid(format!("{name} must be positive"))),
        Some(v) if v == 0.0 => Ok(None),
        other => Ok(other),
    }
}

/// Estimates the metabolic rate in kcal/day with the Mifflin-St Jeor
/// formula (called Harris-Benedict in the app).
///
/// Age is the calendar-year difference between `today` and the birth date,
/// not elapsed years.
pub fn estimate_tmb(profile: &Profile, today: Date, mode: TmbMode) -> Result<i32, BalanceError> {
    let weight = measured("weight", profile.weight_kg)?;
    let height = measured("height", profile.height_cm)?;

    let (Some(weight), Some(height), Some(birth_date)) = (weight, height, profile.birth_date)
    else {
        return Ok(FALLBACK_TMB_KCAL);
    };

    let age = today.year() - birth_date.year();
    if age < 0 {
        return Err(BalanceError::invalid("birth date is in the future"));
    }

    let basal = 10.0 * weight + 6.25 * height - 5.0 * f64::from(age) + sex_constant(profile.sex);

    let tmb = match mode {
        TmbMode::Basal => basal,
        TmbMode::ActivityAdjusted => {
            let factor = profile
                .activity_level
                .map(|level| level.factor())
                .unwrap_or(DEFAULT_ACTIVITY_FACTOR);
            basal * factor
        }
    };

    Ok(round_kcal(tmb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::model::ActivityLevel;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 06 - 15);

    fn profile(sex: Option<Sex>) -> Profile {
        Profile {
            sex,
            birth_date: Some(date!(1994 - 11 - 30)),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            activity_level: None,
            caloric_deficit_goal: None,
        }
    }

    #[test]
    fn male_basal() {
        let tmb = estimate_tmb(&profile(Some(Sex::Male)), TODAY, TmbMode::Basal).unwrap();
        assert_eq!(tmb, 1780);
    }

    #[test]
    fn female_basal() {
        let tmb = estimate_tmb(&profile(Some(Sex::Female)), TODAY, TmbMode::Basal).unwrap();
        assert_eq!(tmb, 1614);
    }

    #[test]
    fn other_and_unknown_use_midpoint_constant() {
        let other = estimate_tmb(&profile(Some(Sex::Other)), TODAY, TmbMode::Basal).unwrap();
        let unknown = estimate_tmb(&profile(None), TODAY, TmbMode::Basal).unwrap();
        assert_eq!(other, 1697);
        assert_eq!(unknown, other);
    }

    #[test]
    fn age_is_calendar_year_difference() {
        // Birthday in November has not happened yet on June 15th, still counted as 30.
        let p = profile(Some(Sex::Male));
        let before = estimate_tmb(&p, date!(2024 - 01 - 01), TmbMode::Basal).unwrap();
        let after = estimate_tmb(&p, date!(2024 - 12 - 31), TmbMode::Basal).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn missing_birth_date_falls_back() {
        let mut p = profile(Some(Sex::Male));
        p.birth_date = None;
        assert_eq!(estimate_tmb(&p, TODAY, TmbMode::Basal).unwrap(), FALLBACK_TMB_KCAL);
        assert_eq!(
            estimate_tmb(&p, TODAY, TmbMode::ActivityAdjusted).unwrap(),
            FALLBACK_TMB_KCAL
        );
    }

    #[test]
    fn zero_weight_counts_as_missing() {
        let mut p = profile(Some(Sex::Female));
        p.weight_kg = Some(0.0);
        assert_eq!(estimate_tmb(&p, TODAY, TmbMode::Basal).unwrap(), FALLBACK_TMB_KCAL);
    }

    #[test]
    fn negative_measurements_are_rejected() {
        let mut p = profile(Some(Sex::Male));
        p.height_cm = Some(-180.0);
        assert!(matches!(
            estimate_tmb(&p, TODAY, TmbMode::Basal),
            Err(BalanceError::InvalidInput(_))
        ));

        let mut p = profile(Some(Sex::Male));
        p.weight_kg = Some(-1.0);
        assert!(estimate_tmb(&p, TODAY, TmbMode::Basal).is_err());
    }

    #[test]
    fn future_birth_year_is_rejected() {
        let mut p = profile(Some(Sex::Male));
        p.birth_date = Some(date!(2030 - 01 - 01));
        assert!(estimate_tmb(&p, TODAY, TmbMode::Basal).is_err());
    }

    #[test]
    fn activity_adjusted_applies_factor_once() {
        let mut p = profile(Some(Sex::Male));
        p.activity_level = Some(ActivityLevel::Sedentary);
        // 1780 * 1.2
        assert_eq!(estimate_tmb(&p, TODAY, TmbMode::ActivityAdjusted).unwrap(), 2136);

        p.activity_level = Some(ActivityLevel::VeryActive);
        assert_eq!(estimate_tmb(&p, TODAY, TmbMode::ActivityAdjusted).unwrap(), 3382);
    }

    #[test]
    fn activity_adjusted_defaults_to_moderate() {
        let p = profile(Some(Sex::Male));
        // 1780 * 1.55
        assert_eq!(estimate_tmb(&p, TODAY, TmbMode::ActivityAdjusted).unwrap(), 2759);
    }

    #[test]
    fn deterministic() {
        let p = profile(Some(Sex::Female));
        let a = estimate_tmb(&p, TODAY, TmbMode::Basal);
        let b = estimate_tmb(&p, TODAY, TmbMode::Basal);
        assert_eq!(a, b);
    }
}
