use super::error::BalanceError;
use super::model::round_kcal;

pub const KCAL_PER_1000_STEPS: f64 = 60.0;

/// Energy burned walking `steps` steps, 60 kcal per 1000 steps.
pub fn steps_to_kcal(steps: i32) -> Result<i32, BalanceError> {
    if steps < 0 {
        return Err(BalanceError::invalid("step count must not be negative"));
    }
    Ok(round_kcal(f64::from(steps) / 1000.0 * KCAL_PER_1000_STEPS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_steps() {
        assert_eq!(steps_to_kcal(10_000), Ok(600));
        assert_eq!(steps_to_kcal(8_000), Ok(480));
        assert_eq!(steps_to_kcal(0), Ok(0));
        assert_eq!(steps_to_kcal(1_234), Ok(74));
        assert_eq!(steps_to_kcal(12_345), Ok(741));
    }

    #[test]
    fn rejects_negative_steps() {
        assert!(matches!(
            steps_to_kcal(-1),
            Err(BalanceError::InvalidInput(_))
        ));
    }
}
