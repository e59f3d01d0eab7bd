//! Tax smoothing and treasury flow.

/// Fraction of the gap between operator and effective tax rate closed per tick.
pub const TAX_SMOOTHING: f32 = 0.03;

/// Per-capita and per-job monthly tax base, multiplied by the tax rate.
const RESIDENT_TAX_BASE: f64 = 0.4;
const WORKER_TAX_BASE: f64 = 0.25;

/// Weekly collections per month.
pub const COLLECTIONS_PER_MONTH: f64 = 4.0;

/// Move the effective tax rate toward the operator's target.
pub fn smooth_tax_rate(effective: f32, target: f32) -> f32 {
    effective + (target - effective) * TAX_SMOOTHING
}

pub fn monthly_income(population: u32, jobs: u32, effective_tax_rate: f32) -> f64 {
    (f64::from(population) * RESIDENT_TAX_BASE + f64::from(jobs) * WORKER_TAX_BASE)
        * f64::from(effective_tax_rate.max(0.0))
}

/// Treasury after one weekly collection.
pub fn collect_weekly_revenue(money: f64, monthly_income: f64, monthly_expenses: f64) -> f64 {
    money + (monthly_income - monthly_expenses) / COLLECTIONS_PER_MONTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_moves_three_percent_of_gap() {
        let next = smooth_tax_rate(9.0, 20.0);
        assert!((next - 9.33).abs() < 1e-4);
    }

    #[test]
    fn test_tax_converges_without_overshoot() {
        let mut eff = 9.0;
        for _ in 0..1000 {
            eff = smooth_tax_rate(eff, 20.0);
            assert!(eff <= 20.0);
        }
        assert!((eff - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_income_scales_with_tax() {
        assert_eq!(monthly_income(100, 40, 0.0), 0.0);
        assert!((monthly_income(100, 40, 10.0) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_revenue_is_a_quarter_month() {
        assert_eq!(collect_weekly_revenue(1000.0, 400.0, 200.0), 1050.0);
        assert_eq!(collect_weekly_revenue(1000.0, 0.0, 400.0), 900.0);
    }
}
