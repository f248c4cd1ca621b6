//! Level-payment annuity arithmetic
//!
//! Payments are made at the end of each period (ordinary annuity).

/// Present value of `installment_count` payments of `installment_value`,
/// discounted at `rate` per period.
///
/// A non-positive rate is treated as zero interest, so the result is the
/// undiscounted total.
pub fn present_value(rate: f64, installment_count: u32, installment_value: f64) -> f64 {
    if rate <= 0.0 {
        return total_payback(installment_count, installment_value);
    }

    let discount = (1.0 + rate).powf(-(installment_count as f64));
    installment_value * (1.0 - discount) / rate
}

/// Level installment that amortizes `principal` over `installment_count`
/// periods at `rate` per period.
pub fn installment_for_rate(principal: f64, installment_count: u32, rate: f64) -> f64 {
    if installment_count == 0 {
        return 0.0;
    }
    if rate <= 0.0 {
        return principal / installment_count as f64;
    }

    let discount = (1.0 + rate).powf(-(installment_count as f64));
    principal * rate / (1.0 - discount)
}

/// Total paid back by the borrower over the life of the loan
pub fn total_payback(installment_count: u32, installment_value: f64) -> f64 {
    installment_value * installment_count as f64
}

/// Whether the loan pays back no more than its principal.
///
/// `(P / n) * n` can land a few ulps above `P`, so an excess within
/// `P * EPSILON * n` still counts as paying back the principal only.
pub fn pays_no_interest(principal: f64, installment_count: u32, installment_value: f64) -> bool {
    let excess = total_payback(installment_count, installment_value) - principal;
    excess <= principal * f64::EPSILON * installment_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pays_no_interest_absorbs_rounding() {
        // 1000 / 15 * 15 comes out one ulp above 1000
        assert!(total_payback(15, 1000.0 / 15.0) > 1000.0);
        assert!(pays_no_interest(1000.0, 15, 1000.0 / 15.0));

        assert!(pays_no_interest(1000.0, 10, 99.0));
        assert!(!pays_no_interest(1000.0, 10, 100.01));
    }

    #[test]
    fn test_zero_rate_is_undiscounted() {
        assert_relative_eq!(present_value(0.0, 12, 100.0), 1200.0);
        assert_relative_eq!(present_value(-0.01, 12, 100.0), 1200.0);
    }

    #[test]
    fn test_present_value_known_annuity() {
        // $100/month for 12 months at 0.5%: 100 * (1 - 1.005^-12) / 0.005
        let pv = present_value(0.005, 12, 100.0);
        assert_relative_eq!(pv, 1161.89, epsilon = 0.01);
    }

    #[test]
    fn test_present_value_decreases_with_rate() {
        let mut previous = present_value(0.0, 24, 150.0);
        for step in 1..=50 {
            let pv = present_value(step as f64 * 0.01, 24, 150.0);
            assert!(pv < previous, "PV should fall as the rate rises (step {})", step);
            previous = pv;
        }
    }

    #[test]
    fn test_installment_inverts_present_value() {
        let installment = installment_for_rate(5000.0, 36, 0.015);
        assert_relative_eq!(present_value(0.015, 36, installment), 5000.0, epsilon = 1e-8);
    }

    #[test]
    fn test_installment_edge_cases() {
        assert_eq!(installment_for_rate(1000.0, 0, 0.02), 0.0);
        assert_relative_eq!(installment_for_rate(1000.0, 10, 0.0), 100.0);
    }
}
