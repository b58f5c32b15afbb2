//! Internal Rate of Return (IRR) of a rental investment
//!
//! Treats the purchase as the initial outflow, each year's net profit as an
//! inflow, and the appreciated property value as a terminal inflow.

use super::year::YearProjection;

/// Calculate the IRR of yearly cash flows using Newton-Raphson,
/// falling back to bisection.
///
/// # Arguments
/// * `cashflows` - Cash flows indexed by year, starting at year 0
///
/// # Returns
/// * `Option<f64>` - Annual IRR as a decimal, or None if no solution exists
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    // An IRR requires at least one sign change
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.05;
    let tolerance = 1e-10;
    let max_iterations = 1000;

    for _ in 0..max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            return calculate_irr_bisection(cashflows);
        }

        let new_rate = (rate - npv / dnpv).clamp(-0.99, 10.0);

        if (new_rate - rate).abs() < tolerance {
            return Some(new_rate);
        }

        rate = new_rate;
    }

    calculate_irr_bisection(cashflows)
}

fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

fn calculate_irr_bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = -0.99_f64;
    let mut high = 10.0_f64;
    let tolerance = 1e-10;

    if npv_at_rate(cashflows, low) * npv_at_rate(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..1000 {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(mid);
        }

        if npv_mid * npv_at_rate(cashflows, low) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    None
}

/// Net present value at an annual rate, year 0 undiscounted
pub fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Cash flows of holding the property for the projected horizon and selling
/// at its appreciated value in the final year
pub fn rental_cashflows(property_value: f64, years: &[YearProjection]) -> Vec<f64> {
    let mut cashflows = Vec::with_capacity(years.len() + 1);
    cashflows.push(-property_value);
    cashflows.extend(years.iter().map(|r| r.net_profit_this_year));

    if let (Some(last), Some(row)) = (cashflows.last_mut(), years.last()) {
        *last += property_value + row.property_appreciation;
    }

    cashflows
}

/// IRR of the rental strategy, comparable to the alternative interest rate
pub fn rental_irr(property_value: f64, years: &[YearProjection]) -> Option<f64> {
    if years.is_empty() {
        return None;
    }
    calculate_irr(&rental_cashflows(property_value, years))
}
