use eventgate_types::{Price, PricePhase, TicketType};

/// Multipliers at or above this magnitude skip the exact integer path
const EXACT_MULTIPLIER_LIMIT: f64 = 1e15;

/// `round(base × percent / 100)`, rounding halves toward +∞.
///
/// Integer multipliers are computed exactly; fractional ones go through f64.
/// Negative or absurd multipliers are applied as given and the result
/// saturates at the i64 bounds. A non-finite multiplier leaves the base price.
pub fn effective_price(base: Price, percent_multiplier: f64) -> Price {
    if !percent_multiplier.is_finite() {
        return base;
    }

    if percent_multiplier.fract() == 0.0 && percent_multiplier.abs() < EXACT_MULTIPLIER_LIMIT {
        let numerator = (base.minor() as i128) * (percent_multiplier as i128);
        return Price::saturating_from_i128((numerator + 50).div_euclid(100));
    }

    let scaled = (base.minor() as f64) * percent_multiplier / 100.0;
    // `as` saturates at the i64 bounds
    Price::from_minor((scaled + 0.5).floor() as i64)
}

/// Effective price for an optional multiplier; absent means base price
pub fn compute_price(base: Price, percent_multiplier: Option<f64>) -> Price {
    match percent_multiplier {
        Some(m) => effective_price(base, m),
        None => base,
    }
}

/// Multiplier is present and below 100
pub fn has_discount(_base: Price, percent_multiplier: Option<f64>) -> bool {
    matches!(percent_multiplier, Some(m) if m.is_finite() && m < 100.0)
}

/// Base minus effective price; negative for surcharges
pub fn discount_amount(base: Price, percent_multiplier: Option<f64>) -> Price {
    base - compute_price(base, percent_multiplier)
}

/// Pricing policy trait
pub trait PricePolicy {
    /// Price of `ticket` when bought in `phase`; `None` means no phase applies
    fn price_for(&self, ticket: &TicketType, phase: Option<&PricePhase>) -> Price;
}

/// Applies the phase's percent multiplier to the ticket's base price
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentMultiplierPricing;

impl PricePolicy for PercentMultiplierPricing {
    fn price_for(&self, ticket: &TicketType, phase: Option<&PricePhase>) -> Price {
        compute_price(ticket.base_price, phase.and_then(|p| p.percent_multiplier))
    }
}
