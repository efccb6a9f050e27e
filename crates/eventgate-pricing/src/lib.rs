mod phase;
mod price_policy;
mod waitlist;
mod offer;

pub use phase::{resolve_phase, PhaseWindowResolver, SaleState, ScheduledPhase};
pub use price_policy::{
    compute_price, discount_amount, effective_price, has_discount, PercentMultiplierPricing,
    PricePolicy,
};
pub use waitlist::{all_exhausted, is_waitlist_eligible, purchase_affordance, PurchaseAffordance};
pub use offer::{catalog_offers, TicketOffer};
