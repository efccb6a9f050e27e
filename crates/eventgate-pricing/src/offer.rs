use eventgate_types::{Price, TicketType, Timestamp};
use serde::{Deserialize, Serialize};

use crate::phase::{PhaseWindowResolver, SaleState};
use crate::price_policy::{has_discount, PercentMultiplierPricing, PricePolicy};

/// What a ticket card shows for one ticket type at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketOffer {
    pub ticket_type_id: String,
    pub name: String,
    pub is_author_ticket: bool,
    pub sale_state: SaleState,
    pub current_phase: Option<String>,
    pub next_phase: Option<String>,
    pub base_price: Price,
    /// Price in the current phase, or in the next phase while nothing sells
    pub price: Price,
    pub has_discount: bool,
    /// Slots left in the current phase
    pub remaining_slots: Option<i64>,
}

impl TicketOffer {
    pub fn build(ticket: &TicketType, now: Timestamp) -> Self {
        Self::build_with(ticket, now, &PercentMultiplierPricing)
    }

    pub fn build_with<P: PricePolicy + ?Sized>(ticket: &TicketType, now: Timestamp, policy: &P) -> Self {
        let resolver = PhaseWindowResolver::new(&ticket.phases);
        let current = resolver.current(now).map(|s| s.phase);
        let next = resolver.next(now).map(|s| s.phase);
        let priced = current.or(next);

        TicketOffer {
            ticket_type_id: ticket.id.clone(),
            name: ticket.name.clone(),
            is_author_ticket: ticket.is_author_ticket,
            sale_state: resolver.sale_state(now),
            current_phase: current.map(|p| p.name.clone()),
            next_phase: next.map(|p| p.name.clone()),
            base_price: ticket.base_price,
            price: policy.price_for(ticket, priced),
            has_discount: has_discount(ticket.base_price, priced.and_then(|p| p.percent_multiplier)),
            remaining_slots: current.map(|p| p.available_slots),
        }
    }

    pub fn is_purchasable(&self) -> bool {
        matches!(self.sale_state, SaleState::OnSale { .. })
    }
}

/// Offers for a whole catalog, in catalog order
pub fn catalog_offers(ticket_types: &[TicketType], now: Timestamp) -> Vec<TicketOffer> {
    ticket_types
        .iter()
        .map(|t| TicketOffer::build(t, now))
        .collect()
}
