use eventgate_types::{TicketType, Timestamp};
use serde::{Deserialize, Serialize};

use crate::phase::PhaseWindowResolver;

/// Which action to offer for author registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseAffordance {
    /// At least one author ticket is on sale
    Purchase,
    /// Every author ticket is exhausted
    Waitlist,
    /// Nothing on sale and not sold out (unconfigured, closed or not yet open)
    Unavailable,
}

/// Every author ticket type is exhausted at `now`.
///
/// Non-author types are ignored. With no author types at all this is `false`:
/// nothing configured is not the same as sold out.
pub fn all_exhausted<'a, I>(ticket_types: I, now: Timestamp) -> bool
where
    I: IntoIterator<Item = &'a TicketType>,
{
    let mut seen_author = false;
    for ticket in ticket_types.into_iter().filter(|t| t.is_author_ticket) {
        seen_author = true;
        if !PhaseWindowResolver::new(&ticket.phases).is_exhausted(now) {
            return false;
        }
    }
    seen_author
}

/// Offer the waitlist instead of a purchase action
pub fn is_waitlist_eligible(ticket_types: &[TicketType], now: Timestamp) -> bool {
    let eligible = all_exhausted(ticket_types, now);
    tracing::trace!(%now, eligible, "waitlist eligibility");
    eligible
}

pub fn purchase_affordance(ticket_types: &[TicketType], now: Timestamp) -> PurchaseAffordance {
    let any_on_sale = ticket_types
        .iter()
        .filter(|t| t.is_author_ticket)
        .any(|t| PhaseWindowResolver::new(&t.phases).current(now).is_some());

    if any_on_sale {
        PurchaseAffordance::Purchase
    } else if is_waitlist_eligible(ticket_types, now) {
        PurchaseAffordance::Waitlist
    } else {
        PurchaseAffordance::Unavailable
    }
}
