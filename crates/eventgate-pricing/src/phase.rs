use eventgate_types::{PhaseWindow, PricePhase, ResolvedPhaseInfo, Timestamp};
use serde::{Deserialize, Serialize};

/// A phase whose window parsed cleanly
#[derive(Debug, Clone, Copy)]
pub struct ScheduledPhase<'a> {
    pub window: PhaseWindow,
    pub phase: &'a PricePhase,
}

/// Sale state of a ticket type at one instant, for UI messaging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SaleState {
    /// No phases configured
    NotConfigured,
    /// A phase is selling right now
    OnSale { phase_id: String },
    /// Nothing on sale, but a phase with capacity opens later
    OpensAt { phase_id: String, at: Timestamp },
    /// Every phase is out of slots
    SoldOut,
    /// Nothing selling or upcoming, while earlier phases ended with slots unsold
    Closed,
}

/// Resolves current and next price phase for one ticket type.
///
/// Windows are parsed and ordered once at construction; `resolve` can then be
/// called on every clock tick against the same snapshot.
#[derive(Debug, Clone)]
pub struct PhaseWindowResolver<'a> {
    schedule: Vec<ScheduledPhase<'a>>,
    configured: bool,
}

impl<'a> PhaseWindowResolver<'a> {
    pub fn new(phases: &'a [PricePhase]) -> Self {
        let mut schedule: Vec<ScheduledPhase<'a>> = phases
            .iter()
            .filter_map(|phase| {
                if let Err(e) = phase.check_capacity() {
                    tracing::debug!(phase = %phase.id, error = %e, "capacity taken as given");
                }
                match phase.window() {
                    Ok(window) => Some(ScheduledPhase { window, phase }),
                    Err(e) => {
                        tracing::debug!(phase = %phase.id, error = %e, "phase excluded from resolution");
                        None
                    }
                }
            })
            .collect();

        // Stable sort: phases sharing a start keep feed order
        schedule.sort_by_key(|s| s.window.start);

        PhaseWindowResolver {
            schedule,
            configured: !phases.is_empty(),
        }
    }

    /// Valid phases ordered by start
    pub fn schedule(&self) -> &[ScheduledPhase<'a>] {
        &self.schedule
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Earliest-starting phase that is open at `now` and has slots left
    pub fn current(&self, now: Timestamp) -> Option<&ScheduledPhase<'a>> {
        self.schedule
            .iter()
            .find(|s| s.window.contains(now) && s.phase.has_capacity())
    }

    /// Earliest phase opening strictly after `now`, regardless of capacity
    pub fn next(&self, now: Timestamp) -> Option<&ScheduledPhase<'a>> {
        self.schedule.iter().find(|s| s.window.is_future(now))
    }

    /// Nothing current and no valid phase, past or future, has slots.
    ///
    /// With every phase malformed the list is non-empty but nothing can be sold,
    /// which also reads as exhausted.
    pub fn is_exhausted(&self, now: Timestamp) -> bool {
        if !self.configured || self.current(now).is_some() {
            return false;
        }
        let started_empty = self
            .schedule
            .iter()
            .filter(|s| s.window.has_started(now))
            .all(|s| !s.phase.has_capacity());
        let future_empty = self
            .schedule
            .iter()
            .filter(|s| s.window.is_future(now))
            .all(|s| !s.phase.has_capacity());
        started_empty && future_empty
    }

    pub fn resolve(&self, now: Timestamp) -> ResolvedPhaseInfo {
        if !self.configured {
            return ResolvedPhaseInfo::not_configured();
        }

        let info = ResolvedPhaseInfo {
            current_phase: self.current(now).map(|s| s.phase.clone()),
            next_phase: self.next(now).map(|s| s.phase.clone()),
            is_exhausted: self.is_exhausted(now),
        };
        tracing::trace!(
            %now,
            current = info.current_phase.as_ref().map(|p| p.id.as_str()),
            next = info.next_phase.as_ref().map(|p| p.id.as_str()),
            exhausted = info.is_exhausted,
            "phase resolved"
        );
        info
    }

    pub fn sale_state(&self, now: Timestamp) -> SaleState {
        if !self.configured {
            return SaleState::NotConfigured;
        }
        if let Some(current) = self.current(now) {
            return SaleState::OnSale {
                phase_id: current.phase.id.clone(),
            };
        }
        if self.is_exhausted(now) {
            return SaleState::SoldOut;
        }

        // Not exhausted and nothing current: announce the first upcoming phase
        // that still has slots, otherwise sales are over
        match self
            .schedule
            .iter()
            .find(|s| s.window.is_future(now) && s.phase.has_capacity())
        {
            Some(upcoming) => SaleState::OpensAt {
                phase_id: upcoming.phase.id.clone(),
                at: upcoming.window.start,
            },
            None => SaleState::Closed,
        }
    }
}

/// Resolve the phase list of one ticket type at `now`
pub fn resolve_phase(now: Timestamp, phases: &[PricePhase]) -> ResolvedPhaseInfo {
    PhaseWindowResolver::new(phases).resolve(now)
}
