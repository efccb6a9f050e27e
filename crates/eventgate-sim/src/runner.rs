use eventgate_clock::{ClockSource, MockClock};
use eventgate_pricing::{catalog_offers, is_waitlist_eligible, purchase_affordance};
use eventgate_types::{EventGateError, Result};
use eventgate_workflow::{stage_views, StageCursor, WorkflowGateResolver};

use crate::hashing::json_digest;
use crate::report::{ReplayReport, ReplaySummary, SaleTransition, TickReport};
use crate::scenario::ScenarioConfig;

/// Replays a scenario snapshot under a simulated clock
pub struct ReplayRunner {
    clock: MockClock,
}

impl ReplayRunner {
    pub fn new() -> Self {
        Self::with_clock(MockClock::default())
    }

    /// Share a clock with the caller, e.g. to inspect time after a run
    pub fn with_clock(clock: MockClock) -> Self {
        ReplayRunner { clock }
    }

    pub fn clock(&self) -> &MockClock {
        &self.clock
    }

    /// Resolve every component at each tick of the scenario's schedule
    pub fn run(&self, scenario: &ScenarioConfig) -> Result<ReplayReport> {
        let start = scenario.replay.validate()?;
        let input_hash = json_digest(scenario)?;

        tracing::info!(
            scenario = %scenario.name,
            %start,
            ticks = scenario.replay.ticks,
            interval_secs = scenario.replay.tick_interval_secs,
            "starting replay"
        );

        self.clock.set(start);
        let resolver = WorkflowGateResolver::new(&scenario.stages);
        let mut cursor: Option<StageCursor> = None;
        let mut ticks: Vec<TickReport> = Vec::with_capacity(scenario.replay.ticks);
        let mut transitions = Vec::new();

        for tick in 0..scenario.replay.ticks {
            let now = self.clock.now();

            let offers = catalog_offers(&scenario.catalog, now);
            let waitlist_eligible = is_waitlist_eligible(&scenario.catalog, now);
            let affordance = purchase_affordance(&scenario.catalog, now);
            let workflow = resolver.resolve(now);
            let stages = stage_views(&workflow, &scenario.stages, now);

            let position = match cursor.as_mut() {
                Some(c) => c.refresh(&workflow),
                None => {
                    let c = StageCursor::initial(&workflow);
                    cursor = Some(c);
                    c.position()
                }
            };

            if let Some(previous) = ticks.last() {
                for (before, after) in previous.offers.iter().zip(offers.iter()) {
                    if before.sale_state != after.sale_state {
                        tracing::info!(
                            tick,
                            %now,
                            ticket = %after.ticket_type_id,
                            from = ?before.sale_state,
                            to = ?after.sale_state,
                            "sale state changed"
                        );
                        transitions.push(SaleTransition {
                            tick,
                            at: now,
                            ticket_type_id: after.ticket_type_id.clone(),
                            from: before.sale_state.clone(),
                            to: after.sale_state.clone(),
                        });
                    }
                }
                if previous.workflow != workflow {
                    tracing::info!(tick, %now, max_allowed = workflow.max_allowed_stage, "workflow gate changed");
                }
            }

            tracing::debug!(tick, %now, waitlist_eligible, ?affordance, cursor = position, "tick resolved");

            ticks.push(TickReport {
                tick,
                at: now,
                offers,
                waitlist_eligible,
                affordance,
                workflow,
                stages,
                cursor: position,
            });

            self.clock.advance_secs(scenario.replay.tick_interval_secs);
        }

        let last = ticks
            .last()
            .ok_or_else(|| EventGateError::ConfigError("replay produced no ticks".to_string()))?;
        let summary = ReplaySummary {
            total_ticks: ticks.len(),
            first_waitlist_tick: ticks.iter().find(|t| t.waitlist_eligible).map(|t| t.tick),
            sale_transitions: transitions,
            final_max_allowed_stage: last.workflow.max_allowed_stage,
            final_cursor: last.cursor,
        };
        let output_hash = json_digest(&ticks)?;

        tracing::info!(
            scenario = %scenario.name,
            transitions = summary.sale_transitions.len(),
            output_hash = %output_hash,
            "replay complete"
        );

        Ok(ReplayReport {
            scenario_name: scenario.name.clone(),
            input_hash,
            output_hash,
            summary,
            ticks,
        })
    }
}

impl Default for ReplayRunner {
    fn default() -> Self {
        Self::new()
    }
}
