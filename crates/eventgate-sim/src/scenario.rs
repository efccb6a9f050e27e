use eventgate_types::{
    parse_timestamp, EventGateError, Price, PricePhase, Result, StageRecord, StageStatus,
    TicketType, Timestamp, WorkflowStage,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on replay length
const MAX_TICKS: usize = 100_000;

/// Clock schedule for a replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayConfig {
    /// First instant, RFC 3339
    pub start: String,
    /// Clock advance between ticks
    pub tick_interval_secs: i64,
    /// Number of resolutions to run
    pub ticks: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            start: "2025-01-01T00:00:00Z".to_string(),
            tick_interval_secs: 86_400, // daily
            ticks: 30,
        }
    }
}

impl ReplayConfig {
    /// Check bounds and parse `start`
    pub fn validate(&self) -> Result<Timestamp> {
        if self.tick_interval_secs <= 0 {
            return Err(EventGateError::ConfigError(format!(
                "tickIntervalSecs must be positive, got {}",
                self.tick_interval_secs
            )));
        }
        if Duration::try_seconds(self.tick_interval_secs).is_none() {
            return Err(EventGateError::ConfigError(format!(
                "tickIntervalSecs out of range, got {}",
                self.tick_interval_secs
            )));
        }
        if self.ticks == 0 || self.ticks > MAX_TICKS {
            return Err(EventGateError::ConfigError(format!(
                "ticks must be in 1..={}, got {}",
                MAX_TICKS, self.ticks
            )));
        }
        parse_timestamp(&self.start)
            .map_err(|e| EventGateError::ConfigError(format!("start: {}", e)))
    }
}

/// Snapshot of catalog and submission data plus the clock schedule to replay it under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub catalog: Vec<TicketType>,
    #[serde(default)]
    pub stages: Vec<StageRecord>,
    #[serde(default)]
    pub replay: ReplayConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::author_registration()
    }
}

impl ScenarioConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EventGateError::IoError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    /// Early bird sold out, regular and late phases open, paper went through revision
    pub fn author_registration() -> Self {
        let phase = |id: &str, name: &str, start: &str, end: &str, slots: i64, multiplier: f64| PricePhase {
            id: id.to_string(),
            name: name.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            total_slots: slots.max(20),
            available_slots: slots,
            percent_multiplier: Some(multiplier),
        };

        ScenarioConfig {
            name: "author_registration".to_string(),
            description: "Author registration through early, regular and late phases".to_string(),
            catalog: vec![
                TicketType {
                    id: "author".to_string(),
                    name: "Author registration".to_string(),
                    base_price: Price::from_minor(500_000),
                    is_author_ticket: true,
                    phases: vec![
                        phase("early", "Early bird", "2025-01-01T00:00:00Z", "2025-02-01T00:00:00Z", 0, 70.0),
                        phase("regular", "Regular", "2025-02-01T00:00:00Z", "2025-03-01T00:00:00Z", 25, 100.0),
                        phase("late", "Late", "2025-03-01T00:00:00Z", "2025-03-15T00:00:00Z", 10, 120.0),
                    ],
                },
                TicketType {
                    id: "visitor".to_string(),
                    name: "Visitor pass".to_string(),
                    base_price: Price::from_minor(150_000),
                    is_author_ticket: false,
                    phases: vec![phase(
                        "standard",
                        "Standard",
                        "2025-01-01T00:00:00Z",
                        "2025-03-15T00:00:00Z",
                        200,
                        100.0,
                    )],
                },
            ],
            stages: vec![
                StageRecord::new(WorkflowStage::Abstract, Some(StageStatus::Accepted)),
                StageRecord::new(WorkflowStage::FullPaper, Some(StageStatus::Revise)),
                StageRecord::new(WorkflowStage::Revision, Some(StageStatus::Accepted)),
                StageRecord::new(WorkflowStage::CameraReady, Some(StageStatus::Accepted)),
                StageRecord::new(WorkflowStage::Payment, None).with_deadline("2025-03-10T00:00:00Z"),
            ],
            replay: ReplayConfig {
                start: "2024-12-25T00:00:00Z".to_string(),
                tick_interval_secs: 86_400,
                ticks: 90,
            },
        }
    }

    /// Every author phase out of slots, so the waitlist is offered throughout
    pub fn sold_out_authors() -> Self {
        let mut scenario = Self::author_registration();
        scenario.name = "sold_out_authors".to_string();
        scenario.description = "All author phases sold out".to_string();
        for ticket in scenario.catalog.iter_mut().filter(|t| t.is_author_ticket) {
            for phase in ticket.phases.iter_mut() {
                phase.available_slots = 0;
            }
        }
        scenario
    }
}
