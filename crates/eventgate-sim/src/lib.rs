mod scenario;
mod hashing;
mod report;
mod runner;

pub use scenario::{ReplayConfig, ScenarioConfig};
pub use hashing::{json_digest, HashRef, ReportDigest};
pub use report::{ReplayReport, ReplaySummary, SaleTransition, TickReport};
pub use runner::ReplayRunner;
