// src/audit/mod.rs
// =============================================================================
// The concurrent link-checking pipeline.
//
//   run::run_audit -> job -> pool (workers + Probe) -> report (aggregator)
//
// Submodules:
// - job: LinkCheckJob and CheckOutcome
// - pool: Worker pool and the completion barrier
// - report: Result aggregator and the final Report
// - run: The orchestrator gluing GitHub, the checker and the pool together
// =============================================================================

mod job;
mod pool;
mod report;
mod run;

pub use report::Report;
pub use run::run_audit;
