mod error_coverage;
mod state_coverage;
