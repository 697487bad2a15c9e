pub mod analytics;
pub mod campaign;
pub mod quadratic;

pub use analytics::ReductionStats;
pub use campaign::{run_campaign, CampaignError, CampaignReport, Outcome, SystemUnderTest};
pub use quadratic::QuadraticSut;
