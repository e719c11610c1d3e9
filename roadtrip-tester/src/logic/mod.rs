//! Pure logic testing: deterministic journeys driven through the public API.
pub mod policy;
pub mod reports;
pub mod simulation;

pub use policy::NavigationPolicy;
pub use reports::{Aggregate, JourneyOutcome, JourneyRecord, aggregate, render_console, render_json};
pub use simulation::{SimulationConfig, SimulationSession};
