//! Journey records and aggregate reporting.
use colored::Colorize;
use serde::Serialize;

use roadtrip_game::{DefeatCause, Ending};

/// How a simulated journey ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyOutcome {
    Victory,
    OutOfDays,
    OutOfFuel,
    OutOfFood,
    /// The move cap tripped or the policy ran out of affordable moves.
    Stalled,
}

impl From<Ending> for JourneyOutcome {
    fn from(ending: Ending) -> Self {
        match ending {
            Ending::Victory => Self::Victory,
            Ending::Defeat(DefeatCause::OutOfDays) => Self::OutOfDays,
            Ending::Defeat(DefeatCause::OutOfFuel) => Self::OutOfFuel,
            Ending::Defeat(DefeatCause::OutOfFood) => Self::OutOfFood,
        }
    }
}

impl JourneyOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Victory => "victory",
            Self::OutOfDays => "out of days",
            Self::OutOfFuel => "out of fuel",
            Self::OutOfFood => "out of food",
            Self::Stalled => "stalled",
        }
    }
}

/// Summary of one simulated journey.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyRecord {
    pub seed: u64,
    pub policy: &'static str,
    pub outcome: JourneyOutcome,
    pub initial_distance: i32,
    pub day_budget: i32,
    pub moves: u32,
    pub days_elapsed: i32,
    pub coins: i32,
    pub fuel_left: f32,
    pub food_left: f32,
    pub cells_generated: usize,
}

/// Aggregate over a batch of journeys.
#[derive(Debug, Clone, Serialize)]
pub struct Aggregate {
    pub journeys: usize,
    pub victories: usize,
    pub out_of_days: usize,
    pub out_of_fuel: usize,
    pub out_of_food: usize,
    pub stalled: usize,
    pub win_rate: f64,
    pub avg_moves: f64,
    pub avg_coins: f64,
}

#[must_use]
pub fn aggregate(records: &[JourneyRecord]) -> Aggregate {
    let journeys = records.len();
    let count = |outcome: JourneyOutcome| records.iter().filter(|r| r.outcome == outcome).count();
    let victories = count(JourneyOutcome::Victory);
    #[allow(clippy::cast_precision_loss)]
    let denom = journeys.max(1) as f64;
    #[allow(clippy::cast_precision_loss)]
    Aggregate {
        journeys,
        victories,
        out_of_days: count(JourneyOutcome::OutOfDays),
        out_of_fuel: count(JourneyOutcome::OutOfFuel),
        out_of_food: count(JourneyOutcome::OutOfFood),
        stalled: count(JourneyOutcome::Stalled),
        win_rate: victories as f64 / denom,
        avg_moves: records.iter().map(|r| f64::from(r.moves)).sum::<f64>() / denom,
        avg_coins: records.iter().map(|r| f64::from(r.coins)).sum::<f64>() / denom,
    }
}

/// Full report payload for machine-readable output.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub summary: &'a Aggregate,
    pub journeys: &'a [JourneyRecord],
}

/// Render the batch to the console, one line per journey plus a summary.
pub fn render_console(records: &[JourneyRecord], summary: &Aggregate, verbose: bool) {
    if verbose {
        for record in records {
            let outcome = match record.outcome {
                JourneyOutcome::Victory => record.outcome.as_str().green(),
                JourneyOutcome::Stalled => record.outcome.as_str().yellow(),
                _ => record.outcome.as_str().red(),
            };
            println!(
                "seed {:>10} [{}] {:<12} distance {:>2}  moves {:>3}/{:<3}  coins {:>3}  fuel {:>5.1}  food {:>5.1}",
                record.seed,
                record.policy,
                outcome,
                record.initial_distance,
                record.moves,
                record.day_budget,
                record.coins,
                record.fuel_left,
                record.food_left,
            );
        }
    }
    println!(
        "{}: {} journeys, {} won ({:.0}%), {} out of days, {} out of fuel, {} out of food, {} stalled",
        "summary".bold(),
        summary.journeys,
        summary.victories.to_string().green(),
        summary.win_rate * 100.0,
        summary.out_of_days,
        summary.out_of_fuel,
        summary.out_of_food,
        summary.stalled,
    );
    println!(
        "         avg {:.1} moves, avg {:.1} coins per journey",
        summary.avg_moves, summary.avg_coins
    );
}

/// Render the batch as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(records: &[JourneyRecord], summary: &Aggregate) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report {
        summary,
        journeys: records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seed: u64, outcome: JourneyOutcome, moves: u32, coins: i32) -> JourneyRecord {
        JourneyRecord {
            seed,
            policy: "greedy",
            outcome,
            initial_distance: 10,
            day_budget: 20,
            moves,
            days_elapsed: moves as i32,
            coins,
            fuel_left: 5.0,
            food_left: 4.0,
            cells_generated: 30,
        }
    }

    #[test]
    fn aggregate_counts_outcomes_and_rates() {
        let records = vec![
            record(1, JourneyOutcome::Victory, 10, 20),
            record(2, JourneyOutcome::Victory, 12, 0),
            record(3, JourneyOutcome::OutOfFood, 20, 10),
            record(4, JourneyOutcome::Stalled, 30, 30),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.journeys, 4);
        assert_eq!(summary.victories, 2);
        assert_eq!(summary.out_of_food, 1);
        assert_eq!(summary.stalled, 1);
        assert!((summary.win_rate - 0.5).abs() < f64::EPSILON);
        assert!((summary.avg_moves - 18.0).abs() < f64::EPSILON);
        assert!((summary.avg_coins - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_of_empty_batch_is_all_zero() {
        let summary = aggregate(&[]);
        assert_eq!(summary.journeys, 0);
        assert!(summary.win_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn json_report_includes_summary_and_journeys() {
        let records = vec![record(9, JourneyOutcome::OutOfFuel, 15, 0)];
        let summary = aggregate(&records);
        let json = render_json(&records, &summary).unwrap();
        assert!(json.contains("\"out_of_fuel\""));
        assert!(json.contains("\"seed\": 9"));
    }
}
