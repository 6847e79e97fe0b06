use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::Result,
    filter::{Constraints, filter},
    model::{DayGroup, HourlyObservation, RawObservation, ScoredObservation},
    organize::organize,
    pareto::{ParetoPartition, select},
    score::score_all,
};

/// Outcome of one recommendation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Pareto-optimal hours, grouped by day.
    pub optimized_times: Vec<DayGroup>,
    /// Hours that meet every constraint but are dominated, grouped by day.
    pub other_valid_times: Vec<DayGroup>,
    /// The front as a flat chronological list.
    #[serde(skip)]
    pub pareto_front: Vec<ScoredObservation>,
}

impl Recommendation {
    pub fn valid_count(&self) -> usize {
        self.optimized_times
            .iter()
            .chain(&self.other_valid_times)
            .map(|day| day.best_times.len())
            .sum()
    }
}

/// Filter, score and rank `observations` under `constraints`.
///
/// Fails before doing any work when the constraints are unusable or any
/// record carries a non-finite measurement.
#[tracing::instrument(level = "debug", skip_all, fields(records = observations.len()))]
pub fn recommend(
    observations: &[HourlyObservation],
    constraints: &Constraints,
) -> Result<Recommendation> {
    constraints.validate()?;
    for (index, obs) in observations.iter().enumerate() {
        obs.validate().map_err(|e| e.at_index(index))?;
    }

    let valid = filter(observations, constraints);
    info!("Found {} time slots that meet all constraints", valid.len());

    let scored = score_all(&valid, constraints);
    let ParetoPartition { front, remainder } = select(scored);
    debug!(
        front = front.len(),
        remainder = remainder.len(),
        "Partitioned valid time slots"
    );

    for slot in &front {
        debug!(
            date = %slot.observation.date,
            time = %slot.observation.time.format("%H:%M"),
            temperature = slot.scores.temperature,
            wind = slot.scores.wind,
            precipitation = slot.scores.precipitation,
            humidity = slot.scores.humidity,
            overall = slot.overall_score,
            "Pareto-optimal time slot"
        );
    }

    Ok(Recommendation {
        optimized_times: organize(&front),
        other_valid_times: organize(&remainder),
        pareto_front: front,
    })
}

/// Convert tabular rows and run [`recommend`] on them.
///
/// The first malformed row aborts the run; its position is part of the error.
pub fn recommend_raw(
    rows: Vec<RawObservation>,
    constraints: &Constraints,
) -> Result<Recommendation> {
    constraints.validate()?;
    let mut observations = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let obs = HourlyObservation::try_from(row);
        observations.push(obs.map_err(|e| e.at_index(index))?);
    }

    debug!("Parsed {} hourly observations", observations.len());
    recommend(&observations, constraints)
}
