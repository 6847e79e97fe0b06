//! Plain-text rendering of recommendations.

use std::fmt::Write;

use chrono::NaiveTime;
use tennis_core::{Constraints, DayGroup, Humidity, Recommendation, ScoredObservation};

pub fn constraints(constraints: &Constraints) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Constraints applied:");
    let _ = writeln!(out, "- Temperature > {}°C", constraints.min_temperature_c);
    let _ = writeln!(out, "- Wind Speed < {} kph", constraints.max_wind_speed_kph);
    let _ = writeln!(
        out,
        "- Precipitation Probability < {}%",
        constraints.max_precipitation_probability_pct
    );
    let _ = writeln!(out, "- Humidity < {}%", constraints.max_humidity_pct);
    out
}

pub fn recommendation(rec: &Recommendation, applied: &Constraints) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "===== OPTIMAL TENNIS TIMES (PARETO FRONT) =====");
    out.push_str(&constraints(applied));
    let _ = writeln!(out, "\nFound {} optimal time slots:", rec.pareto_front.len());

    for (index, slot) in rec.pareto_front.iter().enumerate() {
        write_slot(&mut out, index + 1, slot);
    }

    let _ = writeln!(out, "\n===== OTHER VALID TIMES =====");
    if rec.other_valid_times.is_empty() {
        let _ = writeln!(out, "None.");
    }
    for day in &rec.other_valid_times {
        write_day(&mut out, day);
    }
    out
}

fn write_slot(out: &mut String, number: usize, slot: &ScoredObservation) {
    let obs = &slot.observation;
    let s = &slot.scores;
    let _ = writeln!(
        out,
        "\n[{number}] {} at {} - {}",
        obs.date,
        hh_mm(obs.time),
        obs.location
    );
    let _ = writeln!(
        out,
        "   Temperature: {}°C (Score: {:.2})",
        obs.temperature_c, s.temperature
    );
    let _ = writeln!(
        out,
        "   Wind: {} kph, {} (Score: {:.2})",
        obs.wind_speed_kph, obs.wind_direction, s.wind
    );
    let _ = writeln!(
        out,
        "   Precipitation Probability: {}% (Score: {:.2})",
        obs.precipitation_probability_pct, s.precipitation
    );
    let _ = writeln!(
        out,
        "   Humidity: {} (Score: {:.2})",
        humidity(obs.humidity),
        s.humidity
    );
    let _ = writeln!(out, "   Condition: {}", obs.condition);
    let _ = writeln!(out, "   Overall Score: {:.2}", slot.overall_score);
}

fn write_day(out: &mut String, day: &DayGroup) {
    let _ = writeln!(out, "\n{}", day.date);
    for slot in &day.best_times {
        let _ = writeln!(
            out,
            "   {}  {}°C, {} kph {}, {}% precip, humidity {} (Overall: {:.2})",
            hh_mm(slot.time),
            slot.temperature,
            slot.wind_speed,
            slot.wind_direction,
            slot.precipitation_probability,
            humidity(slot.humidity),
            slot.overall_score
        );
    }
}

fn hh_mm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn humidity(h: Humidity) -> String {
    match h {
        Humidity::Percent(pct) => format!("{pct}%"),
        Humidity::Unavailable => tennis_core::model::UNAVAILABLE.to_string(),
    }
}
