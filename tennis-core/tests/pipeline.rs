//! End-to-end runs of the recommendation pipeline on JSON fixtures.

use chrono::NaiveDate;
use tennis_core::{
    Constraints, HourlyObservation, Humidity, RawObservation, Recommendation, recommend,
    recommend_raw,
};

const EPS: f64 = 1e-9;

fn rows(json: &str) -> Vec<RawObservation> {
    serde_json::from_str(json)
        .expect("fixture must deserialize")
}

fn run(json: &str) -> Recommendation {
    recommend_raw(rows(json), &Constraints::default())
        .expect("fixture is valid")
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .expect("valid date")
}

const WEEKEND: &str = r#"[
    {"Date": "2025-05-04", "Time": "15:00", "Temperature (°C)": "24.0", "Wind Speed (kph)": "6.4",
     "Wind Direction": "S", "Precipitation Probability (%)": 20, "Humidity (%)": 65,
     "Condition": "Partly Sunny", "Location": "Boston, MA"},
    {"Date": "2025-05-03", "Time": "14:00", "Temperature (°C)": "22.0", "Wind Speed (kph)": "4.8",
     "Wind Direction": "NW", "Precipitation Probability (%)": 0, "Humidity (%)": 50,
     "Condition": "Sunny", "Location": "Boston, MA"},
    {"Date": "2025-05-03", "Time": "09:00", "Temperature (°C)": "14.0", "Wind Speed (kph)": "9.7",
     "Wind Direction": "NW", "Precipitation Probability (%)": 10, "Humidity (%)": 70,
     "Condition": "Mostly Sunny", "Location": "Boston, MA"},
    {"Date": "2025-05-05", "Time": "10:00", "Temperature (°C)": "11.0", "Wind Speed (kph)": "32.2",
     "Wind Direction": "NE", "Precipitation Probability (%)": 80, "Humidity (%)": 96,
     "Condition": "Rain", "Location": "Boston, MA"},
    {"Date": "2025-05-05", "Time": "13:00", "Temperature (°C)": "12.0", "Wind Speed (kph)": "25.7",
     "Wind Direction": "NE", "Precipitation Probability (%)": 60, "Humidity (%)": 90,
     "Condition": "Showers", "Location": "Boston, MA"},
    {"Date": "2025-05-04", "Time": "08:00", "Temperature (°C)": "3.0", "Wind Speed (kph)": "1.6",
     "Wind Direction": "W", "Precipitation Probability (%)": 0, "Humidity (%)": "N/A",
     "Condition": "Frost", "Location": "Boston, MA"}
]"#;

#[test]
fn single_pleasant_hour_is_alone_on_the_front() {
    let rec = run(r#"[
        {"Date": "2025-05-03", "Time": "14:00", "Temperature (°C)": 22, "Wind Speed (kph)": 5,
         "Wind Direction": "NW", "Precipitation Probability (%)": 10, "Humidity (%)": 50,
         "Condition": "Sunny", "Location": "Boston, MA"}
    ]"#);

    assert_eq!(rec.pareto_front.len(), 1);
    assert!(rec.other_valid_times.is_empty());

    let scored = &rec.pareto_front[0];
    assert!((scored.scores.temperature - 1.6).abs() < EPS);
    assert!((scored.scores.wind - 0.75).abs() < EPS);
    assert!((scored.scores.precipitation - (1.0 - 10.0 / 45.0)).abs() < EPS);
    assert!((scored.scores.humidity - 1.0).abs() < EPS);

    let expected = (1.6 + 0.75 + (1.0 - 10.0 / 45.0) + 1.0) / 4.0;
    assert!((scored.overall_score - expected).abs() < EPS);

    assert_eq!(rec.optimized_times.len(), 1);
    assert_eq!(rec.optimized_times[0].date, date("2025-05-03"));
    let slot = &rec.optimized_times[0].best_times[0];
    assert!((slot.overall_score - expected).abs() < EPS);
}

#[test]
fn dominated_hour_lands_in_other_valid_times() {
    let rec = run(r#"[
        {"Date": "2025-05-03", "Time": "10:00", "Temperature (°C)": 22, "Wind Speed (kph)": 10,
         "Precipitation Probability (%)": 20, "Humidity (%)": 50},
        {"Date": "2025-05-03", "Time": "11:00", "Temperature (°C)": 22, "Wind Speed (kph)": 5,
         "Precipitation Probability (%)": 10, "Humidity (%)": 50}
    ]"#);

    assert_eq!(rec.optimized_times.len(), 1);
    assert_eq!(rec.optimized_times[0].best_times.len(), 1);
    let best = rec.optimized_times[0].best_times[0].time;
    assert_eq!(best.format("%H:%M").to_string(), "11:00");

    assert_eq!(rec.other_valid_times.len(), 1);
    let other = rec.other_valid_times[0].best_times[0].time;
    assert_eq!(other.format("%H:%M").to_string(), "10:00");
}

#[test]
fn day_without_valid_hours_is_absent_from_both_lists() {
    let rec = run(WEEKEND);
    let stormy = date("2025-05-05");

    assert!(rec.optimized_times.iter().all(|g| g.date != stormy));
    assert!(rec.other_valid_times.iter().all(|g| g.date != stormy));
}

#[test]
fn unavailable_humidity_passes_and_scores_zero() {
    let rec = run(r#"[
        {"Date": "2025-05-06", "Time": "12:00", "Temperature (°C)": 18, "Wind Speed (kph)": 4,
         "Precipitation Probability (%)": 0, "Humidity (%)": "N/A", "Condition": "Clear"}
    ]"#);

    assert_eq!(rec.pareto_front.len(), 1);
    let scored = &rec.pareto_front[0];
    assert_eq!(scored.observation.humidity, Humidity::Unavailable);
    assert_eq!(scored.scores.humidity, 0.0);

    let json = serde_json::to_value(&rec).expect("serializes");
    assert_eq!(json["optimizedTimes"][0]["bestTimes"][0]["humidity"], "N/A");
}

#[test]
fn groups_are_chronological() {
    let rec = run(WEEKEND);

    let all_days: Vec<NaiveDate> = rec
        .optimized_times
        .iter()
        .chain(rec.other_valid_times.iter())
        .map(|g| g.date)
        .collect();
    assert!(all_days.contains(&date("2025-05-03")));
    assert!(all_days.contains(&date("2025-05-04")));

    for groups in [&rec.optimized_times, &rec.other_valid_times] {
        assert!(groups.windows(2).all(|w| w[0].date < w[1].date));
        for group in groups.iter() {
            assert!(group.best_times.windows(2).all(|w| w[0].time <= w[1].time));
        }
    }

    let stamps: Vec<_> = rec
        .pareto_front
        .iter()
        .map(|r| (r.observation.date, r.observation.time))
        .collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn partition_covers_exactly_the_filtered_hours() {
    let rec = run(WEEKEND);
    // Frost hour and both rainy hours fail the constraints.
    assert_eq!(rec.valid_count(), 3);
}

#[test]
fn repeated_runs_are_identical() {
    let constraints = Constraints::default();
    let first = recommend_raw(rows(WEEKEND), &constraints).expect("valid");
    let second = recommend_raw(rows(WEEKEND), &constraints).expect("valid");
    assert_eq!(first, second);
}

#[test]
fn constraints_are_per_call() {
    let observations: Vec<HourlyObservation> = rows(WEEKEND)
        .into_iter()
        .map(|r| r.try_into().expect("valid row"))
        .collect();

    let relaxed = Constraints {
        min_temperature_c: 0.0,
        max_wind_speed_kph: 40.0,
        max_precipitation_probability_pct: 100.0,
        max_humidity_pct: 100.0,
    };

    let strict = recommend(&observations, &Constraints::default())
        .expect("valid");
    let loose = recommend(&observations, &relaxed).expect("valid");
    assert_eq!(strict.valid_count(), 3);
    assert_eq!(loose.valid_count(), 6);
}

#[test]
fn malformed_row_yields_no_partial_result() {
    let err = recommend_raw(
        rows(r#"[
            {"Date": "2025-05-03", "Time": "14:00", "Temperature (°C)": 22, "Wind Speed (kph)": 5,
             "Precipitation Probability (%)": 10, "Humidity (%)": 50},
            {"Date": "2025-05-03", "Time": "15:00", "Temperature (°C)": 22, "Wind Speed (kph)": "",
             "Precipitation Probability (%)": 10, "Humidity (%)": 50}
        ]"#),
        &Constraints::default(),
    )
    .unwrap_err();

    assert!(err.is_data());
    assert!(err.to_string().contains("Wind Speed (kph)"));
}
