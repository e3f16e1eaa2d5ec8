/// Compute X (question number) and Y (seconds) bounds for the answer time chart
pub fn compute_chart_params(time_coords: &[(f64, f64)]) -> (f64, f64) {
    let highest_secs = time_coords
        .iter()
        .map(|&(_, secs)| secs)
        .fold(0.0, f64::max);

    let question_count = match time_coords.last() {
        Some(x) => x.0,
        None => 1.0,
    };

    (question_count.max(1.0), highest_secs.ceil().max(1.0))
}

/// Pair each answer time with its 1-based question number
pub fn time_coords(times_secs: &[f64]) -> Vec<(f64, f64)> {
    times_secs
        .iter()
        .enumerate()
        .map(|(idx, &secs)| ((idx + 1) as f64, secs))
        .collect()
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
