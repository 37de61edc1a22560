use crate::report::stats::{self, LatencyStats, WaitStats};

#[test]
fn median_handles_odd_and_even_lengths() {
    assert_eq!(stats::median(&[3.0, 1.0, 2.0]), 2.0);
    assert_eq!(stats::median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    assert_eq!(stats::median(&[]), 0.0);
}

#[test]
fn exclusive_quantiles_interpolate_between_neighbours() {
    let xs: Vec<f64> = (1..=10).map(f64::from).collect();
    let p90 = stats::p90(&xs);
    assert!((p90 - 9.9).abs() < 1e-12, "p90={p90}");

    let ys: Vec<f64> = (1..=100).map(f64::from).collect();
    let p99 = stats::p99(&ys);
    assert!((p99 - 99.99).abs() < 1e-9, "p99={p99}");
    let p90 = stats::p90(&ys);
    assert!((p90 - 90.9).abs() < 1e-9, "p90={p90}");
}

#[test]
fn quantiles_fall_back_to_max_with_too_few_samples() {
    let xs = [5.0, 1.0, 7.0, 3.0];
    assert_eq!(stats::p90(&xs), 7.0);
    let ys: Vec<f64> = (0..50).map(f64::from).collect();
    assert_eq!(stats::p99(&ys), 49.0);
    assert_eq!(stats::p99(&[]), 0.0);
}

#[test]
fn empty_input_yields_zero_placeholders() {
    assert_eq!(LatencyStats::from_samples(&[]), LatencyStats::default());
    assert_eq!(WaitStats::from_samples(&[]), WaitStats::default());
}

#[test]
fn latency_stats_cover_min_mean_max() {
    let s = LatencyStats::from_samples(&[10.0, 20.0, 30.0]);
    assert_eq!(s.avg_ns, 20.0);
    assert_eq!(s.median_ns, 20.0);
    assert_eq!(s.min_ns, 10.0);
    assert_eq!(s.max_ns, 30.0);
    assert_eq!(s.p90_ns, 30.0);
    assert_eq!(s.p99_ns, 30.0);
}
