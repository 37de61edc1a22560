use crate::config::{ArrivalModel, DispatchMode, SimConfig};
use crate::dist::{Dist, Distributions, Variate, seeded_rng};
use crate::sim::SimTime;

#[test]
fn degenerate_parameters_collapse_to_constants() {
    assert_eq!(Dist::exponential(0.0), Dist::Constant(0.0));
    assert_eq!(Dist::exponential(-1.0), Dist::Constant(0.0));
    assert_eq!(Dist::clipped_normal(10.0, 0.0), Dist::Constant(10.0));
    assert_eq!(
        Dist::inter_arrival(ArrivalModel::Deterministic, 0.5),
        Dist::Constant(2.0)
    );
    assert_eq!(
        Dist::inter_arrival(ArrivalModel::Deterministic, 0.0),
        Dist::Constant(0.0)
    );
    assert_eq!(
        Dist::inter_arrival(ArrivalModel::Poisson, 0.25),
        Dist::Exponential { rate: 0.25 }
    );
}

#[test]
fn exponential_sample_mean_tracks_inverse_rate() {
    let mut rng = seeded_rng(7);
    let d = Dist::exponential(0.2);
    let n = 20_000;
    let samples: Vec<f64> = (0..n).map(|_| d.draw(&mut rng)).collect();
    assert!(samples.iter().all(|x| *x >= 0.0 && x.is_finite()));
    let mean = samples.iter().sum::<f64>() / n as f64;
    assert!((mean - 5.0).abs() < 0.25, "mean={mean}");
}

#[test]
fn clipped_normal_never_goes_negative() {
    let mut rng = seeded_rng(11);
    let d = Dist::clipped_normal(0.0, 1.0);
    let samples: Vec<f64> = (0..5_000).map(|_| d.draw(&mut rng)).collect();
    assert!(samples.iter().all(|x| *x >= 0.0));
    let zeros = samples.iter().filter(|x| **x == 0.0).count();
    assert!((2_000..3_000).contains(&zeros), "zeros={zeros}");
}

#[test]
fn clipped_normal_mean_is_close_when_far_from_zero() {
    let mut rng = seeded_rng(3);
    let d = Dist::clipped_normal(100.0, 5.0);
    let n = 10_000;
    let mean = (0..n).map(|_| d.draw(&mut rng)).sum::<f64>() / n as f64;
    assert!((mean - 100.0).abs() < 0.5, "mean={mean}");
}

#[test]
fn same_seed_gives_same_stream() {
    let d = Dist::exponential(1.0);
    let mut a = seeded_rng(42);
    let mut b = seeded_rng(42);
    let xs: Vec<f64> = (0..16).map(|_| d.draw(&mut a)).collect();
    let ys: Vec<f64> = (0..16).map(|_| d.draw(&mut b)).collect();
    assert_eq!(xs, ys);

    let mut c = seeded_rng(43);
    let zs: Vec<f64> = (0..16).map(|_| d.draw(&mut c)).collect();
    assert_ne!(xs, zs);
}

#[test]
fn dispatch_cost_follows_mode() {
    let cfg = SimConfig::default();
    let mut rng = seeded_rng(0);
    let sw = Distributions::from_config(DispatchMode::Software, &cfg);
    let hw = Distributions::from_config(DispatchMode::Hardware, &cfg);
    assert_eq!(sw.dispatch_cost.draw_time(&mut rng), SimTime::from_nanos(5));
    assert_eq!(hw.dispatch_cost.draw_time(&mut rng), SimTime::from_nanos(1));
    assert_eq!(sw.service.draw_time(&mut rng), SimTime::from_nanos(10));
}

#[test]
fn dispatch_cost_is_pluggable() {
    let cfg = SimConfig::default();
    let dists = Distributions::from_config(DispatchMode::Hardware, &cfg)
        .with_dispatch_cost(Dist::Constant(2.5));
    let mut rng = seeded_rng(0);
    assert_eq!(dists.dispatch_cost.draw_time(&mut rng), SimTime(2_500));
}
