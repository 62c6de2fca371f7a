// tests/brownian_path_test.rs
use sde_diag::brownian::BrownianPath;

#[test]
fn test_same_seed_same_path() {
    let mut bm1 = BrownianPath::new(0.0, (8, 3), 42).unwrap();
    let mut bm2 = BrownianPath::new(0.0, (8, 3), 42).unwrap();

    let times = [0.5, 1.0, 2.5, 1.75, 4.0];
    for &t in &times {
        assert_eq!(bm1.value(t).unwrap(), bm2.value(t).unwrap());
    }
}

#[test]
fn test_different_seeds_differ() {
    let mut bm1 = BrownianPath::new(0.0, (8, 3), 42).unwrap();
    let mut bm2 = BrownianPath::new(0.0, (8, 3), 43).unwrap();

    assert_ne!(bm1.value(1.0).unwrap(), bm2.value(1.0).unwrap());
}

#[test]
fn test_refinement_is_consistent() {
    let mut bm = BrownianPath::new(0.0, (16, 2), 7).unwrap();

    // Coarse increment first, then its dyadic refinement.
    let coarse = bm.increment(0.0, 1.0).unwrap();
    let fine_times = [0.0, 0.25, 0.5, 0.75, 1.0];
    let mut summed = bm.increment(fine_times[0], fine_times[1]).unwrap();
    for pair in fine_times[1..].windows(2) {
        summed = summed + bm.increment(pair[0], pair[1]).unwrap();
    }

    for (a, b) in coarse.iter().zip(summed.iter()) {
        assert!(
            (a - b).abs() < 1e-12,
            "refined increments do not sum to the coarse increment: {} vs {}",
            a,
            b
        );
    }
}

#[test]
fn test_increment_variance_scales_with_interval() {
    // One long batch column gives enough samples for a crude variance check.
    let mut bm = BrownianPath::new(0.0, (20000, 1), 11).unwrap();
    let dw = bm.increment(0.0, 2.0).unwrap();

    let n = dw.len() as f64;
    let mean = dw.iter().sum::<f64>() / n;
    let variance = dw.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    assert!(mean.abs() < 0.05, "increment mean too far from 0: {}", mean);
    assert!(
        (variance - 2.0).abs() < 0.1,
        "increment variance should be close to the interval length 2, got {}",
        variance
    );
}

#[test]
fn test_query_before_origin_is_error() {
    let mut bm = BrownianPath::new(1.0, (2, 2), 3).unwrap();
    assert!(bm.value(0.0).is_err());
    assert!(bm.increment(0.0, 2.0).is_err());
}

#[test]
fn test_zero_length_increment_is_zero() {
    let mut bm = BrownianPath::new(0.0, (4, 2), 3).unwrap();
    let dw = bm.increment(1.5, 1.5).unwrap();
    assert!(dw.iter().all(|&v| v == 0.0));
}
