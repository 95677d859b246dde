//! Deterministic fixtures shared by unit tests.
//!
//! Noise is drawn from a seeded `StdRng`, the same generator the synthetic
//! sample uses, so every fixture is reproducible from its seed.

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::month_ends;
use crate::domain::{Frequency, TimeSeries};

/// `n` independent standard normal draws.
pub fn normals(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// `x[0] = e[0]`, `x[t] = rho·x[t-1] + e[t]` with standard normal `e`.
pub fn ar1(seed: u64, n: usize, rho: f64) -> Vec<f64> {
    let noise = normals(seed, n);
    let mut out = Vec::with_capacity(n);
    for (t, e) in noise.into_iter().enumerate() {
        let prev = if t == 0 { 0.0 } else { out[t - 1] };
        out.push(rho * prev + e);
    }
    out
}

pub fn random_walk(seed: u64, n: usize) -> Vec<f64> {
    normals(seed, n)
        .into_iter()
        .scan(0.0, |level, e| {
            *level += e;
            Some(*level)
        })
        .collect()
}

pub fn month_index(n: usize) -> Vec<NaiveDate> {
    month_ends(2000, 1, n).unwrap()
}

pub fn monthly(name: &str, values: Vec<f64>) -> TimeSeries {
    TimeSeries::new(name, Frequency::Monthly, month_index(values.len()), values).unwrap()
}
