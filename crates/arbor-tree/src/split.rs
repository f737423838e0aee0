use rand::Rng;

use crate::dataset::Dataset;
use crate::gain::information_gain;
use crate::labels::LabelIndex;
use crate::node::{FeatureIndex, Gain};

/// Number of interior thresholds tried per attribute.
pub const N_THRESHOLDS: usize = 50;

/// How the attribute for a split is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Scan every attribute and every candidate threshold.
    Optimized,
    /// Draw one attribute uniformly at random and scan its thresholds.
    Randomized,
}

impl SplitStrategy {
    /// Return the lowercase name used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SplitStrategy::Optimized => "optimized",
            SplitStrategy::Randomized => "randomized",
        }
    }
}

/// Best (attribute, threshold, gain) triple found by [`choose_attribute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate {
    /// Attribute to split on.
    pub attribute: FeatureIndex,
    /// Examples with `value < threshold` go left.
    pub threshold: f64,
    /// Information gain of the split.
    pub gain: Gain,
}

/// The `N_THRESHOLDS` evenly spaced values strictly between `min` and `max`.
///
/// `threshold_k = min + k·(max - min)/51` for `k = 1..=50`. When
/// `min == max` every threshold equals `min`.
#[must_use]
pub fn candidate_thresholds(min: f64, max: f64) -> Vec<f64> {
    let steps = (N_THRESHOLDS + 1) as f64;
    (1..=N_THRESHOLDS)
        .map(|k| min + (k as f64) * (max - min) / steps)
        .collect()
}

/// Min and max of `attribute` over `samples`.
fn value_range(dataset: &Dataset, samples: &[usize], attribute: usize) -> (f64, f64) {
    samples.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &si| {
        let v = dataset.value(si, attribute);
        (lo.min(v), hi.max(v))
    })
}

/// Scan the thresholds of one attribute over `[min, max]`, keeping the first
/// strict maximum above `best`.
fn scan_attribute(
    dataset: &Dataset,
    samples: &[usize],
    attribute: usize,
    (min, max): (f64, f64),
    label_index: &LabelIndex,
    best: &mut Option<SplitCandidate>,
    best_gain: &mut f64,
) {
    for threshold in candidate_thresholds(min, max) {
        let gain = information_gain(dataset, samples, attribute, threshold, label_index);
        if gain > *best_gain {
            *best_gain = gain;
            *best = Some(SplitCandidate {
                attribute: FeatureIndex::new(attribute),
                threshold,
                gain: Gain::new(gain),
            });
        }
    }
}

/// Find the split of `samples` with the highest information gain.
///
/// Only attributes that vary over `samples` are considered, since a constant
/// attribute cannot separate anything. [`SplitStrategy::Optimized`] scans
/// every one of them; [`SplitStrategy::Randomized`] draws one uniformly with
/// `rng` and scans only that one. Ties keep the first candidate found.
///
/// Returns `None` when `samples` is empty or no attribute in `attributes`
/// varies over it.
pub fn choose_attribute(
    strategy: SplitStrategy,
    attributes: &[usize],
    dataset: &Dataset,
    samples: &[usize],
    label_index: &LabelIndex,
    rng: &mut impl Rng,
) -> Option<SplitCandidate> {
    if samples.is_empty() {
        return None;
    }

    let varying: Vec<(usize, (f64, f64))> = attributes
        .iter()
        .map(|&a| (a, value_range(dataset, samples, a)))
        .filter(|&(_, (min, max))| min < max)
        .collect();
    if varying.is_empty() {
        return None;
    }

    // Gain is never below zero, so the first threshold always beats this.
    let mut best_gain = -1.0;
    let mut best = None;

    let scanned: &[(usize, (f64, f64))] = match strategy {
        SplitStrategy::Optimized => &varying,
        SplitStrategy::Randomized => {
            let pick = rng.gen_range(0..varying.len());
            &varying[pick..=pick]
        }
    };
    for &(attribute, range) in scanned {
        scan_attribute(dataset, samples, attribute, range, label_index, &mut best, &mut best_gain);
    }

    best
}
