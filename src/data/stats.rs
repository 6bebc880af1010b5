use std::collections::BTreeMap;

use super::filter::FilteredResult;
use super::model::{Category, Region};

// ---------------------------------------------------------------------------
// Per-region aggregates
// ---------------------------------------------------------------------------

/// Mean elevation per region. Missing elevations are left out of both the sum
/// and the count, so a region whose rows all lack an elevation has no entry.
pub fn mean_elevation_by_region(result: &FilteredResult<'_>) -> BTreeMap<Region, f64> {
    let mut sums: BTreeMap<Region, (f64, usize)> = BTreeMap::new();
    for record in result.iter() {
        if let Some(e) = record.elevation_ft {
            let entry = sums.entry(record.region).or_insert((0.0, 0));
            entry.0 += e;
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(region, (sum, n))| (region, sum / n as f64))
        .collect()
}

/// Row count per region present in the result, missing elevations included.
pub fn count_by_region(result: &FilteredResult<'_>) -> BTreeMap<Region, usize> {
    let mut counts = BTreeMap::new();
    for record in result.iter() {
        *counts.entry(record.region).or_insert(0) += 1;
    }
    counts
}

/// Count and mean side by side for one region, as the radar chart shows them.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    pub region: Region,
    pub count: usize,
    pub mean_elevation: Option<f64>,
}

/// One summary per region present in the result, in [`Region::ALL`] order.
pub fn region_summaries(result: &FilteredResult<'_>) -> Vec<RegionSummary> {
    let means = mean_elevation_by_region(result);
    count_by_region(result)
        .into_iter()
        .map(|(region, count)| RegionSummary {
            region,
            count,
            mean_elevation: means.get(&region).copied(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub small: usize,
    pub medium: usize,
    pub large: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Small => self.small,
            Category::Medium => self.medium,
            Category::Large => self.large,
        }
    }

    pub fn total(&self) -> usize {
        self.small + self.medium + self.large
    }
}

pub fn category_counts(result: &FilteredResult<'_>) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for record in result.iter() {
        match record.category {
            Category::Small => counts.small += 1,
            Category::Medium => counts.medium += 1,
            Category::Large => counts.large += 1,
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Elevation spread (box plot)
// ---------------------------------------------------------------------------

/// Five-number summary of a region's present elevations.
///
/// Quartiles use linear interpolation between closest ranks. Whiskers stop at
/// the most extreme observation within 1.5 × IQR of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationSpread {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Sorted elevations the summary was computed from.
    pub values: Vec<f64>,
}

impl ElevationSpread {
    /// `None` for an empty sample.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let q1 = quantile(&values, 0.25);
        let median = quantile(&values, 0.5);
        let q3 = quantile(&values, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let lower_whisker = values
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(q1);
        let upper_whisker = values
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .unwrap_or(q3);

        Some(ElevationSpread {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            values,
        })
    }
}

/// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

pub fn elevation_spread_by_region(result: &FilteredResult<'_>) -> BTreeMap<Region, ElevationSpread> {
    let mut samples: BTreeMap<Region, Vec<f64>> = BTreeMap::new();
    for record in result.iter() {
        if let Some(e) = record.elevation_ft {
            samples.entry(record.region).or_default().push(e);
        }
    }
    samples
        .into_iter()
        .filter_map(|(region, values)| ElevationSpread::from_values(values).map(|s| (region, s)))
        .collect()
}
