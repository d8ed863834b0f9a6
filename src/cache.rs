//! Explicit memoization for repeat analysis of an unchanged series.
//!
//! Callers tend to re-request analysis of the same history every time a
//! view refreshes. The pipeline is cheap, but it is also deterministic,
//! so an unchanged series can be served from a fingerprint-keyed cache
//! instead of recomputed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use dashmap::DashMap;

use crate::analysis::VitalsAnalyzer;
use crate::models::{AnalysisResult, Vital, VitalReading};

/// A [`VitalsAnalyzer`] fronted by a concurrent result cache.
///
/// Keys are a fingerprint of the full series (timestamps plus the bit
/// patterns of every field), so any change to any reading produces a new
/// entry. Entries are never invalidated individually; callers working
/// with rolling sessions should [`clear`](Self::clear) between sessions
/// or let the map grow with their (small, capped) series space.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    analyzer: VitalsAnalyzer,
    results: DashMap<u64, AnalysisResult>,
}

impl AnalysisCache {
    pub fn new(analyzer: VitalsAnalyzer) -> Self {
        Self {
            analyzer,
            results: DashMap::new(),
        }
    }

    /// Analyzes the series, serving a memoized result when the series
    /// fingerprint has been seen before.
    pub fn analyze(&self, series: &[VitalReading]) -> AnalysisResult {
        let key = series_fingerprint(series);
        if let Some(hit) = self.results.get(&key) {
            return hit.value().clone();
        }
        let result = self.analyzer.analyze(series);
        self.results.insert(key, result.clone());
        result
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&self) {
        self.results.clear();
    }
}

/// Order-sensitive fingerprint of a series.
///
/// Field values hash by bit pattern, so 0.0 and -0.0 differ and any NaN
/// payload is stable; the goal is "same bytes in, same key", not numeric
/// equivalence.
pub fn series_fingerprint(series: &[VitalReading]) -> u64 {
    let mut hasher = DefaultHasher::new();
    series.len().hash(&mut hasher);
    for reading in series {
        reading.recorded_at.timestamp_millis().hash(&mut hasher);
        for vital in Vital::ALL {
            match reading.value(vital) {
                Some(value) => {
                    1u8.hash(&mut hasher);
                    value.to_bits().hash(&mut hasher);
                }
                None => 0u8.hash(&mut hasher),
            }
        }
    }
    hasher.finish()
}
