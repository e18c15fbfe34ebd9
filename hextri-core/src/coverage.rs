//! Coverage engine
//!
//! Every numbered cell projects a ring at distance `ceil(n / 2)`. A cell's
//! coverage set is the set of sources whose ring passes through it; cells
//! whose set meets the [`Threshold`] are intersections.

use crate::grid::{cells_at_distance, GridPos};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Smallest number that contributes coverage
pub const MIN_NUMBER: u8 = 1;

/// Largest number that contributes coverage
pub const MAX_NUMBER: u8 = 12;

/// Default number of sources that make an intersection
pub const DEFAULT_THRESHOLD: usize = 3;

/// Ring radius for a placed number: `ceil(n / 2)`, only for 1..=12
pub fn range_of(number: u8) -> Option<u16> {
    if (MIN_NUMBER..=MAX_NUMBER).contains(&number) {
        Some(u16::from(number).div_ceil(2))
    } else {
        None
    }
}

/// Rule for how many sources make an intersection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "sources")]
pub enum Threshold {
    /// Covered by `n` or more sources
    AtLeast(usize),
    /// Covered by exactly `n` sources (the older strict behaviour)
    Exactly(usize),
}

impl Threshold {
    /// Strict exact-three mode
    pub const fn exact() -> Self {
        Threshold::Exactly(DEFAULT_THRESHOLD)
    }

    pub fn is_met(&self, count: usize) -> bool {
        match *self {
            Threshold::AtLeast(n) => count >= n,
            Threshold::Exactly(n) => count == n,
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::AtLeast(DEFAULT_THRESHOLD)
    }
}

/// Intersection cells with their contributing sources
pub type Intersections = BTreeMap<GridPos, BTreeSet<GridPos>>;

/// Cell -> set of sources whose ring reaches it
///
/// Built from scratch on every call to [`CoverageMap::compute`]; ordered by
/// position so two maps over the same numbers compare and serialize equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverageMap {
    covered: BTreeMap<GridPos, BTreeSet<GridPos>>,
}

impl CoverageMap {
    /// Compute coverage for a collection of `(position, number)` pairs.
    ///
    /// Absent and out-of-range numbers are skipped.
    pub fn compute<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (GridPos, Option<u8>)>,
    {
        let mut covered: BTreeMap<GridPos, BTreeSet<GridPos>> = BTreeMap::new();

        for (source, number) in cells {
            let Some(range) = number.and_then(range_of) else {
                continue;
            };
            for target in cells_at_distance(source, range) {
                covered.entry(target).or_default().insert(source);
            }
        }

        Self { covered }
    }

    /// Sources covering `pos`, if any
    pub fn sources(&self, pos: GridPos) -> Option<&BTreeSet<GridPos>> {
        self.covered.get(&pos)
    }

    /// Number of distinct sources covering `pos`
    pub fn count(&self, pos: GridPos) -> usize {
        self.covered.get(&pos).map_or(0, BTreeSet::len)
    }

    pub fn is_intersection(&self, pos: GridPos, threshold: Threshold) -> bool {
        self.covered
            .get(&pos)
            .is_some_and(|sources| threshold.is_met(sources.len()))
    }

    /// Cells meeting `threshold`, with their full source sets
    pub fn intersections(&self, threshold: Threshold) -> Intersections {
        self.covered
            .iter()
            .filter(|(_, sources)| threshold.is_met(sources.len()))
            .map(|(pos, sources)| (*pos, sources.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GridPos, &BTreeSet<GridPos>)> {
        self.covered.iter()
    }

    /// Number of covered cells
    pub fn len(&self) -> usize {
        self.covered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }
}

/// Full coverage for `cells`, restricted to intersections under `threshold`
pub fn compute_intersections<I>(cells: I, threshold: Threshold) -> Intersections
where
    I: IntoIterator<Item = (GridPos, Option<u8>)>,
{
    CoverageMap::compute(cells).intersections(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{all_positions, distance};

    const CENTER: GridPos = GridPos::new(3, 3);
    const CORNER: GridPos = GridPos::new(0, 0);
    const NEAR: GridPos = GridPos::new(2, 3);
    const TARGET: GridPos = GridPos::new(0, 3);

    #[test]
    fn test_range_formula() {
        assert_eq!(range_of(1), Some(1));
        assert_eq!(range_of(2), Some(1));
        assert_eq!(range_of(3), Some(2));
        assert_eq!(range_of(7), Some(4));
        assert_eq!(range_of(12), Some(6));
        for n in 1..=12u8 {
            assert_eq!(range_of(n), Some(u16::from((n + 1) / 2)));
        }
    }

    #[test]
    fn test_range_rejects_out_of_range() {
        assert_eq!(range_of(0), None);
        assert_eq!(range_of(13), None);
        assert_eq!(range_of(u8::MAX), None);
    }

    #[test]
    fn test_empty_input() {
        let map = CoverageMap::compute(all_positions().map(|p| (p, None)));
        assert!(map.is_empty());
        assert!(map.intersections(Threshold::default()).is_empty());
    }

    #[test]
    fn test_malformed_numbers_filtered() {
        let map = CoverageMap::compute([(CENTER, Some(0)), (CORNER, Some(13))]);
        assert!(map.is_empty());
    }

    #[test]
    fn test_self_exclusion() {
        for source in all_positions() {
            for n in 1..=12u8 {
                let map = CoverageMap::compute([(source, Some(n))]);
                assert_eq!(map.count(source), 0, "{} with {}", source, n);
            }
        }
    }

    #[test]
    fn test_single_source_ring() {
        let map = CoverageMap::compute([(CENTER, Some(6))]);
        assert_eq!(map.len(), 18);
        for (pos, sources) in map.iter() {
            assert_eq!(distance(CENTER, *pos), 3);
            assert_eq!(sources.iter().copied().collect::<Vec<_>>(), vec![CENTER]);
        }
        assert!(map.intersections(Threshold::default()).is_empty());
    }

    #[test]
    fn test_two_sources_never_intersect() {
        let map = CoverageMap::compute([(CENTER, Some(6)), (CORNER, Some(5))]);
        assert_eq!(map.count(TARGET), 2);
        assert_eq!(map.count(GridPos::new(3, 0)), 2);
        assert!(!map.is_intersection(TARGET, Threshold::default()));
        assert!(map.intersections(Threshold::default()).is_empty());
    }

    #[test]
    fn test_three_sources_intersect() {
        let map = CoverageMap::compute([
            (CENTER, Some(6)),
            (CORNER, Some(5)),
            (NEAR, Some(4)),
        ]);
        let found = map.intersections(Threshold::default());
        assert_eq!(found.len(), 1);
        let sources: Vec<_> = found[&TARGET].iter().copied().collect();
        assert_eq!(sources, vec![CORNER, NEAR, CENTER]);
    }

    #[test]
    fn test_duplicate_source_collapses() {
        let map = CoverageMap::compute([(CENTER, Some(6)), (CENTER, Some(5))]);
        assert_eq!(map.count(TARGET), 1);
    }

    #[test]
    fn test_order_independent() {
        let cells = vec![
            (CENTER, Some(6)),
            (CORNER, Some(5)),
            (NEAR, Some(4)),
            (GridPos::new(6, 7), Some(11)),
        ];
        let forward = CoverageMap::compute(cells.clone());
        let reversed = CoverageMap::compute(cells.into_iter().rev());
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_threshold_modes() {
        assert!(Threshold::AtLeast(3).is_met(3));
        assert!(Threshold::AtLeast(3).is_met(4));
        assert!(!Threshold::AtLeast(3).is_met(2));
        assert!(Threshold::exact().is_met(3));
        assert!(!Threshold::exact().is_met(4));
    }

    #[test]
    fn test_exact_mode_drops_four_way_cells() {
        // A fourth source at distance 3 from TARGET
        let far = GridPos::new(0, 6);
        assert_eq!(distance(far, TARGET), 3);

        let map = CoverageMap::compute([
            (CENTER, Some(6)),
            (CORNER, Some(5)),
            (NEAR, Some(4)),
            (far, Some(6)),
        ]);
        assert_eq!(map.count(TARGET), 4);
        assert!(map.is_intersection(TARGET, Threshold::default()));
        assert!(!map.is_intersection(TARGET, Threshold::exact()));
    }

    #[test]
    fn test_threshold_serde() {
        let json = serde_json::to_string(&Threshold::default()).unwrap();
        assert_eq!(json, r#"{"mode":"at_least","sources":3}"#);
        let back: Threshold = serde_json::from_str(r#"{"mode":"exactly","sources":3}"#).unwrap();
        assert_eq!(back, Threshold::exact());
    }
}
