use std::collections::BTreeSet;

use super::model::{AirportRecord, AirportTable, Category, Region, ServiceFlag};

pub const DEFAULT_ELEVATION_CEILING: f64 = 2000.0;

// ---------------------------------------------------------------------------
// Filter predicate
// ---------------------------------------------------------------------------

/// An immutable selection evaluated against every row. Built fresh from the
/// side-panel controls on each change.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub regions: BTreeSet<Region>,
    /// Inclusive upper bound in feet.
    pub elevation_ceiling: f64,
    pub categories: BTreeSet<Category>,
    pub service_flags: BTreeSet<ServiceFlag>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterControls::default().criteria()
    }
}

impl FilterCriteria {
    /// A row passes when every predicate holds.
    ///
    /// A missing elevation always satisfies the ceiling: the row is unknown,
    /// not too high.
    pub fn matches(&self, record: &AirportRecord) -> bool {
        self.regions.contains(&record.region)
            && record
                .elevation_ft
                .map_or(true, |e| e <= self.elevation_ceiling)
            && self.categories.contains(&record.category)
            && self.service_flags.contains(&record.scheduled_service)
    }
}

// ---------------------------------------------------------------------------
// Widget-facing selection state
// ---------------------------------------------------------------------------

/// What the side panel edits. The commercial toggle is kept as a bool and
/// only expanded into a service-flag set when criteria are built.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterControls {
    pub regions: BTreeSet<Region>,
    pub elevation_ceiling: f64,
    pub categories: BTreeSet<Category>,
    pub commercial_only: bool,
}

impl Default for FilterControls {
    fn default() -> Self {
        Self::with_ceiling(DEFAULT_ELEVATION_CEILING)
    }
}

impl FilterControls {
    /// Everything selected, commercial toggle off, the given ceiling.
    pub fn with_ceiling(elevation_ceiling: f64) -> Self {
        Self {
            regions: Region::ALL.into_iter().collect(),
            elevation_ceiling,
            categories: Category::ALL.into_iter().collect(),
            commercial_only: false,
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        let service_flags = if self.commercial_only {
            BTreeSet::from([ServiceFlag::Yes])
        } else {
            ServiceFlag::ALL.into_iter().collect()
        };
        FilterCriteria {
            regions: self.regions.clone(),
            elevation_ceiling: self.elevation_ceiling,
            categories: self.categories.clone(),
            service_flags,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Borrowed view of the rows that passed a filter, in table order.
#[derive(Debug, Clone)]
pub struct FilteredResult<'a> {
    pub records: Vec<&'a AirportRecord>,
    /// Position of each record in `table.records()`.
    pub indices: Vec<usize>,
    pub count: usize,
}

impl<'a> FilteredResult<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a AirportRecord> + '_ {
        self.records.iter().copied()
    }

    /// Rebuild a view from indices kept by the caller between frames.
    pub fn from_indices(table: &'a AirportTable, indices: &[usize]) -> Self {
        let records: Vec<&AirportRecord> = indices
            .iter()
            .filter_map(|&i| table.records().get(i))
            .collect();
        FilteredResult {
            count: records.len(),
            indices: indices.to_vec(),
            records,
        }
    }
}

/// Return the rows of `table` that satisfy `criteria`, keeping the
/// elevation-ascending order of the table.
pub fn filter<'a>(table: &'a AirportTable, criteria: &FilterCriteria) -> FilteredResult<'a> {
    let (indices, records): (Vec<usize>, Vec<&AirportRecord>) = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .unzip();
    let count = records.len();
    FilteredResult {
        records,
        indices,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::airport;

    fn all_large_at(elevation: f64) -> AirportTable {
        let records = Region::ALL
            .iter()
            .enumerate()
            .map(|(i, &region)| airport(i as i64, region, Category::Large, Some(elevation)))
            .collect();
        AirportTable::from_records(records)
    }

    fn mixed_table() -> AirportTable {
        let mut records = vec![
            airport(1, Region::Maine, Category::Small, Some(50.0)),
            airport(2, Region::Maine, Category::Medium, Some(1500.0)),
            airport(3, Region::Vermont, Category::Small, Some(2500.0)),
            airport(4, Region::Vermont, Category::Large, None),
            airport(5, Region::Connecticut, Category::Large, Some(200.0)),
            airport(6, Region::RhodeIsland, Category::Medium, Some(2000.0)),
        ];
        records[4].scheduled_service = ServiceFlag::Yes;
        records[5].scheduled_service = ServiceFlag::Yes;
        AirportTable::from_records(records)
    }

    fn large_only(ceiling: f64) -> FilterCriteria {
        FilterCriteria {
            elevation_ceiling: ceiling,
            categories: BTreeSet::from([Category::Large]),
            ..FilterCriteria::default()
        }
    }

    #[test]
    fn test_all_regions_under_ceiling() {
        let table = all_large_at(500.0);
        let result = filter(&table, &large_only(2000.0));
        assert_eq!(result.count, 6);
    }

    #[test]
    fn test_ceiling_below_every_row() {
        let table = all_large_at(500.0);
        let result = filter(&table, &large_only(100.0));
        assert_eq!(result.count, 0);
        assert!(result.records.is_empty());
    }

    #[test]
    fn test_missing_elevation_passes_ceiling() {
        let table = mixed_table();
        let criteria = FilterCriteria {
            elevation_ceiling: 0.0,
            ..FilterCriteria::default()
        };
        let ids: Vec<i64> = filter(&table, &criteria).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        let table = mixed_table();
        let result = filter(&table, &FilterCriteria::default());
        assert!(result.iter().any(|r| r.id == 6));
        assert!(result.iter().all(|r| r.id != 3));
    }

    #[test]
    fn test_every_row_satisfies_all_predicates() {
        let table = mixed_table();
        let criteria = FilterCriteria {
            regions: BTreeSet::from([Region::Maine, Region::Vermont, Region::Connecticut]),
            elevation_ceiling: 1600.0,
            categories: BTreeSet::from([Category::Small, Category::Large]),
            service_flags: ServiceFlag::ALL.into_iter().collect(),
        };
        let result = filter(&table, &criteria);
        assert_eq!(result.count, result.records.len());
        for r in result.iter() {
            assert!(criteria.regions.contains(&r.region));
            assert!(r.elevation_ft.map_or(true, |e| e <= criteria.elevation_ceiling));
            assert!(criteria.categories.contains(&r.category));
            assert!(criteria.service_flags.contains(&r.scheduled_service));
        }
        let ids: Vec<i64> = result.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 5, 4]);
    }

    #[test]
    fn test_commercial_only_control() {
        let table = mixed_table();
        let controls = FilterControls {
            commercial_only: true,
            ..FilterControls::default()
        };
        let criteria = controls.criteria();
        assert_eq!(criteria.service_flags, BTreeSet::from([ServiceFlag::Yes]));
        let ids: Vec<i64> = filter(&table, &criteria).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn test_empty_selection_yields_empty_result() {
        let table = mixed_table();
        let criteria = FilterCriteria {
            regions: BTreeSet::new(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter(&table, &criteria).count, 0);
    }

    #[test]
    fn test_widening_never_shrinks_result() {
        let table = mixed_table();
        let narrow = FilterCriteria {
            regions: BTreeSet::from([Region::Maine]),
            elevation_ceiling: 100.0,
            categories: BTreeSet::from([Category::Small]),
            service_flags: BTreeSet::from([ServiceFlag::No]),
        };
        let base = filter(&table, &narrow).count;

        let mut wider = narrow.clone();
        wider.regions = Region::ALL.into_iter().collect();
        assert!(filter(&table, &wider).count >= base);

        let mut wider = narrow.clone();
        wider.elevation_ceiling = 3000.0;
        assert!(filter(&table, &wider).count >= base);

        let mut wider = narrow.clone();
        wider.categories = Category::ALL.into_iter().collect();
        assert!(filter(&table, &wider).count >= base);

        let mut wider = narrow;
        wider.service_flags = ServiceFlag::ALL.into_iter().collect();
        assert!(filter(&table, &wider).count >= base);
    }

    #[test]
    fn test_view_rebuilt_from_indices() {
        let table = mixed_table();
        let result = filter(&table, &FilterCriteria::default());
        let rebuilt = FilteredResult::from_indices(&table, &result.indices);
        let a: Vec<i64> = result.iter().map(|r| r.id).collect();
        let b: Vec<i64> = rebuilt.iter().map(|r| r.id).collect();
        assert_eq!(a, b);
        assert_eq!(rebuilt.count, result.count);
    }
}
