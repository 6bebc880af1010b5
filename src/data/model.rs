use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Region – one of the six New England states
// ---------------------------------------------------------------------------

/// A recognized New England state. Rows whose ISO region code is not one of
/// these never survive loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Connecticut,
    Maine,
    Massachusetts,
    NewHampshire,
    RhodeIsland,
    Vermont,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Connecticut,
        Region::Maine,
        Region::Massachusetts,
        Region::NewHampshire,
        Region::RhodeIsland,
        Region::Vermont,
    ];

    /// Map an ISO 3166-2 code (`US-CT`, …) to its state.
    pub fn from_code(code: &str) -> Option<Region> {
        match code.trim() {
            "US-CT" => Some(Region::Connecticut),
            "US-ME" => Some(Region::Maine),
            "US-MA" => Some(Region::Massachusetts),
            "US-NH" => Some(Region::NewHampshire),
            "US-RI" => Some(Region::RhodeIsland),
            "US-VT" => Some(Region::Vermont),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Region::Connecticut => "US-CT",
            Region::Maine => "US-ME",
            Region::Massachusetts => "US-MA",
            Region::NewHampshire => "US-NH",
            Region::RhodeIsland => "US-RI",
            Region::Vermont => "US-VT",
        }
    }

    /// Human-readable state name shown everywhere in the UI.
    pub fn name(self) -> &'static str {
        match self {
            Region::Connecticut => "Connecticut",
            Region::Maine => "Maine",
            Region::Massachusetts => "Massachusetts",
            Region::NewHampshire => "New Hampshire",
            Region::RhodeIsland => "Rhode Island",
            Region::Vermont => "Vermont",
        }
    }

    /// Position in [`Region::ALL`]; used as the x coordinate of categorical charts.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Category – airport size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Small,
    Medium,
    Large,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Small, Category::Medium, Category::Large];

    /// Accepts the dataset labels (`small_airport`) as well as the short form.
    pub fn from_label(label: &str) -> Option<Category> {
        match label.trim() {
            "small_airport" | "small" => Some(Category::Small),
            "medium_airport" | "medium" => Some(Category::Medium),
            "large_airport" | "large" => Some(Category::Large),
            _ => None,
        }
    }

    /// Label as written in the source dataset.
    pub fn label(self) -> &'static str {
        match self {
            Category::Small => "small_airport",
            Category::Medium => "medium_airport",
            Category::Large => "large_airport",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Small => "small",
            Category::Medium => "medium",
            Category::Large => "large",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// ServiceFlag – scheduled commercial service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServiceFlag {
    Yes,
    No,
}

impl ServiceFlag {
    pub const ALL: [ServiceFlag; 2] = [ServiceFlag::Yes, ServiceFlag::No];

    pub fn parse(s: &str) -> Option<ServiceFlag> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(ServiceFlag::Yes),
            "no" => Some(ServiceFlag::No),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceFlag::Yes => "yes",
            ServiceFlag::No => "no",
        }
    }
}

impl fmt::Display for ServiceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AirportRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single airport that passed the region and category allowlists.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportRecord {
    pub id: i64,
    /// Short identifier (ICAO/FAA code), empty when the source has none.
    pub ident: String,
    pub name: String,
    pub region: Region,
    pub category: Category,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub municipality: Option<String>,
    pub scheduled_service: ServiceFlag,
    /// `None` marks a missing elevation; present values are always > 0.
    pub elevation_ft: Option<f64>,
}

/// Keep an elevation only when it is strictly positive. NaN is treated as missing.
pub fn normalize_elevation(raw: Option<f64>) -> Option<f64> {
    raw.filter(|e| *e > 0.0)
}

/// Ascending elevation, missing values after every present one.
pub fn cmp_elevation(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// AirportTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    records: Vec<AirportRecord>,
}

impl AirportTable {
    /// Build a table from already-normalized records, sorting them by
    /// elevation. The sort is stable so ties keep their file order.
    pub fn from_records(mut records: Vec<AirportRecord>) -> Self {
        records.sort_by(|a, b| cmp_elevation(a.elevation_ft, b.elevation_ft));
        AirportTable { records }
    }

    pub fn records(&self) -> &[AirportRecord] {
        &self.records
    }

    /// Number of airports.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn airport(id: i64, region: Region, category: Category, elevation: Option<f64>) -> AirportRecord {
        AirportRecord {
            id,
            ident: format!("K{id:03}"),
            name: format!("Airport {id}"),
            region,
            category,
            latitude_deg: 42.0,
            longitude_deg: -71.0,
            municipality: Some("Town".to_string()),
            scheduled_service: ServiceFlag::No,
            elevation_ft: elevation,
        }
    }

    #[test]
    fn test_region_mapping_round_trips_all_codes() {
        for region in Region::ALL {
            assert_eq!(Region::from_code(region.code()), Some(region));
        }
        assert_eq!(Region::from_code("US-NY"), None);
        assert_eq!(Region::NewHampshire.to_string(), "New Hampshire");
        assert_eq!(Region::from_code("US-RI").map(Region::name), Some("Rhode Island"));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::from_label("large_airport"), Some(Category::Large));
        assert_eq!(Category::from_label("medium"), Some(Category::Medium));
        assert_eq!(Category::from_label("heliport"), None);
        assert_eq!(Category::from_label("closed"), None);
        assert_eq!(Category::Small.to_string(), "small");
    }

    #[test]
    fn test_service_flag_parse() {
        assert_eq!(ServiceFlag::parse("yes"), Some(ServiceFlag::Yes));
        assert_eq!(ServiceFlag::parse(" NO "), Some(ServiceFlag::No));
        assert_eq!(ServiceFlag::parse(""), None);
    }

    #[test]
    fn test_normalize_elevation() {
        assert_eq!(normalize_elevation(Some(12.0)), Some(12.0));
        assert_eq!(normalize_elevation(Some(0.0)), None);
        assert_eq!(normalize_elevation(Some(-5.0)), None);
        assert_eq!(normalize_elevation(Some(f64::NAN)), None);
        assert_eq!(normalize_elevation(None), None);
    }

    #[test]
    fn test_table_sorted_with_missing_last() {
        let table = AirportTable::from_records(vec![
            airport(1, Region::Maine, Category::Small, None),
            airport(2, Region::Maine, Category::Small, Some(900.0)),
            airport(3, Region::Maine, Category::Small, Some(15.0)),
            airport(4, Region::Maine, Category::Small, None),
            airport(5, Region::Maine, Category::Small, Some(15.0)),
        ]);
        let ids: Vec<i64> = table.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 5, 2, 1, 4]);
    }
}
