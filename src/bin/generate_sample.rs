use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One row in the column layout the explorer reads.
#[derive(Debug, Serialize)]
struct SampleRow {
    id: i64,
    ident: String,
    #[serde(rename = "type")]
    kind: String,
    name: String,
    latitude_deg: f64,
    longitude_deg: f64,
    elevation_ft: Option<f64>,
    iso_region: String,
    municipality: String,
    scheduled_service: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (code, lat range, lon range, typical elevation ft, towns)
type RegionProfile = (&'static str, (f64, f64), (f64, f64), f64, &'static [&'static str]);

const REGIONS: [RegionProfile; 7] = [
    ("US-CT", (41.0, 42.0), (-73.7, -71.8), 300.0, &["Hartford", "New Haven", "Danbury"]),
    ("US-ME", (43.1, 47.4), (-71.0, -67.0), 400.0, &["Portland", "Bangor", "Presque Isle"]),
    ("US-MA", (41.3, 42.8), (-73.5, -69.9), 150.0, &["Boston", "Worcester", "Pittsfield"]),
    ("US-NH", (42.7, 45.3), (-72.5, -70.7), 900.0, &["Manchester", "Lebanon", "Berlin"]),
    ("US-RI", (41.2, 42.0), (-71.8, -71.1), 80.0, &["Providence", "Westerly", "Newport"]),
    ("US-VT", (42.7, 45.0), (-73.4, -71.5), 1100.0, &["Burlington", "Rutland", "Barre"]),
    // Outside New England: dropped by the loader.
    ("US-NY", (40.5, 45.0), (-79.7, -72.0), 500.0, &["Albany", "Buffalo", "Ithaca"]),
];

const TYPES: [&str; 8] = [
    "small_airport",
    "small_airport",
    "small_airport",
    "small_airport",
    "medium_airport",
    "large_airport",
    // Not a recognized size category: dropped by the loader.
    "heliport",
    "seaplane_base",
];

fn generate_rows(rng: &mut SimpleRng, per_region: usize) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    let mut id: i64 = 1;

    for &(code, (lat_lo, lat_hi), (lon_lo, lon_hi), typical_elev, towns) in &REGIONS {
        for n in 0..per_region {
            let kind = rng.pick(&TYPES);
            let scheduled = match kind {
                "large_airport" => "yes",
                "medium_airport" if rng.next_f64() < 0.6 => "yes",
                _ => "no",
            };

            // A few rows carry the invalid values real extracts contain:
            // blanks, zeros and negative elevations.
            let roll = rng.next_f64();
            let elevation_ft = if roll < 0.04 {
                None
            } else if roll < 0.07 {
                Some(0.0)
            } else if roll < 0.09 {
                Some(-rng.uniform(1.0, 20.0).round())
            } else {
                Some(rng.uniform(5.0, typical_elev * 2.4).round())
            };

            rows.push(SampleRow {
                id,
                ident: format!("{}{:02}", &code[3..], n),
                kind: kind.to_string(),
                name: format!("{} Field {n}", rng.pick(towns)),
                latitude_deg: rng.uniform(lat_lo, lat_hi),
                longitude_deg: rng.uniform(lon_lo, lon_hi),
                elevation_ft,
                iso_region: code.to_string(),
                municipality: rng.pick(towns).to_string(),
                scheduled_service: scheduled.to_string(),
            });
            id += 1;
        }
    }
    rows
}

fn write_csv(rows: &[SampleRow], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    for row in rows {
        writer.serialize(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(rows: &[SampleRow], path: &str) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("ident", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("latitude_deg", DataType::Float64, false),
        Field::new("longitude_deg", DataType::Float64, false),
        Field::new("elevation_ft", DataType::Float64, true),
        Field::new("iso_region", DataType::Utf8, false),
        Field::new("municipality", DataType::Utf8, false),
        Field::new("scheduled_service", DataType::Utf8, false),
    ]));

    let strings = |f: fn(&SampleRow) -> &str| -> StringArray {
        StringArray::from(rows.iter().map(f).collect::<Vec<_>>())
    };

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(rows.iter().map(|r| r.id).collect::<Vec<_>>())),
            Arc::new(strings(|r| &r.ident)),
            Arc::new(strings(|r| &r.kind)),
            Arc::new(strings(|r| &r.name)),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.latitude_deg).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.longitude_deg).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.elevation_ft).collect::<Vec<_>>(),
            )),
            Arc::new(strings(|r| &r.iso_region)),
            Arc::new(strings(|r| &r.municipality)),
            Arc::new(strings(|r| &r.scheduled_service)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng, 60);

    let csv_path = "new_england_airports.csv";
    let parquet_path = "new_england_airports.parquet";
    write_csv(&rows, csv_path);
    write_parquet(&rows, parquet_path);

    println!("Wrote {} airports to {csv_path} and {parquet_path}", rows.len());
}
