use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct SampleRow {
    site: String,
    payload_mass_kg: f64,
    class: i64,
    booster_category: String,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let sites: [(&str, f64); 4] = [
        ("CCAFS LC-40", 0.73),
        ("CCAFS SLC-40", 0.43),
        ("KSC LC-39A", 0.77),
        ("VAFB SLC-4E", 0.60),
    ];
    // Later booster generations fly heavier payloads and land more often.
    let boosters = [
        ("v1.0", 3000.0, -0.25),
        ("v1.1", 4500.0, -0.10),
        ("FT", 5500.0, 0.05),
        ("B4", 6500.0, 0.10),
        ("B5", 7500.0, 0.15),
    ];

    let mut rows = Vec::new();
    for (site, base_rate) in &sites {
        for (booster, mean_payload, rate_shift) in &boosters {
            for _ in 0..4 {
                let payload = rng
                    .gauss(*mean_payload, 1800.0)
                    .clamp(300.0, 9800.0);
                let success_rate = (base_rate + rate_shift).clamp(0.05, 0.95);
                let class = i64::from(rng.next_f64() < success_rate);

                rows.push(SampleRow {
                    site: (*site).to_string(),
                    payload_mass_kg: (payload * 10.0).round() / 10.0,
                    class,
                    booster_category: (*booster).to_string(),
                });
            }
        }
    }
    rows
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "Payload Mass (kg)",
        "class",
        "Booster Version Category",
    ])?;
    for (i, row) in rows.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            row.site.clone(),
            format!("{}", row.payload_mass_kg),
            row.class.to_string(),
            row.booster_category.clone(),
        ])?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let site_array =
        StringArray::from(rows.iter().map(|r| r.site.as_str()).collect::<Vec<_>>());
    let payload_array =
        Float64Array::from(rows.iter().map(|r| r.payload_mass_kg).collect::<Vec<_>>());
    let class_array = Int64Array::from(rows.iter().map(|r| r.class).collect::<Vec<_>>());
    let booster_array = StringArray::from(
        rows.iter()
            .map(|r| r.booster_category.as_str())
            .collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(site_array),
            Arc::new(payload_array),
            Arc::new(class_array),
            Arc::new(booster_array),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows, "sample_launches.csv")?;
    write_parquet(&rows, "sample_launches.parquet")?;

    println!(
        "Wrote {} launches to sample_launches.csv and sample_launches.parquet",
        rows.len()
    );
    Ok(())
}
