use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

const ROWS: usize = 600;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = SimpleRng::new(42);

    let regions = ["Centro", "Norte", "Sur", "Costa", "Oriente"];
    let categories = ["Hogar", "Tecnologia", "Moda", "Deportes", "Belleza"];
    let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or("invalid start date")?;

    let mut order_id = Vec::with_capacity(ROWS);
    let mut region = Vec::with_capacity(ROWS);
    let mut category = Vec::with_capacity(ROWS);
    let mut timestamp = Vec::with_capacity(ROWS);
    let mut price = Vec::with_capacity(ROWS);
    let mut ticket = Vec::with_capacity(ROWS);

    for i in 0..ROWS {
        order_id.push(i as i64 + 1);
        region.push(rng.pick(&regions).to_string());
        category.push(rng.pick(&categories).to_string());

        let day = rng.below(365);

        // A few rows carry junk dates so the coercion path gets exercised.
        if i % 97 == 13 {
            timestamp.push(Some("sin fecha".to_string()));
        } else if i % 131 == 7 {
            timestamp.push(None);
        } else {
            let offset = chrono::Duration::days(day as i64)
                + chrono::Duration::minutes(rng.below(24 * 60) as i64);
            timestamp.push(Some((start + offset).format("%Y-%m-%d %H:%M:%S").to_string()));
        }

        // Seasonal bump in November and December.
        let base = 20.0 + rng.next_f64() * 480.0;
        let total = if day >= 304 { base * 1.5 } else { base };
        let items = 1 + rng.below(4);
        price.push((total * 100.0).round() / 100.0);
        ticket.push(((total / items as f64) * 100.0).round() / 100.0);
    }

    // Headers are written the way spreadsheets tend to have them; the
    // dashboard normalizes them on load.
    let schema = Arc::new(Schema::new(vec![
        Field::new("Pedido Id", DataType::Int64, false),
        Field::new(" Region ", DataType::Utf8, false),
        Field::new("Categoria Simplificada", DataType::Utf8, false),
        Field::new("Orden Compra Timestamp", DataType::Utf8, true),
        Field::new("Precio Final", DataType::Float64, false),
        Field::new("Ticket Promedio", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(order_id)),
            Arc::new(StringArray::from(region)),
            Arc::new(StringArray::from(category)),
            Arc::new(StringArray::from(timestamp)),
            Arc::new(Float64Array::from(price)),
            Arc::new(Float64Array::from(ticket)),
        ],
    )?;

    let output_path = "sample_sales.parquet";
    let file = std::fs::File::create(output_path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("{}", pretty_format_batches(&[batch.slice(0, 5)])?);
    println!("Wrote {ROWS} orders to {output_path}");
    Ok(())
}
