//! Generate a sample occupancy workbook with realistically dirty data:
//! quoted values, decimal commas, unparseable heights, unrecognized
//! statuses and a placeholder column.
//!
//! Usage: `cargo run --bin generate_sample [path]`

use std::error::Error;

use rust_xlsxwriter::Workbook;

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

    /// Uniform float in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_data/warehouse.xlsx".to_string());

    let mut rng = SimpleRng::new(20260806);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    // Header with the quirks the loader has to survive: stray whitespace
    // and a placeholder column.
    sheet.write_string(0, 0, "Posição")?;
    sheet.write_string(0, 1, " Altura ")?;
    sheet.write_string(0, 2, "Estado Contentor")?;
    sheet.write_string(0, 3, "Contentor")?;
    sheet.write_string(0, 4, "Unnamed: 4")?;

    let n_rows = 400u32;
    for i in 0..n_rows {
        let row = i + 1;
        let aisle = (b'A' + (rng.index(6)) as u8) as char;
        sheet.write_string(row, 0, format!("{aisle}{:02}-{:02}", rng.index(40), rng.index(4)))?;

        // Heights: both rack sizes, in the formats real exports contain.
        let tall = rng.uniform() < 0.5;
        match rng.index(5) {
            0 => {
                sheet.write_number(row, 1, if tall { 1.5 } else { 0.75 })?;
            }
            1 => {
                sheet.write_string(row, 1, if tall { "1,50" } else { "0,75" })?;
            }
            2 => {
                sheet.write_string(row, 1, if tall { "\"1,50\"" } else { "\"0,75\"" })?;
            }
            3 => {
                sheet.write_string(row, 1, if tall { " 1.50 " } else { " 0.75 " })?;
            }
            _ => {
                if rng.uniform() < 0.05 {
                    // Occasional junk the loader must drop.
                    sheet.write_string(row, 1, "n/a")?;
                } else {
                    sheet.write_string(row, 1, if tall { "1.50" } else { "0.75" })?;
                }
            }
        }

        let status = match rng.uniform() {
            u if u < 0.70 => "Armazenado",
            u if u < 0.85 => "Fora do Armazém",
            u if u < 0.95 => "Em Trânsito",
            _ => "Lost and Found",
        };
        if rng.uniform() < 0.2 {
            sheet.write_string(row, 2, format!(" \"{status}\" "))?;
        } else {
            sheet.write_string(row, 2, status)?;
        }

        sheet.write_string(row, 3, format!("CT{:06}", rng.next_u64() % 1_000_000))?;
        sheet.write_string(row, 4, "-")?;
    }

    if let Some(parent) = std::path::Path::new(&path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    workbook.save(&path)?;

    println!("Wrote {n_rows} rows to {path}");
    Ok(())
}
