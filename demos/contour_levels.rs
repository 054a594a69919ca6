//! Show how each level strategy picks contour values for the textbook mountain,
//! and how many marching-squares segments each level produces.
//!
//! Run: cargo run --example contour_levels

use relief::contour::{contour, Levels};
use relief::gallery::EXPLICIT_LEVELS;
use relief::{AxisSamples, Grid2, Indexing, Mountain};

fn main() -> relief::Result<()> {
    let grid = Grid2::square(AxisSamples::new(-10.0, 10.0, 21)?, Indexing::Ij);

    for m in [Mountain::TEXTBOOK, Mountain::SCALED] {
        let h = m.sample(&grid);
        println!("=== h0 = {} ===", m.peak());
        for (label, levels) in [
            ("auto", Levels::Auto),
            ("10 levels", Levels::Count(10)),
            ("explicit", Levels::Explicit(EXPLICIT_LEVELS.to_vec())),
        ] {
            let set = contour(&grid, &h, &levels)?;
            println!("{label}:");
            for line in &set.lines {
                println!("  {:>8}  {:4} segments", line.label(), line.segments.len());
            }
        }
        println!();
    }
    Ok(())
}
