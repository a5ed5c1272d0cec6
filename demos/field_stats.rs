//! # Field Stats
//!
//! Runs the particle field headless and prints how it settles.
//!
//! Run with: `cargo run --example field_stats --release -- [particles] [frames]`

use folio::field::{FieldConfig, ParticleField};
use folio::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut args = std::env::args().skip(1);
    let count: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);
    let frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);

    let bounds = Vec2::new(1280.0, 720.0);
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = ParticleField::with_rng(FieldConfig::default().with_count(count), bounds, &mut rng);

    println!("=== Field Stats ===");
    println!("Particles: {count}");
    println!("Bounds: {}x{}", bounds.x, bounds.y);
    println!();
    println!("{:>6} {:>8} {:>10}", "frame", "links", "max speed");

    // Pointer parked in the middle, as if the visitor stopped moving
    let pointer = bounds * 0.5;
    let mut links = Vec::new();
    for frame in 0..=frames {
        if frame % 60 == 0 {
            field.links_into(&mut links);
            println!("{:>6} {:>8} {:>10.4}", frame, links.len(), field.max_speed());
        }
        field.step(pointer);
    }
}
