//! Draw a few regions around Lusaka, scatter voters, and print who falls where.
//!
//! Usage:
//!   cargo run -p votermap --example select_demo -- [count]
//!
//! Also prints the persisted JSON for the drawn shapes.

use nalgebra::Vector2;
use votermap::prelude::*;

fn main() {
    let count: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1_000);
    let center = LatLng::new(-15.4167, 28.2833);
    let tok = ReplayToken { seed: 2025, index: 0 };

    let mut shapes = Vec::new();
    match draw_ring_radial(center, RadialCfg::default(), tok) {
        Ok(ring) => shapes.push(Shape::Polygon(ring)),
        Err(e) => eprintln!("ring: {e}"),
    }
    let corners = (LatLng::new(-15.45, 28.25), LatLng::new(-15.42, 28.30));
    match Shape::rectangle_from_corners(corners.0, corners.1) {
        Ok(r) => shapes.push(r),
        Err(e) => eprintln!("rectangle: {e}"),
    }
    match Shape::circle(LatLng::new(-15.39, 28.32), 2_500.0) {
        Ok(c) => shapes.push(c),
        Err(e) => eprintln!("circle: {e}"),
    }

    let area = BBox {
        min: center.to_vec2() - Vector2::new(0.1, 0.1),
        max: center.to_vec2() + Vector2::new(0.1, 0.1),
    };
    let voters = scatter_candidates(area, count, tok.next());
    let cfg = SelectCfg::default();
    for (shape, ids) in shapes.iter().zip(select_each(&shapes, &voters, cfg)) {
        println!("{:<9} {:>6} voters", shape.kind(), ids.len());
    }
    println!(
        "{:<9} {:>6} voters",
        "any",
        select_in_any(&shapes, &voters, cfg).len()
    );
    match serialize(&shapes) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("serialize: {e}"),
    }
}
