//! Shape-based selection of candidate points.
//!
//! `select_contained` returns the ids of all candidates whose coordinate lies
//! inside a shape. For polygonal shapes a closed bounding box rejects far-away
//! candidates before the O(vertices) ring test; the box is a superset of the
//! ring, so the pre-filter never changes the result.
//!
//! Results are de-duplicated and keep first-seen candidate order. As a set they
//! depend only on the shape and the candidates, not on candidate order.

use std::collections::HashSet;
use std::hash::Hash;

use crate::geo::{GeoCfg, LatLng};
use crate::shape::Shape;

/// Externally identified point, e.g. a voter location.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<Id> {
    pub id: Id,
    pub at: LatLng,
}

impl<Id> Candidate<Id> {
    #[inline]
    pub fn new(id: Id, at: LatLng) -> Self {
        Self { id, at }
    }
}

/// Ids of candidates contained in a shape; no duplicates.
pub type SelectionResult<Id> = Vec<Id>;

/// Selection configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectCfg {
    pub geo: GeoCfg,
    /// Reject candidates outside the ring's bounding box before the precise test.
    pub bbox_prefilter: bool,
}

impl Default for SelectCfg {
    fn default() -> Self {
        Self {
            geo: GeoCfg::default(),
            bbox_prefilter: true,
        }
    }
}

/// Select with `SelectCfg::default()`.
pub fn select_contained<Id>(shape: &Shape, candidates: &[Candidate<Id>]) -> SelectionResult<Id>
where
    Id: Clone + Eq + Hash,
{
    select_contained_with(shape, candidates, SelectCfg::default())
}

pub fn select_contained_with<Id>(
    shape: &Shape,
    candidates: &[Candidate<Id>],
    cfg: SelectCfg,
) -> SelectionResult<Id>
where
    Id: Clone + Eq + Hash,
{
    let selected = match shape {
        Shape::Circle(circle) => collect_ids(candidates, |p| circle.contains(p, &cfg.geo)),
        Shape::Polygon(ring) | Shape::Rectangle(ring) => {
            let bbox = ring.bbox();
            let prefilter = cfg.bbox_prefilter;
            collect_ids(candidates, |p| {
                (!prefilter || bbox.contains(p)) && ring.contains(p)
            })
        }
    };
    tracing::debug!(
        kind = %shape.kind(),
        candidates = candidates.len(),
        selected = selected.len(),
        "select_contained"
    );
    selected
}

/// One selection per shape, in shape order.
pub fn select_each<Id>(
    shapes: &[Shape],
    candidates: &[Candidate<Id>],
    cfg: SelectCfg,
) -> Vec<SelectionResult<Id>>
where
    Id: Clone + Eq + Hash,
{
    shapes
        .iter()
        .map(|s| select_contained_with(s, candidates, cfg))
        .collect()
}

/// Ids contained in at least one shape; first-seen candidate order.
pub fn select_in_any<Id>(
    shapes: &[Shape],
    candidates: &[Candidate<Id>],
    cfg: SelectCfg,
) -> SelectionResult<Id>
where
    Id: Clone + Eq + Hash,
{
    // Per-shape passes keep the bbox pre-filter; membership is merged afterwards.
    let hits: HashSet<Id> = select_each(shapes, candidates, cfg)
        .into_iter()
        .flatten()
        .collect();
    collect_ids(candidates, |_| true)
        .into_iter()
        .filter(|id| hits.contains(id))
        .collect()
}

fn collect_ids<Id, F>(candidates: &[Candidate<Id>], mut keep: F) -> SelectionResult<Id>
where
    Id: Clone + Eq + Hash,
    F: FnMut(LatLng) -> bool,
{
    let mut seen: HashSet<&Id> = HashSet::new();
    let mut out = Vec::new();
    for c in candidates {
        if keep(c.at) && seen.insert(&c.id) {
            out.push(c.id.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::rand::{draw_ring_radial, scatter_candidates, RadialCfg, ReplayToken};
    use crate::geo::{haversine_m, Ring, EARTH_RADIUS_M};
    use proptest::prelude::*;
    use rand::seq::SliceRandom;
    use rand::{rngs::StdRng, SeedableRng};

    fn ll(lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng)
    }

    fn square10() -> Shape {
        Shape::polygon(vec![ll(0.0, 0.0), ll(0.0, 10.0), ll(10.0, 10.0), ll(10.0, 0.0)]).unwrap()
    }

    fn as_set<Id: Eq + Hash>(ids: Vec<Id>) -> HashSet<Id> {
        ids.into_iter().collect()
    }

    #[test]
    fn polygon_selects_inside_ids() {
        let cands = vec![
            Candidate::new("in", ll(5.0, 5.0)),
            Candidate::new("out", ll(15.0, 15.0)),
            Candidate::new("edge-box", ll(10.0, 11.0)),
            Candidate::new("in2", ll(1.0, 9.0)),
        ];
        assert_eq!(select_contained(&square10(), &cands), vec!["in", "in2"]);
    }

    #[test]
    fn rectangle_matches_polygon() {
        let cands = scatter_candidates(
            square10().bounds(&GeoCfg::default()),
            300,
            ReplayToken { seed: 5, index: 0 },
        );
        let rect = Shape::rectangle_from_corners(ll(0.0, 0.0), ll(10.0, 10.0)).unwrap();
        assert_eq!(
            as_set(select_contained(&rect, &cands)),
            as_set(select_contained(&square10(), &cands))
        );
    }

    #[test]
    fn circle_selects_by_distance() {
        let north = |m: f64| ll((m / EARTH_RADIUS_M).to_degrees(), 0.0);
        let cands = vec![
            Candidate::new(1u32, north(500.0)),
            Candidate::new(2, north(1500.0)),
            Candidate::new(3, ll(0.0, 0.0)),
            Candidate::new(4, north(999.0)),
        ];
        let c = Shape::circle(ll(0.0, 0.0), 1000.0).unwrap();
        assert_eq!(select_contained(&c, &cands), vec![1, 3, 4]);
    }

    #[test]
    fn circle_boundary_at_exactly_the_radius_is_selected() {
        let cfg = GeoCfg::default();
        let center = ll(0.0, 0.0);
        let dist = |lat: f64| haversine_m(center, ll(lat, 0.0), &cfg);
        // Walk to the farthest f64 latitude still at most 1000 m out.
        let step_up = |lat: f64| f64::from_bits(lat.to_bits() + 1);
        let mut lat = (1000.0 / EARTH_RADIUS_M).to_degrees();
        while dist(lat) > 1000.0 {
            lat = f64::from_bits(lat.to_bits() - 1);
        }
        while dist(step_up(lat)) <= 1000.0 {
            lat = step_up(lat);
        }
        let cands = vec![
            Candidate::new("edge", ll(lat, 0.0)),
            Candidate::new("past", ll(step_up(lat), 0.0)),
        ];
        let c = Shape::circle(center, 1000.0).unwrap();
        assert!((dist(lat) - 1000.0).abs() < 1e-6);
        assert_eq!(select_contained(&c, &cands), vec!["edge"]);
    }

    #[test]
    fn duplicates_are_reported_once() {
        let cands = vec![
            Candidate::new("a", ll(5.0, 5.0)),
            Candidate::new("a", ll(6.0, 6.0)),
            Candidate::new("b", ll(50.0, 50.0)),
            Candidate::new("b", ll(2.0, 2.0)),
        ];
        assert_eq!(select_contained(&square10(), &cands), vec!["a", "b"]);
    }

    #[test]
    fn empty_inputs() {
        let none: Vec<Candidate<u64>> = Vec::new();
        assert!(select_contained(&square10(), &none).is_empty());
        assert!(select_each(&[], &none, SelectCfg::default()).is_empty());
        assert!(select_in_any(&[], &none, SelectCfg::default()).is_empty());
    }

    #[test]
    fn each_and_any() {
        let cfg = SelectCfg::default();
        let shapes = vec![
            square10(),
            Shape::rectangle_from_corners(ll(8.0, 8.0), ll(20.0, 20.0)).unwrap(),
        ];
        let cands = vec![
            Candidate::new(1u64, ll(15.0, 15.0)),
            Candidate::new(2, ll(9.0, 9.0)),
            Candidate::new(3, ll(1.0, 1.0)),
            Candidate::new(4, ll(-5.0, -5.0)),
        ];
        let each = select_each(&shapes, &cands, cfg);
        assert_eq!(each, vec![vec![2, 3], vec![1, 2]]);
        assert_eq!(select_in_any(&shapes, &cands, cfg), vec![1, 2, 3]);
    }

    #[test]
    fn seeded_prefilter_agrees_with_bruteforce() {
        let center = ll(-13.1339, 27.8493);
        let mut tok = ReplayToken { seed: 11, index: 0 };
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let ring = draw_ring_radial(center, RadialCfg::default(), tok).unwrap();
            let shape = Shape::Polygon(ring);
            let mut area = shape.bounds(&GeoCfg::default());
            area.min -= nalgebra::Vector2::new(0.02, 0.02);
            area.max += nalgebra::Vector2::new(0.02, 0.02);
            let mut cands = scatter_candidates(area, 500, tok.next());
            let fast = select_contained(&shape, &cands);
            let brute = select_contained_with(
                &shape,
                &cands,
                SelectCfg {
                    bbox_prefilter: false,
                    ..SelectCfg::default()
                },
            );
            assert_eq!(fast, brute);
            assert!(!fast.is_empty());
            cands.shuffle(&mut rng);
            assert_eq!(as_set(select_contained(&shape, &cands)), as_set(fast));
            tok = tok.next().next();
        }
    }

    fn arb_ring() -> impl Strategy<Value = Ring> {
        prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 3..12).prop_map(|pts| {
            Ring::new(pts.into_iter().map(LatLng::from).collect()).unwrap()
        })
    }

    fn arb_candidates() -> impl Strategy<Value = Vec<Candidate<usize>>> {
        prop::collection::vec((-12.0f64..12.0, -12.0f64..12.0), 0..200).prop_map(|pts| {
            pts.into_iter()
                .enumerate()
                .map(|(i, p)| Candidate::new(i, LatLng::from(p)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prefilter_never_drops_a_hit(ring in arb_ring(), cands in arb_candidates()) {
            let shape = Shape::Polygon(ring);
            let fast = select_contained(&shape, &cands);
            let brute = select_contained_with(
                &shape,
                &cands,
                SelectCfg { bbox_prefilter: false, ..SelectCfg::default() },
            );
            prop_assert_eq!(fast, brute);
        }

        #[test]
        fn selection_is_order_independent(
            ring in arb_ring(),
            cands in arb_candidates(),
            seed in any::<u64>(),
            radius in 0.0f64..800_000.0,
        ) {
            let mut shuffled = cands.clone();
            shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
            let center = ring.vertices()[0];
            for shape in [Shape::Polygon(ring.clone()), Shape::circle(center, radius).unwrap()] {
                let a = as_set(select_contained(&shape, &cands));
                let b = as_set(select_contained(&shape, &shuffled));
                prop_assert_eq!(a, b);
            }
        }
    }
}
