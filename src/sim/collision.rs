//! Collision detection primitives
//!
//! Pure geometric predicates over axis-aligned boxes and circles, plus a
//! uniform-grid index for bounding candidate sets once entity counts grow.
//! Box/box overlap is strict (edge-touching is not a hit); the point test is
//! inclusive because it serves UI hit-testing where edges should count.

use std::collections::HashMap;

use glam::Vec2;

/// Axis-aligned rectangle, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Circle with a center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Open-interval AABB overlap. Boxes that merely share an edge do not collide.
#[inline]
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Strict circle overlap: center distance < sum of radii
#[inline]
pub fn circles_intersect(a: &Circle, b: &Circle) -> bool {
    let r = a.radius + b.radius;
    a.center.distance_squared(b.center) < r * r
}

/// Strict circle/box overlap via the nearest point on the box
#[inline]
pub fn circle_rect_intersect(c: &Circle, r: &Rect) -> bool {
    let nearest = Vec2::new(
        c.center.x.clamp(r.x, r.x + r.w),
        c.center.y.clamp(r.y, r.y + r.h),
    );
    c.center.distance_squared(nearest) < c.radius * c.radius
}

/// Inclusive point-in-box test (all four edges count)
#[inline]
pub fn point_in_rect(p: Vec2, r: &Rect) -> bool {
    p.x >= r.x && p.x <= r.x + r.w && p.y >= r.y && p.y <= r.y + r.h
}

/// Brute-force pairing of two box sets. O(|a|*|b|) - fine for the dozens of
/// entities a run holds, not meant for the per-tick gameplay path.
pub fn find_all_intersections(a: &[Rect], b: &[Rect]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, ra) in a.iter().enumerate() {
        for (j, rb) in b.iter().enumerate() {
            if rects_intersect(ra, rb) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Uniform spatial hash over the play field.
///
/// Entities move every tick, so the grid has no incremental maintenance:
/// clear and rebuild it at the start of each tick, inserting each entity
/// under the cell containing its center.
#[derive(Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "grid cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    #[inline]
    fn cell_key(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// Bucket an entity index under the cell containing `center`
    pub fn insert(&mut self, index: usize, center: Vec2) {
        self.cells.entry(self.cell_key(center)).or_default().push(index);
    }

    /// Union of the 3x3 cell block around a point, deduplicated,
    /// in insertion order within each cell
    pub fn query_neighbors(&self, p: Vec2) -> Vec<usize> {
        let (cx, cy) = self.cell_key(p);
        let mut out = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) {
                    for &idx in bucket {
                        if !out.contains(&idx) {
                            out.push(idx);
                        }
                    }
                }
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
