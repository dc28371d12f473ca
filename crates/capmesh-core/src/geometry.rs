use serde::{Deserialize, Serialize};

/// Numeric tolerance used for contact, overlap and identity tests.
pub const EPSILON: f64 = 1e-9;

/// A 2D point in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// One of the four edges of an axis-aligned rectangle, named by the
/// direction a rectangle moves when it grows on that edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Down,
    Up,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Down, Side::Up];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Down => Side::Up,
            Side::Up => Side::Down,
        }
    }

    /// +1 when growing on this side increases the edge coordinate.
    pub fn sign(self) -> f64 {
        match self {
            Side::Left | Side::Down => -1.0,
            Side::Right | Side::Up => 1.0,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
            Side::Down => 2,
            Side::Up => 3,
        }
    }
}

/// An axis-aligned rectangle in corner form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Build a rectangle from two arbitrary corners.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min: Point::new(x1.min(x2), y1.min(y2)),
            max: Point::new(x1.max(x2), y1.max(y2)),
        }
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self {
            min: Point::new(center.x - half_w, center.y - half_h),
            max: Point::new(center.x + half_w, center.y + half_h),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// A rectangle too thin on either axis to carry capacity.
    pub fn is_degenerate(&self) -> bool {
        self.width() < EPSILON || self.height() < EPSILON
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    /// Closed containment: points on the boundary are inside.
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x - EPSILON
            && other.min.y >= self.min.y - EPSILON
            && other.max.x <= self.max.x + EPSILON
            && other.max.y <= self.max.y + EPSILON
    }

    /// Interior overlap: shared edges and corners do not count.
    pub fn overlaps_interior(&self, other: &Rect) -> bool {
        self.min.x < other.max.x - EPSILON
            && other.min.x < self.max.x - EPSILON
            && self.min.y < other.max.y - EPSILON
            && other.min.y < self.max.y - EPSILON
    }

    /// The overlapping region, if it has positive area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps_interior(other) {
            return None;
        }
        Some(Rect::new(
            Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        ))
    }

    pub fn overlap_area(&self, other: &Rect) -> f64 {
        self.intersection(other).map_or(0.0, |r| r.area())
    }

    /// Grow (or shrink, for negative `margin`) symmetrically on all four sides.
    pub fn inflate(&self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Coordinate of the edge on `side`.
    pub fn edge(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.min.x,
            Side::Right => self.max.x,
            Side::Down => self.min.y,
            Side::Up => self.max.y,
        }
    }

    /// Copy of this rectangle with the edge on `side` moved to `value`.
    pub fn with_edge(&self, side: Side, value: f64) -> Self {
        let mut r = *self;
        match side {
            Side::Left => r.min.x = value,
            Side::Right => r.max.x = value,
            Side::Down => r.min.y = value,
            Side::Up => r.max.y = value,
        }
        r
    }

    /// Distance from this rectangle's `side` edge to the facing edge of
    /// `other`, assuming `other` lies in that direction. Never negative.
    pub fn gap_to(&self, other: &Rect, side: Side) -> f64 {
        let gap = match side {
            Side::Left => self.min.x - other.max.x,
            Side::Right => other.min.x - self.max.x,
            Side::Down => self.min.y - other.max.y,
            Side::Up => other.min.y - self.max.y,
        };
        gap.max(0.0)
    }

    /// The pieces of `self` left over once `blocker` is cut out: one maximal
    /// rectangle per side the blocker does not reach. Pieces overlap at the
    /// corners; together they cover `self` minus `blocker` exactly.
    pub fn inverse_rects(&self, blocker: &Rect) -> Vec<Rect> {
        let Some(cut) = self.intersection(blocker) else {
            return vec![*self];
        };
        let mut pieces = Vec::with_capacity(4);
        if cut.min.x > self.min.x + EPSILON {
            pieces.push(Rect::new(self.min, Point::new(cut.min.x, self.max.y)));
        }
        if cut.max.x < self.max.x - EPSILON {
            pieces.push(Rect::new(Point::new(cut.max.x, self.min.y), self.max));
        }
        if cut.min.y > self.min.y + EPSILON {
            pieces.push(Rect::new(self.min, Point::new(self.max.x, cut.min.y)));
        }
        if cut.max.y < self.max.y - EPSILON {
            pieces.push(Rect::new(Point::new(self.min.x, cut.max.y), self.max));
        }
        pieces
    }
}

/// The probe rectangle running from `rect`'s edge on `side` out to the
/// matching edge of `bounds`. The cross-axis span is `rect`'s.
pub fn search_strip(rect: &Rect, side: Side, bounds: &Rect) -> Rect {
    match side {
        Side::Left => Rect::new(
            Point::new(bounds.min.x, rect.min.y),
            Point::new(rect.min.x, rect.max.y),
        ),
        Side::Right => Rect::new(
            Point::new(rect.max.x, rect.min.y),
            Point::new(bounds.max.x, rect.max.y),
        ),
        Side::Down => Rect::new(
            Point::new(rect.min.x, bounds.min.y),
            Point::new(rect.max.x, rect.min.y),
        ),
        Side::Up => Rect::new(
            Point::new(rect.min.x, rect.max.y),
            Point::new(rect.max.x, bounds.max.y),
        ),
    }
}

/// Whether `candidate` is the same region as the search rectangle described
/// by `center` and `width` x `height`, within [`EPSILON`].
pub fn is_self_rect(candidate: &Rect, center: Point, width: f64, height: f64) -> bool {
    let c = candidate.center();
    (c.x - center.x).abs() < EPSILON
        && (c.y - center.y).abs() < EPSILON
        && (candidate.width() - width).abs() < EPSILON
        && (candidate.height() - height).abs() < EPSILON
}

/// Ray-casting parity test. Points lying on an edge count as inside.
pub fn point_in_polygon(point: &Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let n = vertices.len();
    if (0..n).any(|i| point_on_segment(point, &vertices[i], &vertices[(i + 1) % n])) {
        return true;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = &vertices[i];
        let b = &vertices[j];
        // Half-open on y so a vertex exactly at the ray's height is counted once.
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn point_on_segment(p: &Point, a: &Point, b: &Point) -> bool {
    let len = a.distance_to(b);
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross.abs() > EPSILON * len.max(1.0) {
        return false;
    }
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

/// A closed polygon given by its ordered vertices (the board outline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        point_in_polygon(p, &self.vertices)
    }

    /// Whether any representative point of `rect` (its center, or a corner
    /// pulled slightly inward) lies inside the polygon.
    pub fn touches_rect(&self, rect: &Rect) -> bool {
        if self.contains_point(&rect.center()) {
            return true;
        }
        let inset_x = rect.width() * 1e-3;
        let inset_y = rect.height() * 1e-3;
        let inner = Rect::new(
            Point::new(rect.min.x + inset_x, rect.min.y + inset_y),
            Point::new(rect.max.x - inset_x, rect.max.y - inset_y),
        );
        inner.corners().iter().any(|c| self.contains_point(c))
    }

    /// Rectangles covering the part of `bounds` outside the polygon.
    ///
    /// `bounds` is cut into the grid formed by the distinct vertex
    /// coordinates, and horizontal runs of cells lying wholly outside are
    /// merged into one void. Cells crossed by a slanted edge are split into
    /// quadrants down to [`OUTLINE_REFINE_DEPTH`] levels; whatever is still
    /// crossed at the bottom becomes void, so the voids never leave part of
    /// the outside uncovered. Exact for rectilinear outlines.
    pub fn complement_rects(&self, bounds: &Rect) -> Vec<Rect> {
        let xs = grid_lines(bounds.min.x, bounds.max.x, self.vertices.iter().map(|v| v.x));
        let ys = grid_lines(bounds.min.y, bounds.max.y, self.vertices.iter().map(|v| v.y));

        let mut voids = Vec::new();
        for row in ys.windows(2) {
            let mut run_start: Option<f64> = None;
            for col in xs.windows(2) {
                let cell = Rect::from_corners(col[0], row[0], col[1], row[1]);
                let cover = self.cover_of(&cell);
                if cover == CellCover::Outside {
                    run_start.get_or_insert(col[0]);
                    continue;
                }
                if let Some(start) = run_start.take() {
                    voids.push(Rect::from_corners(start, row[0], col[0], row[1]));
                }
                if cover == CellCover::Crossed {
                    self.refine_voids(&cell, OUTLINE_REFINE_DEPTH, &mut voids);
                }
            }
            if let Some(start) = run_start {
                voids.push(Rect::from_corners(start, row[0], bounds.max.x, row[1]));
            }
        }
        voids
    }

    fn refine_voids(&self, cell: &Rect, depth: u32, voids: &mut Vec<Rect>) {
        match self.cover_of(cell) {
            CellCover::Inside => {}
            CellCover::Outside => voids.push(*cell),
            CellCover::Crossed if depth == 0 => voids.push(*cell),
            CellCover::Crossed => {
                let c = cell.center();
                for quad in [
                    Rect::new(cell.min, c),
                    Rect::from_corners(c.x, cell.min.y, cell.max.x, c.y),
                    Rect::from_corners(cell.min.x, c.y, c.x, cell.max.y),
                    Rect::new(c, cell.max),
                ] {
                    self.refine_voids(&quad, depth - 1, voids);
                }
            }
        }
    }

    /// An edge passing through the interior of `cell` means mixed coverage.
    /// Otherwise the interior is on one side of the boundary and the center
    /// decides.
    fn cover_of(&self, cell: &Rect) -> CellCover {
        let n = self.vertices.len();
        let crossed = n >= 3
            && (0..n).any(|i| segment_crosses_interior(&self.vertices[i], &self.vertices[(i + 1) % n], cell));
        if crossed {
            CellCover::Crossed
        } else if self.contains_point(&cell.center()) {
            CellCover::Inside
        } else {
            CellCover::Outside
        }
    }
}

/// Quadrant levels used to approximate an outline along slanted edges.
pub const OUTLINE_REFINE_DEPTH: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellCover {
    Inside,
    Outside,
    Crossed,
}

/// Liang-Barsky clip of segment `a`-`b` against `rect` pulled in slightly,
/// so segments running along the border do not count.
fn segment_crosses_interior(a: &Point, b: &Point, rect: &Rect) -> bool {
    let margin = EPSILON.sqrt() * rect.width().min(rect.height()).min(1.0);
    let inner = rect.inflate(-margin);
    if inner.is_degenerate() {
        return false;
    }
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-dx, a.x - inner.min.x),
        (dx, inner.max.x - a.x),
        (-dy, a.y - inner.min.y),
        (dy, inner.max.y - a.y),
    ] {
        if p.abs() < EPSILON {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return false;
        }
    }
    t1 > t0
}

fn grid_lines(lo: f64, hi: f64, coords: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut lines: Vec<f64> = std::iter::once(lo)
        .chain(coords.filter(|c| *c > lo && *c < hi))
        .chain(std::iter::once(hi))
        .collect();
    lines.sort_by(f64::total_cmp);
    lines.dedup_by(|a, b| (*a - *b).abs() < EPSILON);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    /// An L shape missing its upper-right quadrant.
    fn l_shape() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_rect_area_and_center() {
        let r = Rect::from_corners(10.0, 5.0, 0.0, 0.0);
        assert!((r.area() - 50.0).abs() < 1e-10);
        assert_eq!(r.center(), Point::new(5.0, 2.5));
        let c = Rect::from_center(Point::new(5.0, 2.5), 10.0, 5.0);
        assert_eq!(c, r);
    }

    #[test]
    fn test_interior_overlap_ignores_touching() {
        let a = Rect::from_corners(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_corners(10.0, 0.0, 20.0, 10.0);
        let c = Rect::from_corners(5.0, 5.0, 15.0, 15.0);
        assert_eq!(a.intersection(&b), None);
        assert!(!a.overlaps_interior(&b));
        assert!(a.overlaps_interior(&c));
        assert!((a.overlap_area(&c) - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_convex_polygon_parity() {
        let poly = square();
        assert!(point_in_polygon(&Point::new(5.0, 5.0), &poly));
        assert!(point_in_polygon(&Point::new(0.5, 9.5), &poly));
        assert!(!point_in_polygon(&Point::new(-1.0, 5.0), &poly));
        assert!(!point_in_polygon(&Point::new(11.0, 5.0), &poly));
        assert!(!point_in_polygon(&Point::new(5.0, 10.5), &poly));
    }

    #[test]
    fn test_concave_polygon_parity() {
        let poly = l_shape();
        assert!(point_in_polygon(&Point::new(2.0, 2.0), &poly));
        assert!(point_in_polygon(&Point::new(8.0, 2.0), &poly));
        assert!(point_in_polygon(&Point::new(2.0, 8.0), &poly));
        assert!(!point_in_polygon(&Point::new(8.0, 8.0), &poly));
        assert!(!point_in_polygon(&Point::new(7.5, 5.5), &poly));
        assert!(!point_in_polygon(&Point::new(-0.1, 2.0), &poly));
    }

    #[test]
    fn test_on_edge_counts_as_inside() {
        let poly = l_shape();
        assert!(point_in_polygon(&Point::new(0.0, 3.0), &poly));
        assert!(point_in_polygon(&Point::new(7.0, 5.0), &poly));
        assert!(point_in_polygon(&Point::new(5.0, 7.0), &poly));
        // vertices
        assert!(point_in_polygon(&Point::new(10.0, 0.0), &poly));
        assert!(point_in_polygon(&Point::new(5.0, 5.0), &poly));
    }

    #[test]
    fn test_ray_through_vertex_counts_once() {
        let diamond = vec![
            Point::new(0.0, 5.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(5.0, 10.0),
        ];
        // The ray from here passes exactly through the vertex at (10, 5).
        assert!(point_in_polygon(&Point::new(5.0, 5.0), &diamond));
        assert!(!point_in_polygon(&Point::new(-2.0, 5.0), &diamond));
    }

    #[test]
    fn test_degenerate_polygon_contains_nothing() {
        let line = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(!point_in_polygon(&Point::new(0.5, 0.5), &line));
    }

    #[test]
    fn test_search_strip_geometry() {
        let bounds = Rect::from_corners(0.0, 0.0, 100.0, 50.0);
        let rect = Rect::from_corners(20.0, 10.0, 30.0, 15.0);
        for side in Side::ALL {
            let strip = search_strip(&rect, side, &bounds);
            // near edge sits on the rect, far edge on the bounds
            assert_eq!(strip.edge(side.opposite()), rect.edge(side));
            assert_eq!(strip.edge(side), bounds.edge(side));
            if matches!(side, Side::Left | Side::Right) {
                assert_eq!((strip.min.y, strip.max.y), (rect.min.y, rect.max.y));
            } else {
                assert_eq!((strip.min.x, strip.max.x), (rect.min.x, rect.max.x));
            }
        }
    }

    #[test]
    fn test_search_strip_at_bounds_edge_is_empty() {
        let bounds = Rect::from_corners(0.0, 0.0, 10.0, 10.0);
        let rect = Rect::from_corners(0.0, 2.0, 4.0, 4.0);
        let strip = search_strip(&rect, Side::Left, &bounds);
        assert!(strip.is_degenerate());
    }

    #[test]
    fn test_self_rect_detection() {
        let original = Rect::from_corners(0.0, 0.0, 10.0, 4.0);
        let same = Rect::from_corners(0.0, 0.0, 10.0, 4.0 + 1e-12);
        let shrunk = Rect::from_corners(0.0, 0.0, 9.0, 4.0);
        let c = original.center();
        assert!(is_self_rect(&same, c, 10.0, 4.0));
        assert!(!is_self_rect(&shrunk, c, 10.0, 4.0));
    }

    #[test]
    fn test_inverse_rects_around_center_blocker() {
        let region = Rect::from_corners(0.0, 0.0, 10.0, 10.0);
        let blocker = Rect::from_corners(4.0, 4.0, 6.0, 6.0);
        let pieces = region.inverse_rects(&blocker);
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|p| !p.overlaps_interior(&blocker)));
        assert!(pieces.iter().all(|p| region.contains_rect(p)));
        assert_eq!(pieces[0], Rect::from_corners(0.0, 0.0, 4.0, 10.0));
        assert_eq!(pieces[3], Rect::from_corners(0.0, 6.0, 10.0, 10.0));
    }

    #[test]
    fn test_inverse_rects_of_spanning_blocker() {
        let region = Rect::from_corners(0.0, 0.0, 10.0, 10.0);
        // spans the full height, so only left and right pieces remain
        let blocker = Rect::from_corners(3.0, -5.0, 7.0, 15.0);
        let pieces = region.inverse_rects(&blocker);
        assert_eq!(pieces.len(), 2);
        let covering = Rect::from_corners(-1.0, -1.0, 11.0, 11.0);
        assert!(region.inverse_rects(&covering).is_empty());
    }

    #[test]
    fn test_gap_and_edges() {
        let a = Rect::from_corners(0.0, 0.0, 8.0, 2.0);
        let b = Rect::from_corners(11.0, 0.0, 12.0, 2.0);
        assert!((a.gap_to(&b, Side::Right) - 3.0).abs() < 1e-12);
        assert!((b.gap_to(&a, Side::Left) - 3.0).abs() < 1e-12);
        let grown = a.with_edge(Side::Right, 9.5);
        assert_eq!(grown.edge(Side::Right), 9.5);
        assert_eq!(grown.edge(Side::Left), 0.0);
    }

    #[test]
    fn test_complement_of_l_shape() {
        let outline = Polygon::new(l_shape());
        let bounds = Rect::from_corners(0.0, 0.0, 10.0, 10.0);
        let voids = outline.complement_rects(&bounds);
        assert_eq!(voids, vec![Rect::from_corners(5.0, 5.0, 10.0, 10.0)]);
    }

    #[test]
    fn test_complement_of_full_outline_is_empty() {
        let outline = Polygon::new(square());
        let bounds = Rect::from_corners(0.0, 0.0, 10.0, 10.0);
        assert!(outline.complement_rects(&bounds).is_empty());
        assert!(outline.touches_rect(&Rect::from_corners(9.0, 9.0, 20.0, 20.0)));
        assert!(!outline.touches_rect(&Rect::from_corners(11.0, 11.0, 20.0, 20.0)));
    }

    #[test]
    fn test_complement_of_triangle_covers_slanted_edge() {
        let outline = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ]);
        let bounds = Rect::from_corners(0.0, 0.0, 10.0, 10.0);
        let voids = outline.complement_rects(&bounds);

        // 8x8 cells of 1.25: 28 outside and 8 on the hypotenuse are void
        let area: f64 = voids.iter().map(Rect::area).sum();
        assert!((area - 56.25).abs() < 1e-9);
        let inside = Rect::from_corners(0.0, 0.0, 5.0, 5.0);
        assert!(voids.iter().all(|v| !v.overlaps_interior(&inside)));
        for v in &voids {
            let corner = Point::new(v.max.x, v.max.y);
            assert!(corner.x + corner.y > 10.0 - 1e-9);
        }
    }

    #[test]
    fn test_segment_along_border_does_not_cross() {
        let cell = Rect::from_corners(0.0, 0.0, 2.0, 2.0);
        let (a, b) = (Point::new(0.0, -1.0), Point::new(0.0, 3.0));
        assert!(!segment_crosses_interior(&a, &b, &cell));
        let (c, d) = (Point::new(-1.0, 1.0), Point::new(3.0, 1.5));
        assert!(segment_crosses_interior(&c, &d, &cell));
        let (e, f) = (Point::new(2.0, 0.0), Point::new(4.0, -2.0));
        assert!(!segment_crosses_interior(&e, &f, &cell));
    }
}
