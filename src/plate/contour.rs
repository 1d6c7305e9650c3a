use crate::config::ContourParams;
use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::point::Point;
use serde::Serialize;

/// Axis-aligned rectangle; `width`/`height` count pixels, so a single point
/// has a 1x1 rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    /// Smallest rectangle enclosing `points`; `None` when empty
    pub fn of(points: &[Point<i32>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(Self::enclosing(*first, rest))
    }

    fn enclosing(first: Point<i32>, rest: &[Point<i32>]) -> Self {
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in rest {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self {
            x: min_x,
            y: min_y,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        }
    }

    /// Intersection with a `width` x `height` image; `None` when disjoint
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        let x0 = self.x.max(0) as i64;
        let y0 = self.y.max(0) as i64;
        let x1 = (self.x as i64 + self.width as i64).min(width as i64);
        let y1 = (self.y as i64 + self.height as i64).min(height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// A quadrilateral candidate for the plate outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateContour {
    corners: [Point<i32>; 4],
}

impl PlateContour {
    /// `None` unless exactly four points are given
    pub fn from_points(points: &[Point<i32>]) -> Option<Self> {
        let corners: [Point<i32>; 4] = points.try_into().ok()?;
        Some(Self { corners })
    }

    pub fn points(&self) -> &[Point<i32>] {
        &self.corners
    }

    pub fn bounding_rect(&self) -> BoundingRect {
        let [first, rest @ ..] = &self.corners;
        BoundingRect::enclosing(*first, rest)
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.corners)
    }

    /// Corners as `[x, y]` pairs
    pub fn corners(&self) -> [[i32; 2]; 4] {
        self.corners.map(|p| [p.x, p.y])
    }
}

/// Find the plate outline in a Canny edge map
///
/// All contours (outer and hole borders) are ranked by enclosed area, the
/// `max_candidates` largest are simplified with Douglas-Peucker at
/// `epsilon_ratio * perimeter`, and the first one that comes out with exactly
/// four vertices wins.
pub fn find_plate_contour(edges: &GrayImage, params: ContourParams) -> Option<PlateContour> {
    let mut candidates: Vec<(f64, Vec<Point<i32>>)> = find_contours::<i32>(edges)
        .into_iter()
        .map(|c| (polygon_area(&c.points), c.points))
        .collect();
    tracing::debug!("Found {} contours", candidates.len());

    // Stable: equal areas keep tracing order
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (rank, (area, points)) in candidates
        .into_iter()
        .take(params.max_candidates)
        .enumerate()
    {
        let perimeter = arc_length(&points);
        let approx = approximate_polygon(&points, params.epsilon_ratio * perimeter);
        tracing::trace!(
            "Candidate {}: area {:.1}, perimeter {:.1}, {} vertices",
            rank,
            area,
            perimeter,
            approx.len()
        );
        if let Some(contour) = PlateContour::from_points(&approx) {
            tracing::debug!("Plate contour is candidate {} (area {:.1})", rank, area);
            return Some(contour);
        }
    }

    None
}

/// Enclosed area of a closed polygon (shoelace)
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0f64;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        twice_area += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
    }
    twice_area.abs() * 0.5
}

/// Perimeter of a closed polygon
pub fn arc_length(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            let dx = (q.x - p.x) as f64;
            let dy = (q.y - p.y) as f64;
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}

/// Douglas-Peucker simplification of a closed curve
///
/// The result never repeats its first point at the end. The curve's starting
/// point is not kept unless it is a real vertex: tracing may begin halfway
/// along a straight side.
pub fn approximate_polygon(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let epsilon = epsilon.max(0.0);

    let mut closed = points.to_vec();
    if closed.first() != closed.last() {
        closed.push(closed[0]);
    }

    let mut out = Vec::new();
    simplify(&closed, epsilon, &mut out);

    out.dedup();
    if out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    drop_collinear(&mut out, epsilon);
    out
}

/// Remove vertices lying within `epsilon` of the line through their
/// neighbours, wrapping around, flattest first. Never goes below a triangle.
fn drop_collinear(polygon: &mut Vec<Point<i32>>, epsilon: f64) {
    while polygon.len() > 3 {
        let n = polygon.len();
        let flattest = (0..n)
            .map(|i| {
                let prev = polygon[(i + n - 1) % n];
                let next = polygon[(i + 1) % n];
                (i, distance_to_segment_line(polygon[i], prev, next))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match flattest {
            Some((i, d)) if d <= epsilon => {
                polygon.remove(i);
            }
            _ => break,
        }
    }
}

fn simplify(points: &[Point<i32>], epsilon: f64, out: &mut Vec<Point<i32>>) {
    if points.len() < 2 {
        out.extend_from_slice(points);
        return;
    }
    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0f64;
    let mut index = 0usize;
    for (i, &p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = distance_to_segment_line(p, first, last);
        if d > max_dist {
            max_dist = d;
            index = i;
        }
    }

    if index > 0 && max_dist > epsilon {
        simplify(&points[..=index], epsilon, out);
        out.pop();
        simplify(&points[index..], epsilon, out);
    } else {
        out.push(first);
        out.push(last);
    }
}

/// Distance from `p` to the line through `a` and `b` (to `a` when they coincide)
fn distance_to_segment_line(p: Point<i32>, a: Point<i32>, b: Point<i32>) -> f64 {
    let (px, py) = (p.x as f64, p.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - ax, b.y as f64 - ay);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    ((px - ax) * dy - (py - ay) * dx).abs() / len_sq.sqrt()
}
