// src/geometry.rs

/// A vertex in window coordinates (origin top-left, y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2> for (f64, f64) {
    fn from(p: Point2) -> Self {
        (p.x, p.y)
    }
}

/// A single closed ring of vertices. The closing edge is implicit.
pub type Contour = Vec<Point2>;

/// A set of contours interpreted together under a fill rule.
pub type Polygons = Vec<Contour>;

/// The client rectangle that generated polygons must fit inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Shoelace area of a contour. Positive for contours the clipping engine
/// treats as positively oriented.
pub fn signed_area(contour: &[Point2]) -> f64 {
    let count = contour.len();
    if count < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..count {
        let j = (i + 1) % count;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }
    area / 2.0
}

/// A contour the engine and the tessellator can take: at least a triangle,
/// with every vertex finite once narrowed to GPU precision.
pub fn is_usable(contour: &[Point2]) -> bool {
    contour.len() >= 3 && contour.iter().all(|p| p.to_array().iter().all(|v| v.is_finite()))
}

/// `true` for positively oriented contours.
pub fn orientation(contour: &[Point2]) -> bool {
    signed_area(contour) >= 0.0
}

/// Net area of a polygon set: outers count positive, holes negative.
pub fn area(polygons: &[Contour]) -> f64 {
    polygons.iter().map(|c| signed_area(c)).sum()
}

pub fn to_paths(polygons: &[Contour]) -> Vec<Vec<(f64, f64)>> {
    polygons
        .iter()
        .map(|contour| contour.iter().map(|&p| p.into()).collect())
        .collect()
}

pub fn from_paths(paths: Vec<Vec<(f64, f64)>>) -> Polygons {
    paths
        .into_iter()
        .map(|path| path.into_iter().map(Point2::from).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Contour {
        vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ]
    }

    #[test]
    fn reversed_contour_flips_orientation() {
        let mut contour = square(0.0, 0.0, 10.0);
        assert!((signed_area(&contour) - 100.0).abs() < 1e-9);
        assert!(orientation(&contour));

        contour.reverse();
        assert!((signed_area(&contour) + 100.0).abs() < 1e-9);
        assert!(!orientation(&contour));
    }

    #[test]
    fn degenerate_contour_has_no_area() {
        assert_eq!(signed_area(&[Point2::new(0.0, 0.0), Point2::new(5.0, 5.0)]), 0.0);
        assert_eq!(area(&[]), 0.0);
    }

    #[test]
    fn unusable_contours() {
        assert!(is_usable(&square(0.0, 0.0, 1.0)));
        assert!(!is_usable(&[Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]));

        let mut contour = square(0.0, 0.0, 1.0);
        contour[2].x = f64::NAN;
        assert!(!is_usable(&contour));

        // Finite as f64, infinite as f32.
        contour[2].x = 1e300;
        assert!(contour[2].is_finite());
        assert!(!is_usable(&contour));
    }

    #[test]
    fn holes_subtract_from_net_area() {
        let outer = square(0.0, 0.0, 10.0);
        let mut hole = square(2.0, 2.0, 2.0);
        hole.reverse();
        assert!((area(&[outer, hole]) - 96.0).abs() < 1e-9);
    }

    #[test]
    fn paths_conversion_keeps_vertices() {
        let polygons = vec![square(1.0, 2.0, 3.0)];
        let paths = to_paths(&polygons);
        assert_eq!(paths[0][2], (4.0, 5.0));
        assert_eq!(from_paths(paths), polygons);
    }
}
