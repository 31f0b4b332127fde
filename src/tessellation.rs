// src/tessellation.rs
//
// Every polygon set is drawn twice: a translucent fill of its interior under
// the active fill rule, then a thin outline around each contour. The fill
// rule is resolved by the clipping engine first, so the tessellator only
// sees simple contours with holes.

use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, StrokeOptions,
    StrokeTessellator, StrokeVertex, VertexBuffers,
};
use crate::clipping::{resolve_fill, ClipError, FillType};
use crate::geometry::{is_usable, orientation, Point2, Polygons};
use crate::vertex::Vertex;

pub type Mesh = VertexBuffers<Vertex, u32>;

#[derive(Debug, thiserror::Error)]
pub enum TessellationError {
    #[error(transparent)]
    Clip(#[from] ClipError),

    #[error("tessellation failed: {0}")]
    Lyon(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolygonRole {
    Subject,
    Clip,
    Solution,
}

impl PolygonRole {
    pub fn fill_color(self) -> [f32; 4] {
        match self {
            PolygonRole::Subject => [0.0, 0.0, 1.0, 0.062],
            PolygonRole::Clip => [1.0, 1.0, 0.0, 0.062],
            PolygonRole::Solution => [0.0, 1.0, 0.0, 0.25],
        }
    }

    /// Outline colour of one contour. Subject and clip outlines show the
    /// contour's orientation.
    pub fn outline_color(self, positive: bool) -> [f32; 4] {
        match (self, positive) {
            (PolygonRole::Subject, true) => [0.0, 0.0, 0.8, 0.5],
            (PolygonRole::Subject, false) => [0.0, 1.0, 1.0, 0.5],
            (PolygonRole::Clip, true) => [0.6, 0.0, 0.0, 0.5],
            (PolygonRole::Clip, false) => [1.0, 0.25, 1.0, 0.5],
            (PolygonRole::Solution, _) => [0.0, 0.4, 0.0, 1.0],
        }
    }

    pub fn line_width(self) -> f32 {
        match self {
            PolygonRole::Solution => 1.0,
            _ => 0.8,
        }
    }
}

/// Fill rule used to draw a set. Solutions come out of the engine positively
/// oriented, so under a negative fill they are drawn non-zero instead.
pub fn display_fill(role: PolygonRole, fill: FillType) -> FillType {
    match (role, fill) {
        (PolygonRole::Solution, FillType::Negative) => FillType::NonZero,
        _ => fill,
    }
}

pub fn tessellate_polygons(
    polygons: &Polygons,
    role: PolygonRole,
    fill: FillType,
) -> Result<Mesh, TessellationError> {
    let mut mesh = Mesh::new();
    tessellate_polygons_into(&mut mesh, polygons, role, fill)?;
    Ok(mesh)
}

/// Appends the fill and outlines of `polygons` to `mesh`. Triangles are
/// emitted fill first, so outlines blend on top.
pub fn tessellate_polygons_into(
    mesh: &mut Mesh,
    polygons: &Polygons,
    role: PolygonRole,
    fill: FillType,
) -> Result<(), TessellationError> {
    let interior = resolve_fill(polygons, display_fill(role, fill))?;
    fill_interior(mesh, &interior, role.fill_color())?;

    let mut stroker = StrokeTessellator::new();
    let options = StrokeOptions::default().with_line_width(role.line_width());
    for contour in polygons.iter().filter(|c| is_usable(c)) {
        let color = role.outline_color(orientation(contour));
        stroker
            .tessellate_path(
                &build_path([contour.as_slice()]),
                &options,
                &mut BuffersBuilder::new(mesh, |v: StrokeVertex| {
                    Vertex::new(v.position().to_array(), color)
                }),
            )
            .map_err(|e| TessellationError::Lyon(format!("{:?}", e)))?;
    }
    Ok(())
}

fn fill_interior(mesh: &mut Mesh, interior: &Polygons, color: [f32; 4]) -> Result<(), TessellationError> {
    if interior.is_empty() {
        return Ok(());
    }
    let path = build_path(interior.iter().map(Vec::as_slice));

    FillTessellator::new()
        .tessellate_path(
            &path,
            &FillOptions::default().with_fill_rule(FillRule::EvenOdd),
            &mut BuffersBuilder::new(mesh, |v: FillVertex| Vertex::new(v.position().to_array(), color)),
        )
        .map_err(|e| TessellationError::Lyon(format!("{:?}", e)))
}

/// One closed sub-path per usable contour. lyon asserts on non-finite points.
fn build_path<'a>(contours: impl IntoIterator<Item = &'a [Point2]>) -> Path {
    let mut builder = Path::builder();
    for contour in contours.into_iter().filter(|c| is_usable(c)) {
        let Some((first, rest)) = contour.split_first() else { continue };
        builder.begin(point(first.x as f32, first.y as f32));
        for p in rest {
            builder.line_to(point(p.x as f32, p.y as f32));
        }
        builder.end(true);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Contour;

    fn square(x: f64, y: f64, size: f64) -> Contour {
        vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ]
    }

    fn triangle_area(mesh: &Mesh, color: [f32; 4]) -> f32 {
        mesh.indices
            .chunks(3)
            .filter(|t| mesh.vertices[t[0] as usize].color == color)
            .map(|t| {
                let [a, b, c] = [t[0], t[1], t[2]].map(|i| mesh.vertices[i as usize].position);
                ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs() / 2.0
            })
            .sum()
    }

    #[test]
    fn square_fill_covers_its_area() {
        let mesh = tessellate_polygons(&vec![square(0.0, 0.0, 10.0)], PolygonRole::Solution, FillType::EvenOdd)
            .unwrap();
        assert_eq!(mesh.indices.len() % 3, 0);
        let filled = triangle_area(&mesh, PolygonRole::Solution.fill_color());
        assert!((filled - 100.0).abs() < 0.5, "filled area {}", filled);
        assert!(mesh.vertices.iter().any(|v| v.color == PolygonRole::Solution.outline_color(true)));
    }

    #[test]
    fn even_odd_leaves_nested_square_empty() {
        let nested = vec![square(0.0, 0.0, 10.0), square(2.0, 2.0, 4.0)];

        let even_odd = tessellate_polygons(&nested, PolygonRole::Subject, FillType::EvenOdd).unwrap();
        let filled = triangle_area(&even_odd, PolygonRole::Subject.fill_color());
        assert!((filled - 84.0).abs() < 0.5, "filled area {}", filled);

        let non_zero = tessellate_polygons(&nested, PolygonRole::Subject, FillType::NonZero).unwrap();
        let filled = triangle_area(&non_zero, PolygonRole::Subject.fill_color());
        assert!((filled - 100.0).abs() < 0.5, "filled area {}", filled);
    }

    #[test]
    fn outline_colour_follows_orientation() {
        let mut reversed = square(0.0, 0.0, 10.0);
        reversed.reverse();
        let mesh = tessellate_polygons(&vec![reversed], PolygonRole::Clip, FillType::NonZero).unwrap();
        assert!(mesh.vertices.iter().any(|v| v.color == PolygonRole::Clip.outline_color(false)));
        assert!(!mesh.vertices.iter().any(|v| v.color == PolygonRole::Clip.outline_color(true)));
    }

    #[test]
    fn negative_fill_draws_solutions_non_zero() {
        assert_eq!(display_fill(PolygonRole::Solution, FillType::Negative), FillType::NonZero);
        assert_eq!(display_fill(PolygonRole::Subject, FillType::Negative), FillType::Negative);
        assert_eq!(display_fill(PolygonRole::Solution, FillType::Positive), FillType::Positive);

        let mesh = tessellate_polygons(&vec![square(0.0, 0.0, 10.0)], PolygonRole::Solution, FillType::Negative)
            .unwrap();
        assert!(triangle_area(&mesh, PolygonRole::Solution.fill_color()) > 99.0);
    }

    #[test]
    fn degenerate_contours_produce_nothing() {
        let mesh = tessellate_polygons(
            &vec![vec![Point2::new(0.0, 0.0), Point2::new(3.0, 3.0)]],
            PolygonRole::Subject,
            FillType::EvenOdd,
        )
        .unwrap();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn non_finite_contours_are_skipped() {
        let mut bad = square(0.0, 0.0, 10.0);
        bad[1].y = f64::INFINITY;
        let mesh = tessellate_polygons(&vec![bad, square(20.0, 0.0, 5.0)], PolygonRole::Subject, FillType::EvenOdd)
            .unwrap();
        assert!(mesh.vertices.iter().all(|v| v.position.iter().all(|c| c.is_finite())));
        let filled = triangle_area(&mesh, PolygonRole::Subject.fill_color());
        assert!((filled - 25.0).abs() < 0.5, "filled area {}", filled);
    }

    #[test]
    fn appending_keeps_earlier_indices_valid() {
        let mut mesh = Mesh::new();
        tessellate_polygons_into(&mut mesh, &vec![square(0.0, 0.0, 5.0)], PolygonRole::Subject, FillType::EvenOdd)
            .unwrap();
        let first = mesh.vertices.len();
        tessellate_polygons_into(&mut mesh, &vec![square(20.0, 0.0, 5.0)], PolygonRole::Clip, FillType::EvenOdd)
            .unwrap();
        assert!(mesh.vertices.len() > first);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }
}
