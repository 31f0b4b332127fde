// src/clipping.rs
//
// Thin interface over the `clipper2` engine: feed subject and clip polygon
// sets in, then execute a boolean operation under a fill rule. Coordinates
// go to the engine with centi precision.

use clipper2::{difference, intersect, union, xor, Centi, FillRule, Paths};
use crate::geometry::{from_paths, is_usable, to_paths, Polygons};

#[derive(Debug, thiserror::Error)]
pub enum ClipError {
    #[error("clipping engine failed: {0}")]
    Engine(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ClipType {
    #[default]
    Intersection,
    Union,
    Difference,
    Xor,
}

impl ClipType {
    pub fn label(self) -> &'static str {
        match self {
            ClipType::Intersection => "Intersection",
            ClipType::Union => "Union",
            ClipType::Difference => "Difference",
            ClipType::Xor => "XOR",
        }
    }
}

/// Winding rule deciding which regions of a polygon set are interior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FillType {
    #[default]
    EvenOdd,
    NonZero,
    Positive,
    Negative,
}

impl FillType {
    pub fn label(self) -> &'static str {
        match self {
            FillType::EvenOdd => "EvenOdd",
            FillType::NonZero => "NonZero",
            FillType::Positive => "Positive",
            FillType::Negative => "Negative",
        }
    }
}

impl From<FillType> for FillRule {
    fn from(fill: FillType) -> Self {
        match fill {
            FillType::EvenOdd => FillRule::EvenOdd,
            FillType::NonZero => FillRule::NonZero,
            FillType::Positive => FillRule::Positive,
            FillType::Negative => FillRule::Negative,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolyType {
    Subject,
    Clip,
}

#[derive(Debug, Default)]
pub struct Clipper {
    subject: Polygons,
    clip: Polygons,
}

impl Clipper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_polygons(&mut self, polygons: &Polygons, poly_type: PolyType) {
        let target = match poly_type {
            PolyType::Subject => &mut self.subject,
            PolyType::Clip => &mut self.clip,
        };
        let before = target.len();
        target.extend(polygons.iter().filter(|c| is_usable(c)).cloned());
        let dropped = polygons.len() - (target.len() - before);
        if dropped > 0 {
            log::debug!("ignoring {} degenerate {:?} contours", dropped, poly_type);
        }
    }

    pub fn clear(&mut self) {
        self.subject.clear();
        self.clip.clear();
    }

    /// Runs `clip_type` over everything added so far. Subject and clip are
    /// both interpreted with `fill`.
    pub fn execute(&self, clip_type: ClipType, fill: FillType) -> Result<Polygons, ClipError> {
        match (self.subject.is_empty(), self.clip.is_empty()) {
            (true, true) => Ok(Vec::new()),
            (false, true) => match clip_type {
                ClipType::Intersection => Ok(Vec::new()),
                _ => resolve_fill(&self.subject, fill),
            },
            (true, false) => match clip_type {
                ClipType::Union | ClipType::Xor => resolve_fill(&self.clip, fill),
                _ => Ok(Vec::new()),
            },
            (false, false) => boolean_op(clip_type, &self.subject, &self.clip, fill),
        }
    }
}

/// Rewrites a polygon set as simple, non-overlapping contours covering the
/// interior selected by `fill`. Outers come back positively oriented, holes
/// negatively.
pub fn resolve_fill(polygons: &Polygons, fill: FillType) -> Result<Polygons, ClipError> {
    let polygons: Polygons = polygons.iter().filter(|c| is_usable(c)).cloned().collect();
    if polygons.is_empty() {
        return Ok(Vec::new());
    }
    // Subject and clip windings are evaluated separately, so a set unioned
    // with itself yields exactly its own interior.
    boolean_op(ClipType::Union, &polygons, &polygons, fill)
}

fn boolean_op(
    clip_type: ClipType,
    subject: &Polygons,
    clip: &Polygons,
    fill: FillType,
) -> Result<Polygons, ClipError> {
    let subject_paths = to_paths(subject);
    let clip_paths = to_paths(clip);
    let rule = FillRule::from(fill);

    let result: Paths<Centi> = match clip_type {
        ClipType::Intersection => intersect::<Centi>(subject_paths, clip_paths, rule),
        ClipType::Union => union::<Centi>(subject_paths, clip_paths, rule),
        ClipType::Difference => difference::<Centi>(subject_paths, clip_paths, rule),
        ClipType::Xor => xor::<Centi>(subject_paths, clip_paths, rule),
    }
    .map_err(|e| ClipError::Engine(format!("{:?}", e)))?;

    let paths: Vec<Vec<(f64, f64)>> = result.into();
    Ok(from_paths(paths).into_iter().filter(|c| is_usable(c)).collect())
}
