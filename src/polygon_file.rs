// src/polygon_file.rs
//
// Plain-text dump of polygon sets, used to reproduce a random test case:
//
//   2          polygon count
//   3          vertex count of the first polygon
//   10, 20,
//   30, 40,
//   50, 60,
//   4
//   ...

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use crate::geometry::{Contour, Point2, Polygons};

pub const SUBJECT_FILE: &str = "subj.txt";
pub const CLIP_FILE: &str = "clip.txt";

#[derive(Debug, thiserror::Error)]
pub enum PolygonFileError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

fn is_unit_scale(scale: f64) -> bool {
    (0.99..=1.01).contains(&scale)
}

/// Renders `polygons` in the dump format. Coordinates are divided by `scale`.
pub fn format_polygons(polygons: &Polygons, scale: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", polygons.len());
    for contour in polygons {
        let _ = writeln!(out, "{}", contour.len());
        for p in contour {
            if is_unit_scale(scale) {
                let _ = writeln!(out, "{}, {},", p.x / scale, p.y / scale);
            } else {
                let _ = writeln!(out, "{:.6}, {:.6},", p.x / scale, p.y / scale);
            }
        }
    }
    out
}

pub fn save_polygons(path: &Path, polygons: &Polygons, scale: f64) -> Result<(), PolygonFileError> {
    fs::write(path, format_polygons(polygons, scale)).map_err(|source| PolygonFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_polygons(path: &Path, scale: f64) -> Result<Polygons, PolygonFileError> {
    let text = fs::read_to_string(path).map_err(|source| PolygonFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_polygons(&text, scale).map_err(|(line, message)| PolygonFileError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    })
}

/// Parses the dump format. Errors carry a 1-based line number.
pub fn parse_polygons(text: &str, scale: f64) -> Result<Polygons, (usize, String)> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let polygon_count = match lines.next() {
        Some((n, line)) => parse_count(n, line)?,
        None => return Ok(Vec::new()),
    };

    // Counts come from the file, so nothing is reserved up front.
    let mut polygons = Vec::new();
    for _ in 0..polygon_count {
        let (n, line) = lines
            .next()
            .ok_or_else(|| (text.lines().count(), "missing vertex count".to_string()))?;
        let vertex_count = parse_count(n, line)?;

        let mut contour: Contour = Vec::new();
        for _ in 0..vertex_count {
            let (n, line) = lines
                .next()
                .ok_or_else(|| (n, format!("expected {} vertices", vertex_count)))?;
            contour.push(parse_vertex(n, line, scale)?);
        }
        polygons.push(contour);
    }
    Ok(polygons)
}

fn parse_count(n: usize, line: &str) -> Result<usize, (usize, String)> {
    line.parse::<usize>()
        .map_err(|_| (n, format!("expected a count, found {:?}", line)))
}

fn parse_vertex(n: usize, line: &str, scale: f64) -> Result<Point2, (usize, String)> {
    let mut fields = line.split(',').map(str::trim).filter(|f| !f.is_empty());
    let mut coord = || -> Result<f64, (usize, String)> {
        let field = fields
            .next()
            .ok_or_else(|| (n, format!("expected \"x, y\", found {:?}", line)))?;
        match field.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err((n, format!("invalid coordinate {:?}", field))),
        }
    };
    let x = coord()?;
    let y = coord()?;
    let p = Point2::new(x * scale, y * scale);
    if !p.is_finite() {
        return Err((n, format!("coordinate out of range in {:?}", line)));
    }
    Ok(p)
}
