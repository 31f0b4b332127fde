// src/demo.rs
//
// Session state: current operation, fill rule, vertex count and the three
// polygon sets. Nothing here touches the window; the shell translates input
// into `Command`s and draws the result.

use std::path::{Path, PathBuf};
use crate::clipping::{ClipType, Clipper, FillType, PolyType};
use crate::config::DemoConfig;
use crate::controls::Command;
use crate::generator::PolygonGenerator;
use crate::geometry::{Bounds, Polygons};
use crate::polygon_file::{self, PolygonFileError, CLIP_FILE, SUBJECT_FILE};
use crate::tessellation::{tessellate_polygons_into, Mesh, PolygonRole};

pub const MIN_VERTEX_COUNT: usize = 3;
pub const MAX_VERTEX_COUNT: usize = 50;
pub const DEFAULT_VERTEX_COUNT: usize = 5;

const MAX_ENTRY_DIGITS: u8 = 2;

/// Vertex count typed as digits; takes effect on the next update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexCountEntry {
    committed: usize,
    pending: Option<usize>,
    digits: u8,
}

impl VertexCountEntry {
    pub fn new(count: usize) -> Self {
        Self {
            committed: count.clamp(MIN_VERTEX_COUNT, MAX_VERTEX_COUNT),
            pending: None,
            digits: 0,
        }
    }

    /// Returns `false` when the entry is already full. Leading zeros don't
    /// count towards the digit limit.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        match self.pending {
            None | Some(0) => {
                self.pending = Some(digit as usize);
                self.digits = 1;
                true
            }
            Some(_) if self.digits >= MAX_ENTRY_DIGITS => false,
            Some(value) => {
                self.pending = Some(value * 10 + digit as usize);
                self.digits += 1;
                true
            }
        }
    }

    pub fn commit(&mut self) -> usize {
        if let Some(value) = self.pending.take() {
            self.committed = value.clamp(MIN_VERTEX_COUNT, MAX_VERTEX_COUNT);
        }
        self.digits = 0;
        self.committed
    }

    pub fn committed(&self) -> usize {
        self.committed
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending
    }
}

/// What the shell has to do after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Polygons or modes changed: rebuild geometry, retitle, repaint.
    Changed,
    /// Only the overlay changed.
    Repaint,
    ToggleHelp,
    Quit,
}

pub struct ClipperDemo {
    clip_type: ClipType,
    fill: FillType,
    show_clipping: bool,
    vertex_count: VertexCountEntry,
    subject: Polygons,
    clip: Polygons,
    solution: Polygons,
    generator: PolygonGenerator,
    dump_dir: Option<PathBuf>,
}

impl ClipperDemo {
    /// A session with no polygons yet.
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            clip_type: config.clip_type,
            fill: config.fill,
            show_clipping: true,
            vertex_count: VertexCountEntry::new(config.vertex_count),
            subject: Vec::new(),
            clip: Vec::new(),
            solution: Vec::new(),
            generator: PolygonGenerator::new(config.seed),
            dump_dir: config.dump_dir.clone(),
        }
    }

    /// Builds a session and its first test case, either loaded from the
    /// configured dump files or generated inside `bounds`.
    pub fn start(config: &DemoConfig, bounds: Bounds) -> Result<Self, PolygonFileError> {
        let mut demo = Self::new(config);
        match &config.initial_files {
            Some((subject, clip)) => demo.load(subject, clip)?,
            None => demo.update(true, bounds),
        }
        Ok(demo)
    }

    pub fn load(&mut self, subject: &Path, clip: &Path) -> Result<(), PolygonFileError> {
        self.subject = polygon_file::load_polygons(subject, 1.0)?;
        self.clip = polygon_file::load_polygons(clip, 1.0)?;
        log::info!(
            "loaded {} subject and {} clip contours from {} and {}",
            self.subject.len(),
            self.clip.len(),
            subject.display(),
            clip.display()
        );
        self.update(false, Bounds::new(0, 0));
        Ok(())
    }

    pub fn apply(&mut self, command: Command, bounds: Bounds) -> Outcome {
        match command {
            Command::SetClipType(clip_type) => {
                self.show_clipping = true;
                self.clip_type = clip_type;
                self.update(false, bounds);
                Outcome::Changed
            }
            Command::NoClipping => {
                self.show_clipping = false;
                self.update(false, bounds);
                Outcome::Changed
            }
            Command::SetFill(fill) => {
                self.fill = fill;
                self.update(false, bounds);
                Outcome::Changed
            }
            Command::Digit(digit) => {
                if !self.vertex_count.push_digit(digit) {
                    log::warn!("vertex count entry takes at most {} digits", MAX_ENTRY_DIGITS);
                }
                Outcome::Repaint
            }
            Command::Regenerate => {
                self.update(true, bounds);
                Outcome::Changed
            }
            Command::ToggleHelp => Outcome::ToggleHelp,
            Command::Quit => Outcome::Quit,
        }
    }

    /// Commits any typed vertex count, optionally draws a fresh test case,
    /// and recomputes the solution.
    pub fn update(&mut self, regenerate: bool, bounds: Bounds) {
        let vertex_count = self.vertex_count.commit();
        if regenerate {
            self.subject = vec![self.generator.random_polygon(bounds, vertex_count)];
            self.clip = vec![self.generator.random_polygon(bounds, vertex_count)];
            log::debug!(
                "generated {}-vertex test case in {}x{}",
                vertex_count,
                bounds.width,
                bounds.height
            );
            self.dump();
        }

        let mut clipper = Clipper::new();
        clipper.add_polygons(&self.subject, PolyType::Subject);
        clipper.add_polygons(&self.clip, PolyType::Clip);
        self.solution = match clipper.execute(self.clip_type, self.fill) {
            Ok(solution) => solution,
            Err(e) => {
                log::error!("{} with {} fill: {}", self.clip_type.label(), self.fill.label(), e);
                Vec::new()
            }
        };
    }

    fn dump(&self) {
        let Some(dir) = &self.dump_dir else { return };
        for (name, polygons) in [(SUBJECT_FILE, &self.subject), (CLIP_FILE, &self.clip)] {
            if let Err(e) = polygon_file::save_polygons(&dir.join(name), polygons, 1.0) {
                log::warn!("skipping polygon dump: {}", e);
            }
        }
    }

    pub fn title(&self) -> String {
        let operation = if self.show_clipping { self.clip_type.label() } else { "No clipping" };
        format!(
            "Clipper Demo - {} with {} fill.  [vertex count = {}]",
            operation,
            self.fill.label(),
            self.vertex_count.committed()
        )
    }

    /// Subject, clip and (when shown) solution, in draw order. A set that
    /// fails to tessellate is left out.
    pub fn build_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        let mut layers = vec![(&self.subject, PolygonRole::Subject), (&self.clip, PolygonRole::Clip)];
        if self.show_clipping {
            layers.push((&self.solution, PolygonRole::Solution));
        }
        for (polygons, role) in layers {
            let vertex_mark = mesh.vertices.len();
            let index_mark = mesh.indices.len();
            if let Err(e) = tessellate_polygons_into(&mut mesh, polygons, role, self.fill) {
                log::warn!("{:?} polygons not drawn: {}", role, e);
                mesh.vertices.truncate(vertex_mark);
                mesh.indices.truncate(index_mark);
            }
        }
        mesh
    }

    pub fn clip_type(&self) -> ClipType {
        self.clip_type
    }

    pub fn fill(&self) -> FillType {
        self.fill
    }

    pub fn show_clipping(&self) -> bool {
        self.show_clipping
    }

    pub fn pending_vertex_count(&self) -> Option<usize> {
        self.vertex_count.pending()
    }

    pub fn subject(&self) -> &Polygons {
        &self.subject
    }

    pub fn clip(&self) -> &Polygons {
        &self.clip
    }

    pub fn solution(&self) -> &Polygons {
        &self.solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;

    const BOUNDS: Bounds = Bounds { width: 640, height: 458 };

    fn config() -> DemoConfig {
        DemoConfig { seed: Some(3), dump_dir: None, ..DemoConfig::default() }
    }

    fn square(x: f64, y: f64, size: f64) -> Polygons {
        vec![vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ]]
    }

    #[test]
    fn vertex_entry_takes_two_digits_and_clamps() {
        let mut entry = VertexCountEntry::new(5);
        assert!(entry.push_digit(1));
        assert!(entry.push_digit(2));
        assert!(!entry.push_digit(3));
        assert_eq!(entry.pending(), Some(12));
        assert_eq!(entry.committed(), 5);
        assert_eq!(entry.commit(), 12);
        assert_eq!(entry.pending(), None);

        entry.push_digit(9);
        entry.push_digit(9);
        assert_eq!(entry.commit(), MAX_VERTEX_COUNT);

        entry.push_digit(1);
        assert_eq!(entry.commit(), MIN_VERTEX_COUNT);

        // Nothing typed keeps the current count.
        assert_eq!(entry.commit(), MIN_VERTEX_COUNT);
        assert_eq!(VertexCountEntry::new(500).committed(), MAX_VERTEX_COUNT);
    }

    #[test]
    fn leading_zeros_restart_the_entry() {
        let mut entry = VertexCountEntry::new(5);
        assert!(entry.push_digit(0));
        assert!(entry.push_digit(0));
        assert!(entry.push_digit(7));
        assert_eq!(entry.pending(), Some(7));
        assert!(entry.push_digit(0));
        assert!(!entry.push_digit(1));
        assert_eq!(entry.commit(), 50);

        entry.push_digit(0);
        assert_eq!(entry.commit(), MIN_VERTEX_COUNT);
    }

    #[test]
    fn start_generates_one_contour_each() {
        let demo = ClipperDemo::start(&config(), BOUNDS).unwrap();
        assert_eq!(demo.subject().len(), 1);
        assert_eq!(demo.clip().len(), 1);
        assert_eq!(demo.subject()[0].len(), DEFAULT_VERTEX_COUNT);
        assert_eq!(demo.title(), "Clipper Demo - Intersection with EvenOdd fill.  [vertex count = 5]");
    }

    #[test]
    fn mode_keys_keep_polygons_and_recompute_solution() {
        let mut demo = ClipperDemo::new(&config());
        demo.subject = square(0.0, 0.0, 10.0);
        demo.clip = square(5.0, 5.0, 10.0);

        assert_eq!(demo.apply(Command::SetClipType(ClipType::Union), BOUNDS), Outcome::Changed);
        assert_eq!(demo.subject(), &square(0.0, 0.0, 10.0));
        assert!((crate::geometry::area(demo.solution()).abs() - 175.0).abs() < 0.1);

        assert_eq!(demo.apply(Command::NoClipping, BOUNDS), Outcome::Changed);
        assert!(!demo.show_clipping());
        assert_eq!(demo.clip_type(), ClipType::Union);
        assert!(demo.title().starts_with("Clipper Demo - No clipping with EvenOdd fill."));

        demo.apply(Command::SetFill(FillType::Negative), BOUNDS);
        assert_eq!(demo.fill(), FillType::Negative);
        assert_eq!(
            demo.title(),
            "Clipper Demo - No clipping with Negative fill.  [vertex count = 5]"
        );

        demo.apply(Command::SetClipType(ClipType::Xor), BOUNDS);
        assert!(demo.show_clipping());
    }

    #[test]
    fn typed_count_applies_on_next_update() {
        let mut demo = ClipperDemo::start(&config(), BOUNDS).unwrap();
        assert_eq!(demo.apply(Command::Digit(2), BOUNDS), Outcome::Repaint);
        assert_eq!(demo.apply(Command::Digit(0), BOUNDS), Outcome::Repaint);
        assert_eq!(demo.pending_vertex_count(), Some(20));
        assert!(demo.title().ends_with("[vertex count = 5]"));

        demo.apply(Command::Regenerate, BOUNDS);
        assert_eq!(demo.pending_vertex_count(), None);
        assert_eq!(demo.subject()[0].len(), 20);
        assert_eq!(demo.clip()[0].len(), 20);
        assert!(demo.title().ends_with("[vertex count = 20]"));
    }

    #[test]
    fn help_and_quit_pass_through() {
        let mut demo = ClipperDemo::new(&config());
        assert_eq!(demo.apply(Command::ToggleHelp, BOUNDS), Outcome::ToggleHelp);
        assert_eq!(demo.apply(Command::Quit, BOUNDS), Outcome::Quit);
    }

    #[test]
    fn regeneration_writes_dump_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = DemoConfig { dump_dir: Some(dir.path().to_path_buf()), ..config() };
        let demo = ClipperDemo::start(&config, BOUNDS).unwrap();

        let subject = polygon_file::load_polygons(&dir.path().join(SUBJECT_FILE), 1.0).unwrap();
        let clip = polygon_file::load_polygons(&dir.path().join(CLIP_FILE), 1.0).unwrap();
        assert_eq!(&subject, demo.subject());
        assert_eq!(&clip, demo.clip());
    }

    #[test]
    fn unwritable_dump_dir_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = DemoConfig { dump_dir: Some(dir.path().join("missing")), ..config() };
        let demo = ClipperDemo::start(&config, BOUNDS).unwrap();
        assert_eq!(demo.subject().len(), 1);
    }

    #[test]
    fn start_from_dump_files() {
        let dir = tempfile::tempdir().unwrap();
        let subject_path = dir.path().join(SUBJECT_FILE);
        let clip_path = dir.path().join(CLIP_FILE);
        polygon_file::save_polygons(&subject_path, &square(0.0, 0.0, 10.0), 1.0).unwrap();
        polygon_file::save_polygons(&clip_path, &square(5.0, 5.0, 10.0), 1.0).unwrap();

        let config = DemoConfig { initial_files: Some((subject_path, clip_path)), ..config() };
        let demo = ClipperDemo::start(&config, BOUNDS).unwrap();
        assert_eq!(demo.subject(), &square(0.0, 0.0, 10.0));
        assert!((crate::geometry::area(demo.solution()).abs() - 25.0).abs() < 0.1);

        let missing = DemoConfig {
            initial_files: Some((dir.path().join("nope.txt"), dir.path().join(CLIP_FILE))),
            ..config
        };
        assert!(ClipperDemo::start(&missing, BOUNDS).is_err());
    }

    #[test]
    fn mesh_omits_solution_when_clipping_is_off() {
        let mut demo = ClipperDemo::new(&config());
        demo.subject = square(0.0, 0.0, 10.0);
        demo.clip = square(5.0, 5.0, 10.0);
        demo.update(false, BOUNDS);

        let solution_color = PolygonRole::Solution.fill_color();
        assert!(demo.build_mesh().vertices.iter().any(|v| v.color == solution_color));

        demo.apply(Command::NoClipping, BOUNDS);
        let mesh = demo.build_mesh();
        assert!(!mesh.vertices.is_empty());
        assert!(!mesh.vertices.iter().any(|v| v.color == solution_color));
    }
}
