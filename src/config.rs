// src/config.rs

use std::path::PathBuf;
use clap::Parser;
use crate::clipping::{ClipType, FillType};

/// Interactive demo of polygon boolean operations.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Vertices per random polygon (3..50)
    #[arg(short = 'n', long, default_value_t = crate::demo::DEFAULT_VERTEX_COUNT)]
    pub vertices: usize,

    /// Boolean operation shown at start-up
    #[arg(short = 'o', long, value_enum, default_value_t = ClipType::Intersection)]
    pub clip_type: ClipType,

    /// Fill rule shown at start-up
    #[arg(short, long, value_enum, default_value_t = FillType::EvenOdd)]
    pub fill: FillType,

    /// Seed for the polygon generator, for reproducible sessions
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Directory that receives subj.txt and clip.txt on every refresh
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dump_dir: PathBuf,

    /// Don't write polygon dumps
    #[arg(long)]
    pub no_dump: bool,

    /// Load the initial subject polygons from a dump file
    #[arg(long, value_name = "FILE", requires = "clip")]
    pub subject: Option<PathBuf>,

    /// Load the initial clip polygons from a dump file
    #[arg(long, value_name = "FILE", requires = "subject")]
    pub clip: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,
}

/// Start-up settings for a demo session.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub vertex_count: usize,
    pub clip_type: ClipType,
    pub fill: FillType,
    pub seed: Option<u64>,
    pub dump_dir: Option<PathBuf>,
    pub initial_files: Option<(PathBuf, PathBuf)>,
    pub window_size: (u32, u32),
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            vertex_count: crate::demo::DEFAULT_VERTEX_COUNT,
            clip_type: ClipType::default(),
            fill: FillType::default(),
            seed: None,
            dump_dir: Some(PathBuf::from(".")),
            initial_files: None,
            window_size: (640, 480),
        }
    }
}

impl From<Args> for DemoConfig {
    fn from(args: Args) -> Self {
        Self {
            vertex_count: args.vertices,
            clip_type: args.clip_type,
            fill: args.fill,
            seed: args.seed,
            dump_dir: if args.no_dump { None } else { Some(args.dump_dir) },
            initial_files: args.subject.zip(args.clip),
            window_size: (args.width.max(1), args.height.max(1)),
        }
    }
}
