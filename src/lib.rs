// src/lib.rs

pub mod geometry;
pub mod generator;
pub mod clipping;
pub mod polygon_file;
pub mod vertex;
pub mod tessellation;
pub mod controls;
pub mod config;
pub mod demo;

pub use clipping::{ClipType, Clipper, FillType, PolyType};
pub use config::{Args, DemoConfig};
pub use demo::{ClipperDemo, Outcome};
pub use geometry::{Bounds, Contour, Point2, Polygons};
pub use tessellation::{Mesh, PolygonRole};
pub use vertex::Vertex;
