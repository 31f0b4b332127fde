// src/rendering/mod.rs

pub mod renderer;
pub mod shader;

pub use renderer::Renderer;
pub use shader::WGSL_SHADER_SOURCE;
