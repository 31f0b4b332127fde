// src/main.rs

pub mod app;
pub mod ui;
pub mod rendering;

use std::sync::Arc;
use winit::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{EventLoopWindowTarget, EventLoop},
    window::WindowBuilder,
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use clipper_demo::{DemoConfig, Outcome};
use app::{AppError, ClipperApp};

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub async fn run() {
    let config: DemoConfig;
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            let _ = console_log::init_with_level(log::Level::Warn);
            config = DemoConfig { dump_dir: None, ..DemoConfig::default() };
        } else {
            use clap::Parser;
            env_logger::init();
            config = clipper_demo::Args::parse().into();
        }
    }

    if let Err(e) = run_with(config).await {
        log::error!("{}", e);
        #[cfg(not(target_arch = "wasm32"))]
        std::process::exit(1);
    }
}

async fn run_with(config: DemoConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let (width, height) = config.window_size;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Clipper Demo")
            .with_inner_size(winit::dpi::LogicalSize::new(width, height))
            .build(&event_loop)?,
    );

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::WindowExtWebSys;
        let attached = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| {
                let dst = doc.get_element_by_id("wasm-viewport")?;
                let canvas = web_sys::Element::from(window.canvas()?);
                dst.append_child(&canvas).ok()?;
                Some(())
            });
        if attached.is_none() {
            log::warn!("couldn't append canvas to document body");
        }
    }

    let mut app_state = ClipperApp::new(window.clone(), &config).await?;

    event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        match event {
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                app_state.repaint_if_due(&window);
            }
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    target.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    app_state.resize(*physical_size);
                    window.request_redraw();
                }
                WindowEvent::RedrawRequested => match app_state.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        app_state.resize(app_state.get_size());
                        window.request_redraw();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        target.exit();
                    }
                    Err(e) => log::warn!("surface error: {:?}", e),
                },
                _ => {
                    if app_state.handle_window_event(event, &window) == Some(Outcome::Quit) {
                        target.exit();
                    }
                }
            },
            Event::LoopExiting => log::info!("exiting"),
            _ => {}
        }
        target.set_control_flow(app_state.control_flow());
    })?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() {
    run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {}
