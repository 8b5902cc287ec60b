mod assets;
mod gpu;

use assets::AssetMessage;
use glam::Vec2;
use glint_core::{
    demo_scene, OverlaySink, Viewer, ViewerClock, ViewerConfig, DRAG_CLICK_SLOP_PX, SPHERE_COUNT,
};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Pixels per wheel line, matching a browser's line-mode deltaY.
const WHEEL_LINE_PX: f32 = 40.0;

/// There is no DOM here; overlay effects are logged and the fade itself is
/// drawn from the sequencer's opacity.
struct LogOverlay;

impl OverlaySink for LogOverlay {
    fn set_progress(&mut self, ratio: f32) {
        log::info!("[loading] {:.0}%", ratio * 100.0);
    }
    fn set_overlay_opacity(&mut self, opacity: f32) {
        log::trace!("[loading] overlay opacity {:.3}", opacity);
    }
    fn end_loading_bar(&mut self) {
        log::info!("[loading] loading bar ended");
    }
    fn set_title_opacity(&mut self, opacity: f32) {
        log::trace!("[loading] title opacity {:.3}", opacity);
    }
    fn hide_title(&mut self) {
        log::info!("[loading] title hidden");
    }
}

#[derive(Default)]
struct Press {
    down_at: Option<Vec2>,
    dragging: bool,
}

struct App<'w> {
    gpu: gpu::GpuState<'w>,
    viewer: Viewer,
    overlay: LogOverlay,
    clock: ViewerClock,
    assets: Receiver<AssetMessage>,
    assets_open: bool,
    cursor: Vec2,
    press: Press,
}

impl<'w> App<'w> {
    fn drain_assets(&mut self) {
        while self.assets_open {
            match self.assets.try_recv() {
                Ok(AssetMessage::Loaded { url, bytes }) => {
                    log::info!("[loading] read {} ({} bytes)", url, bytes);
                    self.viewer
                        .on_asset_finished(&url, self.clock.elapsed(), &mut self.overlay);
                }
                Ok(AssetMessage::Failed { url, reason }) => {
                    log::warn!("[loading] {}: {}", url, reason);
                    self.viewer
                        .on_asset_failed(&url, self.clock.elapsed(), &mut self.overlay);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.assets_open = false,
            }
        }
    }

    fn cursor_moved(&mut self, pos: Vec2) {
        let delta = pos - self.cursor;
        self.cursor = pos;
        self.viewer.on_pointer_move(pos.x, pos.y);
        let Some(down_at) = self.press.down_at else {
            return;
        };
        if !self.press.dragging && pos.distance(down_at) > DRAG_CLICK_SLOP_PX {
            self.press.dragging = true;
        }
        if self.press.dragging {
            self.viewer.on_pointer_drag(delta.x, delta.y);
        }
    }

    fn pressed(&mut self) {
        self.press = Press {
            down_at: Some(self.cursor),
            dragging: false,
        };
    }

    /// winit reports no double-clicks, so every click is a tap.
    fn released(&mut self) {
        let press = std::mem::take(&mut self.press);
        if press.down_at.is_none() || press.dragging {
            return;
        }
        let now = self.clock.elapsed();
        if let Some(id) = self.viewer.on_tap(self.cursor.x, self.cursor.y, now) {
            log::info!("[gesture] double tap locked on {}", id);
        }
    }

    /// Returns false when the event loop should exit.
    fn frame(&mut self) -> bool {
        self.drain_assets();
        let Some(_report) = self.viewer.tick(self.clock.elapsed(), &mut self.overlay) else {
            return false;
        };
        let opacity = self.viewer.loading().overlay_opacity();
        match self
            .gpu
            .render(&self.viewer.scene, &self.viewer.camera, opacity)
        {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.resize(self.gpu.window.inner_size())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[render] out of memory");
                return false;
            }
            Err(e) => log::warn!("[render] {:?}", e),
        }
        true
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let asset_root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Glint (native)")
        .build(&event_loop)?;
    let size = window.inner_size();

    let scene = demo_scene(SPHERE_COUNT, rand::random());
    let mut viewer = Viewer::new(ViewerConfig::default(), scene, size.width, size.height)?;
    for url in assets::ASSET_PATHS {
        viewer.on_asset_started(url);
    }
    let gpu = pollster::block_on(gpu::GpuState::new(&window, SPHERE_COUNT))?;
    let clock = ViewerClock::new();
    viewer.start(clock.elapsed());

    let mut app = App {
        gpu,
        viewer,
        overlay: LogOverlay,
        clock,
        assets: assets::spawn_loader(asset_root, assets::ASSET_PATHS),
        assets_open: true,
        cursor: Vec2::ZERO,
        press: Press::default(),
    };

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                app.gpu.resize(size);
                app.viewer.on_resize(size.width, size.height);
            }
            WindowEvent::CloseRequested => {
                app.viewer.stop();
                elwt.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                app.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => app.pressed(),
                ElementState::Released => app.released(),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                app.viewer.on_wheel(dy);
            }
            WindowEvent::Touch(touch) => {
                let pos = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => {
                        app.cursor = pos;
                        app.viewer.on_pointer_move(pos.x, pos.y);
                        app.pressed();
                    }
                    TouchPhase::Moved => app.cursor_moved(pos),
                    TouchPhase::Ended => app.released(),
                    TouchPhase::Cancelled => app.press = Press::default(),
                }
            }
            WindowEvent::RedrawRequested => {
                if !app.frame() {
                    elwt.exit();
                }
            }
            _ => {}
        },
        Event::AboutToWait => app.gpu.window.request_redraw(),
        _ => {}
    })?;
    Ok(())
}
