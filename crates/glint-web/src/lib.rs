#![cfg(target_arch = "wasm32")]
mod dom;
mod events;
mod frame;
mod loader;
mod overlay;
mod render;

use glint_core::{demo_scene, Viewer, ViewerClock, ViewerConfig, SPHERE_COUNT};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("glint-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, "app-canvas")?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let scene = demo_scene(SPHERE_COUNT, seed);
    let viewer = Viewer::new(ViewerConfig::default(), scene, width, height)?;
    let viewer = Rc::new(RefCell::new(viewer));
    let overlay = Rc::new(RefCell::new(overlay::DomOverlay::new(&document)));
    let clock = Rc::new(ViewerClock::new());

    // surface needs a 'static canvas
    let leaked_canvas: &'static web_sys::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = render::GpuState::new(leaked_canvas).await?;

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
        clock: clock.clone(),
    });

    loader::AssetLoader {
        viewer: viewer.clone(),
        overlay: overlay.clone(),
        clock: clock.clone(),
    }
    .load_all(loader::ASSET_URLS);

    viewer.borrow_mut().start(clock.elapsed());
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        overlay,
        clock,
        canvas,
        gpu,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
