use crate::overlay::DomOverlay;
use glint_core::{Viewer, ViewerClock};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Assets fetched before the overlay fades.
pub const ASSET_URLS: &[&str] = &["textures/cayley_interior_4k.hdr"];

#[derive(Clone)]
pub struct AssetLoader {
    pub viewer: Rc<RefCell<Viewer>>,
    pub overlay: Rc<RefCell<DomOverlay>>,
    pub clock: Rc<ViewerClock>,
}

impl AssetLoader {
    /// Registers every url first so the tracker's total is known before any
    /// item can settle, then fetches them concurrently.
    pub fn load_all(&self, urls: &[&str]) {
        {
            let mut viewer = self.viewer.borrow_mut();
            for url in urls {
                viewer.on_asset_started(url);
            }
        }
        if urls.is_empty() {
            self.viewer
                .borrow_mut()
                .on_assets_loaded(self.clock.elapsed());
            return;
        }
        for url in urls {
            let loader = self.clone();
            let url = url.to_string();
            spawn_local(async move {
                let result = fetch_bytes(&url).await;
                let now = loader.clock.elapsed();
                let mut viewer = loader.viewer.borrow_mut();
                let mut overlay = loader.overlay.borrow_mut();
                match result {
                    Ok(len) => {
                        log::info!("[loading] fetched {} ({} bytes)", url, len);
                        viewer.on_asset_finished(&url, now, &mut *overlay);
                    }
                    Err(e) => {
                        log::warn!("[loading] {}: {:?}", url, e);
                        viewer.on_asset_failed(&url, now, &mut *overlay);
                    }
                }
            });
        }
    }
}

async fn fetch_bytes(url: &str) -> anyhow::Result<u32> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::SameOrigin);
    let request = web::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !response.ok() {
        anyhow::bail!("HTTP {}", response.status());
    }
    if let Ok(Some(len)) = response.headers().get("content-length") {
        log::debug!("[loading] {} reports {} bytes", url, len);
    }

    let buffer = JsFuture::from(
        response
            .array_buffer()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(js_sys::ArrayBuffer::from(buffer).byte_length())
}
