use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

pub const ASSET_PATHS: &[&str] = &["textures/cayley_interior_4k.hdr"];

pub enum AssetMessage {
    Loaded { url: String, bytes: usize },
    Failed { url: String, reason: String },
}

/// Reads every asset under `root` on a worker thread. Results arrive on the
/// returned channel in completion order.
pub fn spawn_loader(root: PathBuf, urls: &[&str]) -> Receiver<AssetMessage> {
    let (tx, rx) = mpsc::channel();
    let urls: Vec<String> = urls.iter().map(|u| u.to_string()).collect();
    thread::spawn(move || {
        for url in urls {
            let msg = match std::fs::read(root.join(&url)) {
                Ok(data) => AssetMessage::Loaded {
                    url,
                    bytes: data.len(),
                },
                Err(e) => AssetMessage::Failed {
                    url,
                    reason: e.to_string(),
                },
            };
            if tx.send(msg).is_err() {
                return;
            }
        }
    });
    rx
}
