//! Saving drawings
//!
//! The browser side tries the Web Share API first (mobile) and falls back to
//! a plain download.

use rand::Rng;

/// Make a safe `.png` filename: drop an existing image extension, replace
/// anything outside `[A-Za-z0-9-_]` with `-`, collapse dash runs.
pub fn sanitize_filename(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    let stem = [".png", ".jpg", ".jpeg"]
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map(|ext| &name[..name.len() - ext.len()])
        .unwrap_or(name);

    let mut clean = String::with_capacity(stem.len() + 4);
    for c in stem.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            c
        } else {
            '-'
        };
        if c == '-' && clean.ends_with('-') {
            continue;
        }
        clean.push(c);
    }
    clean.push_str(".png");
    clean
}

/// Fun names for kid drawings
const FUN_NAMES: [&str; 5] = ["masterpiece", "artwork", "creation", "picture", "doodle"];

/// `my-<fun name>-<HHMM>` for a local wall-clock time
pub fn drawing_filename(hour: u32, minute: u32, rng: &mut impl Rng) -> String {
    let name = FUN_NAMES[rng.random_range(0..FUN_NAMES.len())];
    format!("my-{}-{:02}{:02}", name, hour, minute)
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    // Web Share with files is not in web-sys stable, so go through JS
    #[wasm_bindgen(inline_js = "
        export async function share_or_download(canvas, filename) {
            const blob = await new Promise((resolve, reject) => {
                canvas.toBlob((b) => b ? resolve(b) : reject(new Error('toBlob failed')), 'image/png');
            });
            if (navigator.share && navigator.canShare) {
                const file = new File([blob], filename, { type: 'image/png' });
                const data = { files: [file] };
                try {
                    if (navigator.canShare(data)) {
                        await navigator.share(data);
                        return 'shared';
                    }
                } catch (e) {
                    // cancelled or refused, download instead
                }
            }
            const url = URL.createObjectURL(blob);
            const link = document.createElement('a');
            link.href = url;
            link.download = filename;
            document.body.appendChild(link);
            link.click();
            document.body.removeChild(link);
            URL.revokeObjectURL(url);
            return 'downloaded';
        }
    ")]
    extern "C" {
        #[wasm_bindgen(catch)]
        async fn share_or_download(
            canvas: &web_sys::HtmlCanvasElement,
            filename: &str,
        ) -> Result<JsValue, JsValue>;
    }

    /// Share or download the canvas as a PNG (fire-and-forget)
    pub fn export_canvas(canvas: web_sys::HtmlCanvasElement, filename: &str) {
        let filename = super::sanitize_filename(filename);
        wasm_bindgen_futures::spawn_local(async move {
            match share_or_download(&canvas, &filename).await {
                Ok(how) => log::info!("Drawing {:?} as {}", how.as_string(), filename),
                Err(e) => log::warn!("Could not export drawing: {:?}", e),
            }
        });
    }

    /// Local wall-clock (hour, minute)
    pub fn local_time() -> (u32, u32) {
        let date = js_sys::Date::new_0();
        (date.get_hours(), date.get_minutes())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{export_canvas, local_time};
