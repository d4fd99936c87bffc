//! Entry points: browser auto-boot and the native headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod boot {
    use std::cell::RefCell;

    use voidfield::platform::FieldAnimator;
    use voidfield::{FieldConfig, QualityPreset};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    /// Canvas id the auto-boot looks for.
    const CANVAS_ID: &str = "blackhole";

    thread_local! {
        /// Keeps the auto-booted animator alive for the page lifetime.
        static ACTIVE: RefCell<Option<FieldAnimator>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Voidfield starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(element) = document.get_element_by_id(CANVAS_ID) else {
            log::info!("no #{CANVAS_ID} canvas on this page, standing by");
            return Ok(());
        };

        // data-config (full JSON) wins over data-quality (preset name)
        let config = match element.get_attribute("data-config") {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| JsValue::from_str(&format!("invalid data-config: {e}")))?,
            None => element
                .get_attribute("data-quality")
                .and_then(|name| QualityPreset::from_str(&name))
                .map(FieldConfig::from_preset)
                .unwrap_or_default(),
        };

        let canvas: HtmlCanvasElement = element.dyn_into()?;
        let animator = FieldAnimator::with_config(canvas, config)?;
        animator.start();
        ACTIVE.with(|slot| *slot.borrow_mut() = Some(animator));

        log::info!("Voidfield running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    boot::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    // args: [frames] [preset name | config.json path]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let frames: u64 = args.first().and_then(|arg| arg.parse().ok()).unwrap_or(600);
    let config = args.get(1).map(|arg| load_config(arg)).unwrap_or_default();

    run_headless(config, frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(arg: &str) -> voidfield::FieldConfig {
    use voidfield::{FieldConfig, QualityPreset};

    if let Some(preset) = QualityPreset::from_str(arg) {
        return FieldConfig::from_preset(preset);
    }
    match std::fs::read_to_string(arg) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("bad config in {arg}: {e}, using reference config");
                FieldConfig::default()
            }
        },
        Err(e) => {
            log::warn!("cannot read {arg}: {e}, using reference config");
            FieldConfig::default()
        }
    }
}

/// Drives the field without a browser and prints draw statistics.
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(config: voidfield::FieldConfig, frames: u64) {
    use std::time::{SystemTime, UNIX_EPOCH};

    use voidfield::field::{FieldState, advance};
    use voidfield::render::{RecordingSurface, draw_field};

    const WIDTH: f32 = 960.0;
    const HEIGHT: f32 = 540.0;

    let seed = config.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    log::info!("Voidfield headless: {} frames, seed {}", frames, seed);

    let mut state = FieldState::new(config, seed, WIDTH, HEIGHT);
    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);

    let mut wraps = 0u64;
    let mut prev = state.discs[0].progress;
    for _ in 0..frames {
        advance(&mut state);
        draw_field(&state, &mut surface);
        let now = state.discs[0].progress;
        if now < prev {
            wraps += 1;
        }
        prev = now;
    }

    let (lo, hi) = state.discs.iter().fold((1.0f32, 0.0f32), |(lo, hi), d| {
        (lo.min(d.progress), hi.max(d.progress))
    });

    println!("frames        {}", surface.frames);
    println!("discs         {}", state.discs.len());
    println!("dots          {}", state.dots.len());
    println!("progress      {lo:.4}..{hi:.4}");
    println!("disc 0 wraps  {wraps}");
    println!(
        "ring strokes  {} ({}/frame avg)",
        surface.total_ellipses,
        surface.total_ellipses / surface.frames.max(1)
    );
    println!(
        "dot fills     {} ({}/frame avg)",
        surface.total_circles,
        surface.total_circles / surface.frames.max(1)
    );
}
