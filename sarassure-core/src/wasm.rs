//! WebAssembly bindings for sarassure-core.
//!
//! The web player mounts one [`WasmStep`] per displayed step and
//! exchanges props, events and outcomes as JSON.

use wasm_bindgen::prelude::*;

use crate::{ContainerRect, ExerciseStep, GestureConfig, InputEvent};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Exercise step instance for WASM.
#[wasm_bindgen]
pub struct WasmStep {
    step: ExerciseStep,
}

#[wasm_bindgen]
impl WasmStep {
    /// Mount a step from its JSON props with default thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error string if the props are malformed or invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(props_json: &str) -> Result<WasmStep, String> {
        let step =
            ExerciseStep::from_json(props_json, GestureConfig::default()).map_err(|e| e.to_string())?;
        Ok(Self { step })
    }

    /// Mount a step with thresholds given as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if either document is malformed or invalid.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(props_json: &str, config_json: &str) -> Result<WasmStep, String> {
        let config = GestureConfig::from_json(config_json).map_err(|e| e.to_string())?;
        let step = ExerciseStep::from_json(props_json, config).map_err(|e| e.to_string())?;
        Ok(Self { step })
    }

    /// Record the image container's client rectangle.
    #[wasm_bindgen(js_name = setContainer)]
    pub fn set_container(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.step
            .set_container(ContainerRect::new(left, top, width, height));
    }

    /// Handle one input event given as JSON. Returns the outcomes as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error string if the event JSON is malformed.
    #[wasm_bindgen(js_name = handleEventJson)]
    pub fn handle_event_json(&mut self, json: &str) -> Result<String, String> {
        let event: InputEvent = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let outcomes = self.step.handle(&event);
        serde_json::to_string(&outcomes).map_err(|e| e.to_string())
    }

    /// Fire due timers. Returns the outcomes as a JSON array.
    #[must_use]
    pub fn tick(&mut self, now_ms: u64) -> String {
        serde_json::to_string(&self.step.tick(now_ms)).unwrap_or_else(|_| "[]".to_string())
    }

    /// Earliest pending timer deadline.
    #[wasm_bindgen(js_name = nextDeadline)]
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.step.next_deadline()
    }

    /// Current render model as JSON.
    #[wasm_bindgen(js_name = getViewJson)]
    #[must_use]
    pub fn get_view_json(&self) -> String {
        serde_json::to_string(&self.step.view()).unwrap_or_default()
    }

    /// Magnifier lens for the rendered image size, as JSON (`null` when hidden).
    #[wasm_bindgen(js_name = getLensJson)]
    #[must_use]
    pub fn get_lens_json(&self, image_width: f32, image_height: f32) -> String {
        serde_json::to_string(&self.step.lens(image_width, image_height))
            .unwrap_or_else(|_| "null".to_string())
    }

    /// Consecutive failures since the last success.
    #[must_use]
    pub fn failures(&self) -> u32 {
        self.step.attempts().failures()
    }

    /// Close the hint banner.
    #[wasm_bindgen(js_name = dismissHint)]
    pub fn dismiss_hint(&mut self) {
        self.step.dismiss_hint();
    }

    /// Toggle the magnifier.
    #[wasm_bindgen(js_name = toggleZoom)]
    pub fn toggle_zoom(&mut self) -> bool {
        self.step.toggle_zoom()
    }

    /// Tear the step down before the next one mounts.
    pub fn unmount(&mut self) {
        self.step.unmount();
    }
}
