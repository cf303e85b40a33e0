//! Circular loupe that follows the pointer when zoom is active.
//!
//! Purely visual: it never participates in gesture classification.

use serde::{Deserialize, Serialize};

use crate::zone::ContainerRect;

/// Lens diameter in pixels.
pub const LENS_SIZE: f32 = 120.0;
/// Magnification factor.
pub const LENS_ZOOM: f32 = 2.0;

/// Rendering parameters of the lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensView {
    /// Lens centre X, container-local.
    pub center_x: f32,
    /// Lens centre Y, container-local.
    pub center_y: f32,
    /// Magnified image width.
    pub background_width: f32,
    /// Magnified image height.
    pub background_height: f32,
    /// Background offset X so the pointed pixel sits in the lens centre.
    pub background_x: f32,
    /// Background offset Y.
    pub background_y: f32,
}

/// Magnifier state.
#[derive(Debug, Clone, Default)]
pub struct Magnifier {
    enabled: bool,
    position: Option<(f32, f32)>,
}

impl Magnifier {
    /// Create a magnifier, enabled or not.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            position: None,
        }
    }

    /// Toggle the zoom button.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Enable or disable the magnifier.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.position = None;
        }
    }

    /// Whether zoom is active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Follow the pointer. Positions outside the container are ignored.
    pub fn track(&mut self, container: ContainerRect, x: f32, y: f32) {
        if !self.enabled {
            return;
        }
        if let Some(local) = container.local(x, y) {
            self.position = Some(local);
        }
    }

    /// Pointer left the container or the touch ended.
    pub fn hide(&mut self) {
        self.position = None;
    }

    /// Lens parameters for an image rendered at `image_width` x `image_height`.
    #[must_use]
    pub fn view(&self, image_width: f32, image_height: f32) -> Option<LensView> {
        if !self.enabled {
            return None;
        }
        let (x, y) = self.position?;
        let half = LENS_SIZE / 2.0;
        Some(LensView {
            center_x: x,
            center_y: y,
            background_width: image_width * LENS_ZOOM,
            background_height: image_height * LENS_ZOOM,
            background_x: half - x * LENS_ZOOM,
            background_y: half - y * LENS_ZOOM,
        })
    }
}
