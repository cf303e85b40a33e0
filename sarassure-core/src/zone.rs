//! Action zones - the admin-defined regions a gesture must start in.
//!
//! Zone geometry is expressed in percent of the image container. The
//! percent position is the zone *centre*, matching how the player
//! renders the zone (translated by half its size).

use serde::{Deserialize, Deserializer, Serialize};

use crate::action::ActionType;
use crate::error::{ExerciseError, ExerciseResult};

/// Outline of an action zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneShape {
    /// Ellipse inscribed in the zone box.
    Ellipse,
    /// Rounded rectangle. Any shape other than an ellipse is drawn as one.
    #[default]
    #[serde(alias = "rect", other)]
    Rectangle,
}

fn default_opacity() -> f32 {
    0.3
}

fn default_true() -> bool {
    true
}

/// An admin-defined interactive region over a step screenshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawZone")]
pub struct ActionZone {
    /// Horizontal centre, percent of container width.
    pub x_percent: f32,
    /// Vertical centre, percent of container height.
    pub y_percent: f32,
    /// Width, percent of container width.
    pub width_percent: f32,
    /// Height, percent of container height.
    pub height_percent: f32,
    /// Outline shape. Membership always uses the bounding box.
    pub shape: ZoneShape,
    /// CSS colour (hex, `rgb()` or `rgba()`).
    pub color: Option<String>,
    /// Background opacity (0-1).
    pub opacity: f32,
    /// Whether a dashed border is drawn.
    pub show_border: bool,
    /// Pulse colour used by the guidance animation.
    pub animation_color: Option<String>,
    /// Icon drawn in the middle of the zone (`library:name`).
    pub icon_name: Option<String>,
    /// Expected typed value.
    pub expected_input: Option<String>,
    /// Expected typed value (legacy name).
    pub expected_text: Option<String>,
    /// Expected typed value (legacy name).
    pub expected_value: Option<String>,
    /// Expected typed value (legacy name).
    pub value: Option<String>,
}

/// Zone as stored. The area editor saves its pixel-space `x`/`y`/`width`/`height`
/// next to the percent fields, so each spelling is read separately and the
/// percent one wins.
#[derive(Deserialize)]
struct RawZone {
    #[serde(default)]
    x_percent: Option<f32>,
    #[serde(default, rename = "xPercent")]
    x_percent_camel: Option<f32>,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y_percent: Option<f32>,
    #[serde(default, rename = "yPercent")]
    y_percent_camel: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
    #[serde(default)]
    width_percent: Option<f32>,
    #[serde(default, rename = "widthPercent")]
    width_percent_camel: Option<f32>,
    #[serde(default)]
    width: Option<f32>,
    #[serde(default)]
    height_percent: Option<f32>,
    #[serde(default, rename = "heightPercent")]
    height_percent_camel: Option<f32>,
    #[serde(default)]
    height: Option<f32>,
    #[serde(default)]
    shape: Option<ZoneShape>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    opacity: Option<f32>,
    #[serde(default, alias = "showBorder")]
    show_border: Option<bool>,
    #[serde(default, alias = "animationColor")]
    animation_color: Option<String>,
    #[serde(default, alias = "iconName")]
    icon_name: Option<String>,
    #[serde(default, alias = "expectedInput", deserialize_with = "string_or_number")]
    expected_input: Option<String>,
    #[serde(default, alias = "expectedText", deserialize_with = "string_or_number")]
    expected_text: Option<String>,
    #[serde(default, alias = "expectedValue", deserialize_with = "string_or_number")]
    expected_value: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    value: Option<String>,
}

impl From<RawZone> for ActionZone {
    fn from(raw: RawZone) -> Self {
        let pick = |snake: Option<f32>, camel: Option<f32>, short: Option<f32>| {
            snake.or(camel).or(short).unwrap_or(0.0)
        };
        Self {
            x_percent: pick(raw.x_percent, raw.x_percent_camel, raw.x),
            y_percent: pick(raw.y_percent, raw.y_percent_camel, raw.y),
            width_percent: pick(raw.width_percent, raw.width_percent_camel, raw.width),
            height_percent: pick(raw.height_percent, raw.height_percent_camel, raw.height),
            shape: raw.shape.unwrap_or_default(),
            color: raw.color,
            opacity: raw.opacity.unwrap_or_else(default_opacity),
            show_border: raw.show_border.unwrap_or_else(default_true),
            animation_color: raw.animation_color,
            icon_name: raw.icon_name,
            expected_input: raw.expected_input,
            expected_text: raw.expected_text,
            expected_value: raw.expected_value,
            value: raw.value,
        }
    }
}

/// Number-input zones are sometimes stored with a bare JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl ActionZone {
    /// Create a rectangular zone centred at `(x, y)` percent.
    #[must_use]
    pub fn new(x_percent: f32, y_percent: f32, width_percent: f32, height_percent: f32) -> Self {
        Self {
            x_percent,
            y_percent,
            width_percent,
            height_percent,
            shape: ZoneShape::Rectangle,
            color: None,
            opacity: default_opacity(),
            show_border: true,
            animation_color: None,
            icon_name: None,
            expected_input: None,
            expected_text: None,
            expected_value: None,
            value: None,
        }
    }

    /// Set the shape.
    #[must_use]
    pub fn with_shape(mut self, shape: ZoneShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the admin colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the expected typed value.
    #[must_use]
    pub fn with_expected_input(mut self, expected: impl Into<String>) -> Self {
        self.expected_input = Some(expected.into());
        self
    }

    /// The expected typed value: the first of the aliased fields that is set.
    #[must_use]
    pub fn expected(&self) -> Option<&str> {
        self.expected_input
            .as_deref()
            .or(self.expected_text.as_deref())
            .or(self.expected_value.as_deref())
            .or(self.value.as_deref())
    }

    /// Check that the geometry lies within 0-100 percent.
    ///
    /// # Errors
    ///
    /// Returns [`ExerciseError::InvalidZone`] naming the offending field.
    pub fn validate(&self) -> ExerciseResult<()> {
        let fields = [
            ("x_percent", self.x_percent),
            ("y_percent", self.y_percent),
            ("width_percent", self.width_percent),
            ("height_percent", self.height_percent),
        ];
        for (name, value) in fields {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ExerciseError::InvalidZone(format!(
                    "{name} must be within 0-100, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ExerciseError::InvalidZone(format!(
                "opacity must be within 0-1, got {}",
                self.opacity
            )));
        }
        Ok(())
    }

    /// Rendered bounding box of this zone inside `container`.
    #[must_use]
    pub fn bounds(&self, container: ContainerRect) -> ZoneRect {
        let center_x = container.left + container.width * self.x_percent / 100.0;
        let center_y = container.top + container.height * self.y_percent / 100.0;
        let half_w = container.width * self.width_percent / 200.0;
        let half_h = container.height * self.height_percent / 200.0;
        ZoneRect {
            left: center_x - half_w,
            top: center_y - half_h,
            right: center_x + half_w,
            bottom: center_y + half_h,
        }
    }
}

/// Pick the zone a gesture of `action` must originate in.
#[must_use]
pub fn active_zone<'a>(
    action: ActionType,
    start_area: Option<&'a ActionZone>,
    target_area: Option<&'a ActionZone>,
) -> Option<&'a ActionZone> {
    if action.uses_start_area() {
        start_area
    } else {
        target_area
    }
}

/// Position and size of the image container in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl ContainerRect {
    /// Create a container rectangle.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Translate a pointer position to container-local coordinates,
    /// or `None` when it lies outside the container.
    #[must_use]
    pub fn local(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let lx = x - self.left;
        let ly = y - self.top;
        ((0.0..=self.width).contains(&lx) && (0.0..=self.height).contains(&ly)).then_some((lx, ly))
    }
}

/// Axis-aligned bounding box of a rendered zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl ZoneRect {
    /// Inclusive point-in-box test.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Zone membership against a possibly-unmeasured zone.
///
/// An unmeasured zone (not rendered yet) counts as containing every
/// point, so a layout race never blocks a learner's input.
#[must_use]
pub fn zone_contains(measured: Option<ZoneRect>, x: f32, y: f32) -> bool {
    measured.map_or(true, |rect| rect.contains(x, y))
}
