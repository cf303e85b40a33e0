//! Visual feedback for the action zone: colours, border and guidance animation.
//!
//! Everything here is a pure function of the zone, the action type and
//! whether the zone is hidden.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::ActionType;
use crate::error::{ExerciseError, ExerciseResult};
use crate::zone::{ActionZone, ZoneShape};

const DEFAULT_BACKGROUND: &str = "rgba(59, 130, 246, 0.3)";
const DEFAULT_BORDER: &str = "rgba(59, 130, 246, 0.5)";
const DEFAULT_ANIMATION: &str = "rgba(59, 130, 246, 0.3)";

const HIDDEN_BACKGROUND_ALPHA: f32 = 0.02;
const HIDDEN_BORDER_ALPHA: f32 = 0.1;

/// An sRGB colour with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (0-1).
    pub a: f32,
}

impl Rgba {
    /// Same colour with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = ExerciseError;

    /// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    fn from_str(s: &str) -> ExerciseResult<Self> {
        let s = s.trim();
        let invalid = || ExerciseError::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let (body, with_alpha) = if let Some(body) = s.strip_prefix("rgba(") {
            (body, true)
        } else if let Some(body) = s.strip_prefix("rgb(") {
            (body, false)
        } else {
            return Err(invalid());
        };

        let parts: Vec<&str> = body
            .strip_suffix(')')
            .ok_or_else(invalid)?
            .split(',')
            .map(str::trim)
            .collect();

        match (parts.as_slice(), with_alpha) {
            ([r, g, b], false) => Ok(Self {
                r: r.parse().map_err(|_| invalid())?,
                g: g.parse().map_err(|_| invalid())?,
                b: b.parse().map_err(|_| invalid())?,
                a: 1.0,
            }),
            ([r, g, b, a], true) => Ok(Self {
                r: r.parse().map_err(|_| invalid())?,
                g: g.parse().map_err(|_| invalid())?,
                b: b.parse().map_err(|_| invalid())?,
                a: a.parse().map_err(|_| invalid())?,
            }),
            _ => Err(invalid()),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Rgba {
            r: channel(hex.get(0..2)?)?,
            g: channel(hex.get(2..4)?)?,
            b: channel(hex.get(4..6)?)?,
            a: 1.0,
        }),
        3 => {
            let double = |i: usize| hex.get(i..=i).map(|c| c.repeat(2));
            Some(Rgba {
                r: channel(&double(0)?)?,
                g: channel(&double(1)?)?,
                b: channel(&double(2)?)?,
                a: 1.0,
            })
        }
        _ => None,
    }
}

/// Inject `alpha` into a CSS colour. Colours that can't be parsed
/// (named colours, `hsl()`, ...) are passed through unchanged.
#[must_use]
pub fn with_opacity(color: &str, alpha: f32) -> String {
    color.parse::<Rgba>().map_or_else(
        |_| color.to_string(),
        |rgba| rgba.with_alpha(alpha).to_string(),
    )
}

/// Resolved CSS for the zone element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneStyle {
    /// Background colour.
    pub background: String,
    /// Border declaration, `None` when the border is disabled.
    pub border: Option<String>,
    /// Corner radius.
    pub border_radius: &'static str,
    /// Pointer cursor.
    pub cursor: &'static str,
}

/// Style for `zone` on a step expecting `action`.
#[must_use]
pub fn zone_style(zone: &ActionZone, action: ActionType, hidden: bool) -> ZoneStyle {
    let background_alpha = if hidden {
        HIDDEN_BACKGROUND_ALPHA
    } else {
        zone.opacity
    };
    let background = with_opacity(
        zone.color.as_deref().unwrap_or(DEFAULT_BACKGROUND),
        background_alpha,
    );

    let border = zone.show_border.then(|| {
        let color = zone.color.as_deref().unwrap_or(DEFAULT_BORDER);
        if hidden {
            format!("1px dashed {}", with_opacity(color, HIDDEN_BORDER_ALPHA))
        } else {
            format!("2px dashed {color}")
        }
    });

    ZoneStyle {
        background,
        border,
        border_radius: match zone.shape {
            ZoneShape::Ellipse => "50%",
            ZoneShape::Rectangle => "8px",
        },
        cursor: if action == ActionType::DragAndDrop {
            "grab"
        } else {
            "pointer"
        },
    }
}

/// Colour of the guidance pulse.
#[must_use]
pub fn animation_color(zone: &ActionZone) -> &str {
    zone.animation_color.as_deref().unwrap_or(DEFAULT_ANIMATION)
}

/// Keyframed guidance animation for the zone. Each track is a
/// start/middle/end triple looped over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Opacity keyframes.
    pub opacity: [f32; 3],
    /// Horizontal offset keyframes in pixels.
    pub offset_x: Option<[f32; 3]>,
    /// Vertical offset keyframes in pixels.
    pub offset_y: Option<[f32; 3]>,
    /// Scale keyframes.
    pub scale: Option<[f32; 3]>,
    /// Border width keyframes in pixels.
    pub border_width: Option<[f32; 3]>,
    /// Loop duration, zero for a still zone.
    pub duration_ms: u32,
}

impl Animation {
    const fn pulse(opacity: [f32; 3], duration_ms: u32) -> Self {
        Self {
            opacity,
            offset_x: None,
            offset_y: None,
            scale: None,
            border_width: None,
            duration_ms,
        }
    }

    /// No animation, fully opaque.
    #[must_use]
    pub const fn still() -> Self {
        Self::pulse([1.0, 1.0, 1.0], 0)
    }

    /// Whether the zone animates at all.
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        self.duration_ms > 0
    }
}

/// Guidance animation for `action`. Hidden zones don't animate.
#[must_use]
pub fn animation_for(action: ActionType, hidden: bool) -> Animation {
    const BLINK: [f32; 3] = [0.5, 1.0, 0.5];
    const TOWARDS_NEGATIVE: [f32; 3] = [10.0, -20.0, 10.0];
    const TOWARDS_POSITIVE: [f32; 3] = [-10.0, 20.0, -10.0];

    if hidden {
        return Animation::still();
    }

    match action {
        ActionType::LongPress => Animation::pulse([0.4, 0.9, 0.4], 3000),
        ActionType::SwipeLeft => Animation {
            offset_x: Some(TOWARDS_NEGATIVE),
            ..Animation::pulse(BLINK, 2000)
        },
        ActionType::SwipeRight => Animation {
            offset_x: Some(TOWARDS_POSITIVE),
            ..Animation::pulse(BLINK, 2000)
        },
        ActionType::SwipeUp => Animation {
            offset_y: Some(TOWARDS_NEGATIVE),
            ..Animation::pulse(BLINK, 2000)
        },
        ActionType::SwipeDown | ActionType::Scroll => Animation {
            offset_y: Some(TOWARDS_POSITIVE),
            ..Animation::pulse(BLINK, 2000)
        },
        ActionType::DragAndDrop => Animation {
            scale: Some([1.0, 1.05, 1.0]),
            ..Animation::pulse(BLINK, 2000)
        },
        ActionType::TextInput | ActionType::NumberInput => Animation {
            border_width: Some([1.0, 3.0, 1.0]),
            ..Animation::pulse([0.3, 1.0, 0.3], 2500)
        },
        ActionType::Tap | ActionType::DoubleTap | ActionType::Bravo | ActionType::Unknown => {
            Animation::pulse(BLINK, 2500)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_formats() {
        let hex: Rgba = "#3b82f6".parse().unwrap();
        assert_eq!((hex.r, hex.g, hex.b), (59, 130, 246));

        let short: Rgba = "#f00".parse().unwrap();
        assert_eq!((short.r, short.g, short.b), (255, 0, 0));

        let rgb: Rgba = "rgb(1, 2, 3)".parse().unwrap();
        assert!((rgb.a - 1.0).abs() < f32::EPSILON);

        let rgba: Rgba = "rgba(10,20,30,0.5)".parse().unwrap();
        assert!((rgba.a - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_malformed_colours() {
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("rgb(1, 2)".parse::<Rgba>().is_err());
        assert!("rgba(1, 2, 3)".parse::<Rgba>().is_err());
        assert!("rgb(300, 0, 0)".parse::<Rgba>().is_err());
        assert!(matches!("red".parse::<Rgba>(), Err(ExerciseError::InvalidColor(_))));
    }

    #[test]
    fn opacity_injection_normalizes_to_rgba() {
        assert_eq!(with_opacity("#ff0000", 0.3), "rgba(255, 0, 0, 0.3)");
        assert_eq!(with_opacity("rgb(1, 2, 3)", 0.5), "rgba(1, 2, 3, 0.5)");
        assert_eq!(with_opacity("rgba(1, 2, 3, 0.9)", 0.25), "rgba(1, 2, 3, 0.25)");
        assert_eq!(with_opacity("tomato", 0.5), "tomato");
    }

    #[test]
    fn default_style() {
        let zone = ActionZone::new(50.0, 50.0, 10.0, 10.0);
        let style = zone_style(&zone, ActionType::Tap, false);
        assert_eq!(style.background, "rgba(59, 130, 246, 0.3)");
        assert_eq!(style.border.as_deref(), Some("2px dashed rgba(59, 130, 246, 0.5)"));
        assert_eq!(style.border_radius, "8px");
        assert_eq!(style.cursor, "pointer");
    }

    #[test]
    fn admin_colour_and_opacity_applied() {
        let mut zone = ActionZone::new(50.0, 50.0, 10.0, 10.0)
            .with_color("#00ff00")
            .with_shape(ZoneShape::Ellipse);
        zone.opacity = 0.6;
        let style = zone_style(&zone, ActionType::DragAndDrop, false);
        assert_eq!(style.background, "rgba(0, 255, 0, 0.6)");
        assert_eq!(style.border.as_deref(), Some("2px dashed #00ff00"));
        assert_eq!(style.border_radius, "50%");
        assert_eq!(style.cursor, "grab");
    }

    #[test]
    fn hidden_zone_is_faint() {
        let zone = ActionZone::new(50.0, 50.0, 10.0, 10.0).with_color("rgb(10, 20, 30)");
        let style = zone_style(&zone, ActionType::Tap, true);
        assert_eq!(style.background, "rgba(10, 20, 30, 0.02)");
        assert_eq!(style.border.as_deref(), Some("1px dashed rgba(10, 20, 30, 0.1)"));
    }

    #[test]
    fn border_can_be_disabled() {
        let mut zone = ActionZone::new(50.0, 50.0, 10.0, 10.0);
        zone.show_border = false;
        assert!(zone_style(&zone, ActionType::Tap, false).border.is_none());
    }

    #[test]
    fn animation_table() {
        let swipe = animation_for(ActionType::SwipeLeft, false);
        assert_eq!(swipe.offset_x, Some([10.0, -20.0, 10.0]));
        assert_eq!(swipe.duration_ms, 2000);

        let scroll = animation_for(ActionType::Scroll, false);
        assert_eq!(scroll.offset_y, Some([-10.0, 20.0, -10.0]));

        let long = animation_for(ActionType::LongPress, false);
        assert_eq!(long.opacity, [0.4, 0.9, 0.4]);

        let fallback = animation_for(ActionType::Unknown, false);
        assert_eq!(fallback, animation_for(ActionType::Tap, false));

        assert!(!animation_for(ActionType::SwipeUp, true).is_animated());
    }

    #[test]
    fn animation_colour_default() {
        let mut zone = ActionZone::new(50.0, 50.0, 10.0, 10.0);
        assert_eq!(animation_color(&zone), "rgba(59, 130, 246, 0.3)");
        zone.animation_color = Some("#fff".into());
        assert_eq!(animation_color(&zone), "#fff");
    }
}
