//! # SARASSURE Core
//!
//! Exercise-player logic for the SARASSURE digital-literacy trainer.
//! A learner sees a screenshot of a phone screen and must perform the
//! gesture the step expects, inside the highlighted action zone.
//! Compiles to WASM for the web player.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              sarassure-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Input           │  Classification          │
//! │  - Pointer track │  - Tap / double-tap      │
//! │  - Drag events   │  - Long-press timer      │
//! │  - Text entry    │  - Swipe / scroll        │
//! ├─────────────────────────────────────────────┤
//! │  Action zone     │  Feedback                │
//! │  - Percent geom  │  - Attempts and hint     │
//! │  - Hit testing   │  - Zone style / magnifier│
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The entry point is [`ExerciseStep`]: feed it [`InputEvent`]s and it
//! reports [`InteractionOutcome`]s.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod classifier;
pub mod config;
pub mod error;
pub mod event;
pub mod feedback;
pub mod hint;
pub mod image;
pub mod magnifier;
pub mod step;
pub mod text_entry;
pub mod timer;
pub mod tracker;
pub mod zone;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use action::ActionType;
pub use classifier::{classify, Gesture, RejectReason, SwipeDirection, Verdict};
pub use config::GestureConfig;
pub use error::{ExerciseError, ExerciseResult};
pub use event::{InputEvent, PointerEvent, PointerPhase};
pub use feedback::{Animation, Rgba, ZoneStyle};
pub use hint::{AttemptCounter, HintMessage};
pub use image::{ImageId, ImageResolver, ImageState, StorageImageResolver};
pub use magnifier::{LensView, Magnifier};
pub use step::{
    ExerciseStep, InteractionOutcome, PendingReason, StepId, StepProps, StepView, TextEntryView,
    ZoneView,
};
pub use text_entry::{EntryKind, TextEntry};
pub use timer::{TimerHandle, TimerQueue};
pub use tracker::{DoubleTapMemory, GestureAttempt, PointerTracker};
pub use zone::{ActionZone, ContainerRect, ZoneRect, ZoneShape};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
