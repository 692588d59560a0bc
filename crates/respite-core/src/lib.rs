//! # Respite Core Library
//!
//! This library provides the core business logic for Respite, a configurable
//! break reminder. It implements a CLI-first philosophy where the whole engine
//! is available to a headless host process, with any GUI being a thin
//! presentation layer over the same core library.
//!
//! ## Architecture
//!
//! - **Break Scheduler**: a wall-clock-based state machine that requires the
//!   host to invoke `tick()` on a fixed period (one second by default)
//! - **Settings**: TOML-backed configuration consumed through an injected
//!   `SettingsStore`, so the engine never reaches for ambient globals
//! - **Service facade**: the only externally visible surface -- inbound
//!   operations plus a broadcast channel of [`Event`]s
//!
//! ## Key Components
//!
//! - [`BreakScheduler`]: the break scheduling state machine
//! - [`BreakService`]: async facade wrapping the scheduler for hosts
//! - [`Settings`] / [`SettingsStore`]: configuration model and store
//! - [`select_next`]: message selection pipeline (random / sequential)

pub mod clock;
pub mod collaborators;
pub mod error;
pub mod events;
pub mod hours;
pub mod idle;
pub mod messages;
pub mod rotation;
pub mod service;
pub mod settings;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collaborators::{BreakPresenter, Notifier, NullNotifier, NullPresenter};
pub use error::{CoreError, SettingsError, ValidationError};
pub use events::Event;
pub use hours::{is_within_working_hours, DayHours, TimeRange, WorkingHours};
pub use idle::{IdleMonitor, IdleState, ManualIdleMonitor, NullIdleMonitor};
pub use messages::{
    fallback_message, select_next, Attachment, BreakMessage, RotationState, Selection,
    SelectionMode,
};
pub use service::BreakService;
pub use settings::{
    MemorySettingsStore, PresentationMode, Settings, SettingsStore,
};
pub use storage::FileSettingsStore;
pub use timer::{BreakScheduler, BreakSession, PostponeKind, SchedulerPhase};
