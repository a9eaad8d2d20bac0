//! # Expo Admin Dashboard
//!
//! Administration screens for a trade-show event: the conference schedule
//! (with a participant's reservations), and the exhibitor, organizer and room
//! tables.
//!
//! Every screen runs the same pipeline from `expo-admin-core` over records
//! fetched from the remote event API:
//!
//! ```text
//! DashboardClient ──▶ ApiSource<T> ──▶ ListReducer<T> ──▶ render_table / schedule
//!        │                                  ▲
//!        └──▶ ReservationFlags ─────────────┘ (conference schedule only)
//! ```
//!
//! The remote API owns every business rule (quotas, double booking); this
//! crate only reads, filters and pages what it returns.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod screens;
pub mod types;

pub use client::{ApiSource, DashboardClient, ReservationFlags, Resource};
pub use config::Config;
pub use error::{ApiError, ConfigError, RecordError};
pub use types::*;
