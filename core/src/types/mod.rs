//! Core type definitions for adrenal mass assessment
//!
//! This module provides the fundamental types used throughout the library:
//! - [`InputRecord`]: Validated findings for one mass
//! - [`ReferralReason`], [`GrowthPattern`], [`Heterogeneity`]: Categorical findings
//! - [`TriageLabel`]: Coarse color-coded triage outcome
//! - [`EvidenceSet`]: Benign and malignant supporting features
//! - [`RuleConfig`]: Tunable rule thresholds

mod config;
mod enums;
mod evidence;
mod input;

pub use config::{RuleConfig, DEFAULT_ENHANCEMENT_THRESHOLD_HU, DEFAULT_HEMATOMA_NOTE_DELTA_HU};
pub use enums::{GrowthPattern, Heterogeneity, ReferralReason, TriageLabel};
pub use evidence::EvidenceSet;
pub use input::InputRecord;
