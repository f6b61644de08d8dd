//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into core services. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::constants::{
    APPOINTMENTS_DIR_NAME, CLIENTS_DIR_NAME, DEFAULT_CLOSING_HOUR, DEFAULT_OPENING_HOUR,
    DEFAULT_SLOT_MINUTES, PETS_DIR_NAME, PRACTITIONERS_DIR_NAME,
};
use crate::scheduling;
use crate::{PracticeError, PracticeResult};
use chrono::NaiveTime;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    practice_data_dir: PathBuf,
    clinic_name: String,
    opening: NaiveTime,
    closing: NaiveTime,
    slot_minutes: u32,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        practice_data_dir: PathBuf,
        clinic_name: String,
        opening: NaiveTime,
        closing: NaiveTime,
        slot_minutes: u32,
    ) -> PracticeResult<Self> {
        if clinic_name.trim().is_empty() {
            return Err(PracticeError::InvalidInput(
                "clinic_name cannot be empty".into(),
            ));
        }
        if opening >= closing {
            return Err(PracticeError::InvalidInput(format!(
                "opening time {opening} must be before closing time {closing}"
            )));
        }
        if slot_minutes == 0 {
            return Err(PracticeError::InvalidInput(
                "slot length must be at least one minute".into(),
            ));
        }

        Ok(Self {
            practice_data_dir,
            clinic_name,
            opening,
            closing,
            slot_minutes,
        })
    }

    /// Create a config with the practice's standard hours (09:00-17:00, hourly slots).
    pub fn with_default_hours(practice_data_dir: PathBuf, clinic_name: String) -> PracticeResult<Self> {
        let opening = NaiveTime::from_hms_opt(DEFAULT_OPENING_HOUR, 0, 0)
            .expect("default opening hour is a valid time");
        let closing = NaiveTime::from_hms_opt(DEFAULT_CLOSING_HOUR, 0, 0)
            .expect("default closing hour is a valid time");
        Self::new(
            practice_data_dir,
            clinic_name,
            opening,
            closing,
            DEFAULT_SLOT_MINUTES,
        )
    }

    pub fn practice_data_dir(&self) -> &Path {
        &self.practice_data_dir
    }

    pub fn clients_dir(&self) -> PathBuf {
        self.practice_data_dir.join(CLIENTS_DIR_NAME)
    }

    pub fn pets_dir(&self) -> PathBuf {
        self.practice_data_dir.join(PETS_DIR_NAME)
    }

    pub fn practitioners_dir(&self) -> PathBuf {
        self.practice_data_dir.join(PRACTITIONERS_DIR_NAME)
    }

    pub fn appointments_dir(&self) -> PathBuf {
        self.practice_data_dir.join(APPOINTMENTS_DIR_NAME)
    }

    pub fn clinic_name(&self) -> &str {
        &self.clinic_name
    }

    pub fn opening(&self) -> NaiveTime {
        self.opening
    }

    pub fn closing(&self) -> NaiveTime {
        self.closing
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    /// The full slot sequence implied by the configured hours.
    ///
    /// Every practitioner works the same schedule; per-practitioner or
    /// per-date customisation is out of scope for this system.
    pub fn default_schedule(&self) -> Vec<NaiveTime> {
        scheduling::schedule_slots(self.opening, self.closing, self.slot_minutes)
    }
}

/// Parse a wall-clock time from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns `default`. Accepts
/// `HH:MM` (seconds are never part of practice hours).
pub fn practice_time_from_env_value(
    value: Option<String>,
    default: NaiveTime,
) -> PracticeResult<NaiveTime> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(default),
        Some(v) => NaiveTime::parse_from_str(&v, "%H:%M").map_err(|_| {
            PracticeError::InvalidInput(format!("expected a time in HH:MM form, got '{v}'"))
        }),
    }
}

/// Parse the slot length in minutes from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns the default slot length.
pub fn slot_minutes_from_env_value(value: Option<String>) -> PracticeResult<u32> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_SLOT_MINUTES),
        Some(v) => v.parse::<u32>().map_err(|_| {
            PracticeError::InvalidInput(format!("expected a slot length in minutes, got '{v}'"))
        }),
    }
}
