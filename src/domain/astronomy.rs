//! Closed-form lunar phase approximation.
//!
//! Phase is the fraction of the synodic month elapsed since a known new moon.
//! Good to within a day or so, which is all an almanac page needs.

use std::f64::consts::TAU;

use chrono::{DateTime, Duration, TimeZone, Utc};

pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_67;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Reference new moon: 2000-01-06T18:14:00Z.
#[must_use]
pub fn reference_new_moon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoonPhaseName {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhaseName {
    #[must_use]
    pub fn from_phase(phase: f64) -> Self {
        if !(0.03..=0.97).contains(&phase) {
            Self::New
        } else if phase < 0.22 {
            Self::WaxingCrescent
        } else if phase < 0.28 {
            Self::FirstQuarter
        } else if phase < 0.47 {
            Self::WaxingGibbous
        } else if phase < 0.53 {
            Self::Full
        } else if phase < 0.72 {
            Self::WaningGibbous
        } else if phase < 0.78 {
            Self::LastQuarter
        } else {
            Self::WaningCrescent
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::Full => "Full",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }
}

/// Quarter phases listed on the almanac page, with their cycle fraction.
const QUARTER_TARGETS: [(&str, f64); 4] = [
    ("First", 0.25),
    ("Full", 0.5),
    ("Last", 0.75),
    ("New", 0.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct NextPhase {
    pub name: &'static str,
    pub at: DateTime<Utc>,
}

impl NextPhase {
    /// Short month/day label, e.g. `Jan 6`.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.at.format("%b %-d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoonData {
    /// Fraction of the synodic cycle, in `[0, 1)`.
    pub phase: f64,
    pub phase_name: MoonPhaseName,
    /// Illuminated fraction as a whole percentage.
    pub illumination: u8,
    /// The four upcoming quarter phases, soonest first.
    pub next_phases: Vec<NextPhase>,
}

#[must_use]
pub fn moon_data(now: DateTime<Utc>) -> MoonData {
    let phase = cycle_fraction(now);
    let illumination = (0.5 * (1.0 - (TAU * phase).cos()) * 100.0).round() as u8;

    let mut next_phases: Vec<NextPhase> = QUARTER_TARGETS
        .iter()
        .map(|&(name, target)| NextPhase {
            name,
            at: now + days_to_duration(forward_delta(phase, target) * SYNODIC_MONTH_DAYS),
        })
        .collect();
    next_phases.sort_by_key(|p| p.at);

    MoonData {
        phase,
        phase_name: MoonPhaseName::from_phase(phase),
        illumination,
        next_phases,
    }
}

fn cycle_fraction(now: DateTime<Utc>) -> f64 {
    let elapsed_ms = (now - reference_new_moon()).num_milliseconds() as f64;
    let days = elapsed_ms / MS_PER_DAY;
    let phase = days.rem_euclid(SYNODIC_MONTH_DAYS) / SYNODIC_MONTH_DAYS;
    // rem_euclid can round up to the modulus itself for tiny negative inputs.
    if phase >= 1.0 { 0.0 } else { phase }
}

/// Fraction of a cycle from `phase` forward to `target`, in `[0, 1)`.
fn forward_delta(phase: f64, target: f64) -> f64 {
    let delta = (target - phase + 1.0) % 1.0;
    if delta >= 1.0 { 0.0 } else { delta }
}

fn days_to_duration(days: f64) -> Duration {
    Duration::milliseconds((days * MS_PER_DAY).round() as i64)
}
