//! Signal extraction for A2UI-IN.
//!
//! Pulls light, informational signals out of normalized report text:
//! - Aisle and bay numbers
//! - Leak hazard, matched anywhere in the text ("leakage" counts)
//! - Urgency ("urgent" or "critical")

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    /// "aisle 4", "aisle b12"
    static ref AISLE: Regex = Regex::new(r"\baisle\s+([a-z0-9]+(?:-[a-z0-9]+)*)").unwrap();

    /// "bay 2"
    static ref BAY: Regex = Regex::new(r"\bbay\s+([a-z0-9]+)").unwrap();

    /// Leak hazard; a substring match, so "leaking" and "leakage" both count
    static ref LEAK: Regex = Regex::new(r"leak").unwrap();

    /// Urgency keywords, also substring matches
    static ref URGENT: Regex = Regex::new(r"urgent|critical").unwrap();
}

/// An extracted signal
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Aisle(String),
    Bay(String),
    Hazard(&'static str),
    Urgency(&'static str),
}

impl Signal {
    /// Key under which the signal is reported in a `TaskIntent`
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Aisle(_) => "aisle",
            Signal::Bay(_) => "bay",
            Signal::Hazard(_) => "hazard",
            Signal::Urgency(_) => "urgency",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Signal::Aisle(v) | Signal::Bay(v) => v.as_str(),
            Signal::Hazard(v) | Signal::Urgency(v) => *v,
        }
    }
}

/// Extract all signals from normalized text
pub fn extract_signals(text: &str) -> Vec<Signal> {
    let mut signals = Vec::new();

    if let Some(cap) = AISLE.captures(text) {
        signals.push(Signal::Aisle(cap[1].to_string()));
    }

    if let Some(cap) = BAY.captures(text) {
        signals.push(Signal::Bay(cap[1].to_string()));
    }

    if LEAK.is_match(text) {
        signals.push(Signal::Hazard("leak"));
    }

    if URGENT.is_match(text) {
        signals.push(Signal::Urgency("high"));
    }

    signals
}

/// Signals keyed by name, the shape carried in `TaskIntent::extracted`
pub fn signal_map(text: &str) -> BTreeMap<String, String> {
    extract_signals(text)
        .into_iter()
        .map(|s| (s.name().to_string(), s.value().to_string()))
        .collect()
}
