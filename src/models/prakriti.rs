// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prakriti (constitution) classification types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One of the three constitutional types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    /// All types in tie-break priority order.
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A count per type. Used both for questionnaire scores and for the
/// admin classification distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DoshaCounts {
    #[serde(rename = "Vata", default)]
    pub vata: u32,
    #[serde(rename = "Pitta", default)]
    pub pitta: u32,
    #[serde(rename = "Kapha", default)]
    pub kapha: u32,
}

impl DoshaCounts {
    pub fn get(&self, dosha: Dosha) -> u32 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    pub fn increment(&mut self, dosha: Dosha) {
        match dosha {
            Dosha::Vata => self.vata += 1,
            Dosha::Pitta => self.pitta += 1,
            Dosha::Kapha => self.kapha += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.vata + self.pitta + self.kapha
    }

    /// The type with the highest count.
    ///
    /// Ties resolve in `Dosha::ALL` order (Vata, then Pitta, then Kapha),
    /// including the all-zero case.
    pub fn primary(&self) -> Dosha {
        let mut best = Dosha::Vata;
        for dosha in Dosha::ALL {
            if self.get(dosha) > self.get(best) {
                best = dosha;
            }
        }
        best
    }
}

/// Stored result of a questionnaire submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrakritiAnalysis {
    pub prakriti_type: Dosha,
    pub scores: DoshaCounts,
    /// Commentary from the completion service
    pub ai_insights: String,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub analyzed_at: DateTime<Utc>,
}
