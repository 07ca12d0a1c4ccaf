// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixed Prakriti questionnaire and its scoring.
//!
//! Every option text embeds the name of the type it indicates, e.g.
//! `"Thin, light (Vata)"`. Scoring credits an answer to the type whose
//! name appears in the selected text.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Dosha, DoshaCounts};

/// One questionnaire item.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub question: &'static str,
    pub options: [&'static str; 3],
    pub category: &'static str,
}

/// The questionnaire, in presentation order.
pub const QUESTIONS: [Question; 10] = [
    Question {
        id: "q1",
        question: "Your body frame is:",
        options: ["Thin, light (Vata)", "Medium, muscular (Pitta)", "Large, heavy (Kapha)"],
        category: "physical",
    },
    Question {
        id: "q2",
        question: "Your skin type is:",
        options: [
            "Dry, rough, cool (Vata)",
            "Warm, oily, prone to rashes (Pitta)",
            "Thick, oily, cool (Kapha)",
        ],
        category: "physical",
    },
    Question {
        id: "q3",
        question: "Your hair is:",
        options: [
            "Dry, thin, dark (Vata)",
            "Fine, oily, early graying (Pitta)",
            "Thick, oily, wavy (Kapha)",
        ],
        category: "physical",
    },
    Question {
        id: "q4",
        question: "Your appetite is:",
        options: [
            "Irregular, variable (Vata)",
            "Strong, sharp (Pitta)",
            "Steady, can skip meals (Kapha)",
        ],
        category: "digestion",
    },
    Question {
        id: "q5",
        question: "Your sleep pattern is:",
        options: [
            "Light, interrupted (Vata)",
            "Moderate, sound (Pitta)",
            "Deep, long (Kapha)",
        ],
        category: "lifestyle",
    },
    Question {
        id: "q6",
        question: "Your energy level is:",
        options: [
            "Comes in bursts (Vata)",
            "Moderate, focused (Pitta)",
            "Steady, enduring (Kapha)",
        ],
        category: "mental",
    },
    Question {
        id: "q7",
        question: "Under stress, you tend to:",
        options: [
            "Feel anxious, worried (Vata)",
            "Become irritable, angry (Pitta)",
            "Withdraw, feel depressed (Kapha)",
        ],
        category: "mental",
    },
    Question {
        id: "q8",
        question: "Your learning style is:",
        options: [
            "Quick to learn, quick to forget (Vata)",
            "Sharp, focused (Pitta)",
            "Slow to learn, good retention (Kapha)",
        ],
        category: "mental",
    },
    Question {
        id: "q9",
        question: "Your body temperature is usually:",
        options: [
            "Cold hands and feet (Vata)",
            "Warm, dislike heat (Pitta)",
            "Moderate, tolerate cold (Kapha)",
        ],
        category: "physical",
    },
    Question {
        id: "q10",
        question: "Your decision-making is:",
        options: [
            "Quick, changeable (Vata)",
            "Decisive, confident (Pitta)",
            "Slow, methodical (Kapha)",
        ],
        category: "mental",
    },
];

/// The type named in an option text, if any.
///
/// At most one type is credited per answer; markers are checked in
/// `Dosha::ALL` order.
pub fn marker_in(option: &str) -> Option<Dosha> {
    Dosha::ALL
        .into_iter()
        .find(|dosha| option.contains(dosha.as_str()))
}

/// Score a submission keyed by question identifier.
///
/// Only the selected texts matter: unanswered questions and texts without
/// a type marker contribute nothing.
pub fn score_answers(answers: &HashMap<String, String>) -> DoshaCounts {
    let mut counts = DoshaCounts::default();
    for dosha in answers.values().filter_map(|answer| marker_in(answer)) {
        counts.increment(dosha);
    }
    counts
}
