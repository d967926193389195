// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scoring Model
 * Legacy badge weight, exponential Risk Score and linear Health Score.
 * Informational findings never move any score.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::types::{Finding, Severity};
use std::collections::HashSet;

/// Base risk weight per finding category. Unlisted categories weigh 5.
const CATEGORY_WEIGHTS: &[(&str, f64)] = &[
    // direct data breach / credential theft
    ("apikey", 30.0),
    ("vuln", 25.0),
    // high-impact misconfigurations
    ("mixed", 20.0),
    ("form", 15.0),
    ("storage", 15.0),
    ("hidden", 15.0),
    // conditional
    ("path", 10.0),
    ("info", 8.0),
];

const DEFAULT_CATEGORY_WEIGHT: f64 = 5.0;

/// Repeat findings in a category contribute a quarter of the base weight.
const DIMINISHING_FACTOR: f64 = 0.25;

fn category_weight(category: &str) -> f64 {
    CATEGORY_WEIGHTS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, w)| *w)
        .unwrap_or(DEFAULT_CATEGORY_WEIGHT)
}

/// Legacy cumulative severity weight, shown on the badge:
/// 4 per high, 2 per medium, 1 per low.
pub fn legacy_score(findings: &[Finding]) -> u32 {
    findings
        .iter()
        .map(|f| match f.severity {
            Severity::High => 4,
            Severity::Medium => 2,
            Severity::Low => 1,
            Severity::Info => 0,
        })
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    /// Weighted sum before the saturating curve.
    pub raw: f64,
    /// 0-100, higher is worse.
    pub score: u8,
    pub level: RiskLevel,
}

/// Risk Score over non-info findings: category base weight, severity
/// multiplier (high 1.0, otherwise 0.5), diminishing returns per repeated
/// category, then a saturating exponential mapped onto 0-100.
pub fn risk(findings: &[Finding]) -> RiskAssessment {
    let mut raw = 0.0_f64;
    let mut seen_categories: HashSet<&str> = HashSet::new();

    for finding in findings {
        if finding.severity == Severity::Info {
            continue;
        }
        let category = finding.category();
        let multiplier = if finding.severity == Severity::High {
            1.0
        } else {
            0.5
        };
        let mut weight = category_weight(category) * multiplier;
        if seen_categories.contains(category) {
            weight *= DIMINISHING_FACTOR;
        }
        seen_categories.insert(category);
        raw += weight;
    }

    // Smooth curve approaching 100: raw 10 -> 18, 50 -> 63, 150 -> 95.
    let score = (100.0 * (1.0 - (-raw / 50.0).exp())).round() as u8;
    let level = if score <= 20 {
        RiskLevel::Low
    } else if score <= 50 {
        RiskLevel::Medium
    } else if score <= 75 {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    };

    RiskAssessment { raw, score, level }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthGrade {
    A,
    B,
    C,
    D,
    F,
}

impl std::fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grade = match self {
            HealthGrade::A => "A",
            HealthGrade::B => "B",
            HealthGrade::C => "C",
            HealthGrade::D => "D",
            HealthGrade::F => "F",
        };
        write!(f, "{grade}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthAssessment {
    /// 0-100, higher is better.
    pub score: u8,
    pub grade: HealthGrade,
}

/// Health Score: start at 100, subtract 15 per high, 8 per medium and 3
/// per low finding, clamp at 0.
pub fn health(findings: &[Finding]) -> HealthAssessment {
    let mut penalty = 0_i32;
    for finding in findings {
        penalty += match finding.severity {
            Severity::High => 15,
            Severity::Medium => 8,
            Severity::Low => 3,
            Severity::Info => 0,
        };
    }
    let score = (100 - penalty).max(0) as u8;
    let grade = if score >= 90 {
        HealthGrade::A
    } else if score >= 75 {
        HealthGrade::B
    } else if score >= 50 {
        HealthGrade::C
    } else if score >= 25 {
        HealthGrade::D
    } else {
        HealthGrade::F
    };

    HealthAssessment { score, grade }
}

/// Badge rendering contract for the consumer UI: legacy score capped at
/// 99, suppressed entirely at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub color: &'static str,
}

pub fn badge_for(score: u32) -> Badge {
    let text = if score > 0 {
        score.min(99).to_string()
    } else {
        String::new()
    };
    let color = if score >= 7 {
        "#D32F2F"
    } else if score >= 4 {
        "#F57C00"
    } else {
        "#388E3C"
    };
    Badge { text, color }
}
