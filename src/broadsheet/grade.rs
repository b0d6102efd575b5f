use serde::Serialize;
use std::fmt;

use crate::utils::round_to_one_decimal;

/// Letter grade for a subject's total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Grades a total rounded to one decimal place.
    ///
    /// | total      | grade |
    /// |------------|-------|
    /// | 85 and up  | A     |
    /// | 70 - 84.9  | B     |
    /// | 55 - 69.9  | C     |
    /// | 50 - 54.9  | D     |
    /// | 45 - 49.9  | E     |
    /// | below 45   | F     |
    pub fn from_score(score: f64) -> Self {
        let score = round_to_one_decimal(score);
        if score >= 85.0 {
            Grade::A
        } else if score >= 70.0 {
            Grade::B
        } else if score >= 55.0 {
            Grade::C
        } else if score >= 50.0 {
            Grade::D
        } else if score >= 45.0 {
            Grade::E
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn get_grade(score: Option<f64>) -> Option<Grade> {
    score.map(Grade::from_score)
}
