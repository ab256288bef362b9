//! Built-in day templates.
//!
//! Each workout day is a fixed, ordered list of exercises with a target set
//! count. The lists are static data; sessions take their own copy.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::SessionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseSpec {
    pub name: String,
    pub target_sets: u32,
}

impl ExerciseSpec {
    /// Target set counts below one are raised to one.
    pub fn new(name: impl Into<String>, target_sets: u32) -> Self {
        Self {
            name: name.into(),
            target_sets: target_sets.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCode {
    Day1,
    Day2,
    Day3,
    Day4,
    Day5,
}

impl DayCode {
    pub const ALL: [DayCode; 5] = [
        DayCode::Day1,
        DayCode::Day2,
        DayCode::Day3,
        DayCode::Day4,
        DayCode::Day5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayCode::Day1 => "day1",
            DayCode::Day2 => "day2",
            DayCode::Day3 => "day3",
            DayCode::Day4 => "day4",
            DayCode::Day5 => "day5",
        }
    }

    /// Button label shown in the day menu.
    pub fn label(&self) -> &'static str {
        match self {
            DayCode::Day1 => "Day I (Lower I)",
            DayCode::Day2 => "Day II (Upper I)",
            DayCode::Day3 => "Day III (Lower II)",
            DayCode::Day4 => "Day IV (Upper II)",
            DayCode::Day5 => "Day V (Aesthetic)",
        }
    }

    pub fn from_label(label: &str) -> Option<DayCode> {
        DayCode::ALL.into_iter().find(|d| d.label() == label)
    }

    fn exercises(&self) -> &'static [(&'static str, u32)] {
        match self {
            DayCode::Day1 => DAY1,
            DayCode::Day2 => DAY2,
            DayCode::Day3 => DAY3,
            DayCode::Day4 => DAY4,
            DayCode::Day5 => DAY5,
        }
    }

    pub fn template(&self) -> DayTemplate {
        DayTemplate {
            day: *self,
            label: self.label(),
            exercises: self
                .exercises()
                .iter()
                .map(|(name, sets)| ExerciseSpec::new(*name, *sets))
                .collect(),
        }
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayCode {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayCode::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| SessionError::UnknownDay(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTemplate {
    pub day: DayCode,
    pub label: &'static str,
    pub exercises: Vec<ExerciseSpec>,
}

impl DayTemplate {
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.target_sets).sum()
    }
}

pub fn lookup(day_code: &str) -> Result<DayTemplate, SessionError> {
    let day: DayCode = day_code.parse()?;
    Ok(day.template())
}

pub fn all() -> Vec<DayTemplate> {
    DayCode::ALL.iter().map(DayCode::template).collect()
}

const DAY1: &[(&str, u32)] = &[
    ("Standing Calf Raises", 2),
    ("Hip Adductors", 2),
    ("Pendulum Squat", 2),
    ("Leg Extensions", 2),
    ("Laying Hamstring Curls", 2),
    ("Ab Crunches", 3),
    ("Wrist Curl", 2),
];

const DAY2: &[(&str, u32)] = &[
    ("Powerlifting Incline Bench", 3),
    ("Pec Deck", 1),
    ("Incline Skullcrushers", 2),
    ("Dumbbell Shoulder Press", 2),
    ("Dumbbell Lateral Raise", 2),
    ("Weighted Pull-ups", 1),
    ("Cable Row", 1),
    ("Kelso Shrug", 1),
    ("Machine Preacher Curl", 1),
    ("Rope Hammer Curl", 1),
    ("Rear Delt Crossover", 1),
];

const DAY3: &[(&str, u32)] = &[
    ("Powerlifting Incline Bench", 3),
    ("Laying Hamstring Curls", 2),
    ("Hack Squat", 2),
    ("Back Extensions", 2),
    ("Hip Adductors", 1),
    ("Standing Calf Raises", 2),
    ("Leg Raises", 2),
    ("Reverse Grip Curl", 2),
];

const DAY4: &[(&str, u32)] = &[
    ("Powerlifting Incline Bench", 3),
    ("Tricep Pushdown", 2),
    ("Incline Skullcrushers", 1),
    ("Extreme Row", 2),
    ("Cable Row", 2),
    ("Bayesian Curl", 2),
    ("Rope Hammer Curl", 1),
    ("Dumbbell Shoulder Press", 1),
    ("Dumbbell Lateral Raise", 1),
    ("Rear Delt Crossover", 2),
];

const DAY5: &[(&str, u32)] = &[
    ("Powerlifting Incline Bench", 3),
    ("Weighted Pull-ups", 2),
    ("Weighted Dips", 2),
    ("Kelso Shrug", 2),
    ("Standing Calf Raises", 2),
    ("Ab Crunches", 2),
    ("Leg Raises", 2),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_days() {
        let day1 = lookup("day1").unwrap();
        assert_eq!(day1.day, DayCode::Day1);
        assert_eq!(day1.exercises.len(), 7);
        assert_eq!(day1.exercises[0], ExerciseSpec::new("Standing Calf Raises", 2));
        assert_eq!(day1.exercises[5], ExerciseSpec::new("Ab Crunches", 3));

        assert_eq!(lookup("day2").unwrap().exercises.len(), 11);
        assert_eq!(lookup("day3").unwrap().exercises.len(), 8);
        assert_eq!(lookup("day4").unwrap().exercises.len(), 10);
        assert_eq!(lookup("day5").unwrap().total_sets(), 15);
    }

    #[test]
    fn lookup_unknown_day() {
        assert_eq!(
            lookup("day6"),
            Err(SessionError::UnknownDay("day6".to_string()))
        );
        assert!(lookup("Day1").is_err());
        assert!(lookup("").is_err());
    }

    #[test]
    fn labels_resolve_to_codes() {
        assert_eq!(DayCode::from_label("Day V (Aesthetic)"), Some(DayCode::Day5));
        assert_eq!(DayCode::from_label("Day III (Lower II)"), Some(DayCode::Day3));
        assert_eq!(DayCode::from_label("Day VI"), None);
        for day in DayCode::ALL {
            assert_eq!(day.as_str().parse::<DayCode>().unwrap(), day);
        }
    }

    #[test]
    fn every_target_is_positive() {
        for template in all() {
            assert!(template.exercises.iter().all(|e| e.target_sets >= 1));
        }
        assert_eq!(ExerciseSpec::new("Zero", 0).target_sets, 1);
    }
}
