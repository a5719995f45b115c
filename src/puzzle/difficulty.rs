use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date::{CalendarDate, Weekday};
use crate::error::ParseDifficultyError;

/// Selects the trace strategy and how far checkpoints may stray from even spacing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Maximum checkpoint offset as a fraction of the even spacing
    pub fn variance_amplitude(self) -> f64 {
        match self {
            Difficulty::Easy => 0.1,
            Difficulty::Medium => 0.2,
            Difficulty::Hard => 0.3,
        }
    }

    pub fn for_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Monday | Weekday::Tuesday => Difficulty::Easy,
            Weekday::Wednesday | Weekday::Thursday | Weekday::Friday => Difficulty::Medium,
            Weekday::Saturday | Weekday::Sunday => Difficulty::Hard,
        }
    }

    /// `day_index` counts from Sunday = 0
    pub fn for_day_index(day_index: u32) -> Self {
        Self::for_weekday(Weekday::from_index(day_index))
    }

    pub fn for_date(date: CalendarDate) -> Self {
        Self::for_weekday(date.weekday())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Difficulty;
    use crate::date::CalendarDate;

    #[test]
    fn weekday_mapping() {
        let expected = [
            Difficulty::Hard,
            Difficulty::Easy,
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Medium,
            Difficulty::Medium,
            Difficulty::Hard,
        ];
        for (day, &difficulty) in expected.iter().enumerate() {
            assert_eq!(difficulty, Difficulty::for_day_index(day as u32));
        }
    }

    #[test]
    fn for_date() {
        // Friday and Saturday
        let friday = CalendarDate::new(2024, 3, 15).unwrap();
        assert_eq!(Difficulty::Medium, Difficulty::for_date(friday));
        assert_eq!(Difficulty::Hard, Difficulty::for_date(friday.add_days(1)));
    }

    #[test]
    fn names() {
        assert_eq!(Ok(Difficulty::Medium), "Medium".parse());
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!("\"HARD\"", serde_json::to_string(&Difficulty::Hard).unwrap());
    }
}
