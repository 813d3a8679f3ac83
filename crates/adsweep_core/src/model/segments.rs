//! Audience segments and their daily populations.
//!
//! A segment fixes up to three demographic attributes. An atomic segment
//! fixes all three; broader segments leave attributes open and cover every
//! atomic segment that agrees on the fixed ones.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    Young,
    Old,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Income {
    Low,
    High,
}

/// Expected daily user counts for each atomic segment.
pub const ATOMIC_SEGMENTS: [(Gender, AgeGroup, Income, u32); 8] = [
    (Gender::Male, AgeGroup::Young, Income::Low, 1836),
    (Gender::Male, AgeGroup::Young, Income::High, 517),
    (Gender::Male, AgeGroup::Old, Income::Low, 1795),
    (Gender::Male, AgeGroup::Old, Income::High, 808),
    (Gender::Female, AgeGroup::Young, Income::Low, 1980),
    (Gender::Female, AgeGroup::Young, Income::High, 256),
    (Gender::Female, AgeGroup::Old, Income::Low, 2401),
    (Gender::Female, AgeGroup::Old, Income::High, 407),
];

/// Target audience descriptor for a campaign or a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketSegment {
    pub gender: Option<Gender>,
    pub age: Option<AgeGroup>,
    pub income: Option<Income>,
}

impl MarketSegment {
    /// A segment fixing all three attributes.
    pub const fn atomic(gender: Gender, age: AgeGroup, income: Income) -> Self {
        Self {
            gender: Some(gender),
            age: Some(age),
            income: Some(income),
        }
    }

    /// Whether a user from the given atomic segment belongs to this segment.
    pub fn matches(&self, gender: Gender, age: AgeGroup, income: Income) -> bool {
        self.gender.is_none_or(|g| g == gender)
            && self.age.is_none_or(|a| a == age)
            && self.income.is_none_or(|i| i == income)
    }

    /// Expected daily users reachable through this segment.
    pub fn daily_population(&self) -> u32 {
        ATOMIC_SEGMENTS
            .iter()
            .filter(|(g, a, i, _)| self.matches(*g, *a, *i))
            .map(|(_, _, _, count)| count)
            .sum()
    }
}

impl fmt::Display for MarketSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        match self.gender {
            Some(Gender::Male) => parts.push("Male"),
            Some(Gender::Female) => parts.push("Female"),
            None => {}
        }
        match self.age {
            Some(AgeGroup::Young) => parts.push("Young"),
            Some(AgeGroup::Old) => parts.push("Old"),
            None => {}
        }
        match self.income {
            Some(Income::Low) => parts.push("LowIncome"),
            Some(Income::High) => parts.push("HighIncome"),
            None => {}
        }
        if parts.is_empty() {
            write!(f, "Any")
        } else {
            write!(f, "{}", parts.join("_"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_population_is_table_entry() {
        let seg = MarketSegment::atomic(Gender::Male, AgeGroup::Young, Income::Low);
        assert_eq!(seg.daily_population(), 1836);
    }

    #[test]
    fn broad_segment_sums_matching_atomics() {
        let seg = MarketSegment {
            gender: Some(Gender::Male),
            age: Some(AgeGroup::Young),
            income: None,
        };
        assert_eq!(seg.daily_population(), 1836 + 517);
    }

    #[test]
    fn open_segment_covers_everyone() {
        let seg = MarketSegment {
            gender: None,
            age: None,
            income: None,
        };
        let total: u32 = ATOMIC_SEGMENTS.iter().map(|(_, _, _, c)| c).sum();
        assert_eq!(seg.daily_population(), total);
        assert!(seg.matches(Gender::Female, AgeGroup::Old, Income::High));
    }

    #[test]
    fn display_joins_fixed_attributes() {
        let seg = MarketSegment::atomic(Gender::Female, AgeGroup::Old, Income::Low);
        assert_eq!(seg.to_string(), "Female_Old_LowIncome");
    }
}
