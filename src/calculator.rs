use serde::{Deserialize, Serialize};

use crate::course::Graded;
use crate::engine::{PerformanceTier, classify, compute_weighted_average};
use crate::error::{PortalError, Result};
use crate::grade::LetterGrade;

/// Credits a fresh calculator row starts with
pub const DEFAULT_CREDITS: u32 = 3;

/// One row of the what-if GPA calculator
///
/// Unlike a recorded [`Course`](crate::course::Course), a row may have no
/// grade yet and may carry zero credits; such rows are ignored by the average.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculatorEntry {
    /// Optional course name, only for the user's reference
    pub name: String,
    pub credits: u32,
    pub grade: Option<LetterGrade>,
}

impl Default for CalculatorEntry {
    fn default() -> Self {
        CalculatorEntry {
            name: String::new(),
            credits: DEFAULT_CREDITS,
            grade: None,
        }
    }
}

impl CalculatorEntry {
    pub fn graded(name: impl Into<String>, credits: u32, grade: LetterGrade) -> Self {
        CalculatorEntry {
            name: name.into(),
            credits,
            grade: Some(grade),
        }
    }

    /// Counts towards the GPA
    pub fn is_valid(&self) -> bool {
        self.grade.is_some() && self.credits > 0
    }
}

impl Graded for CalculatorEntry {
    fn credits(&self) -> u32 {
        self.credits
    }

    fn grade(&self) -> Option<LetterGrade> {
        self.grade
    }
}

/// Rows entered in the calculator view
///
/// Always holds at least one row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSheet {
    entries: Vec<CalculatorEntry>,
}

impl Default for CalculatorSheet {
    fn default() -> Self {
        CalculatorSheet {
            entries: vec![CalculatorEntry::default()],
        }
    }
}

impl CalculatorSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CalculatorEntry] {
        &self.entries
    }

    /// Append a blank row and return its index
    pub fn add_entry(&mut self) -> usize {
        self.entries.push(CalculatorEntry::default());
        self.entries.len() - 1
    }

    /// Remove a row
    ///
    /// Returns `false` without touching the sheet if `index` is out of range
    /// or if it is the only row left.
    pub fn remove_entry(&mut self, index: usize) -> bool {
        if self.entries.len() <= 1 || index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        true
    }

    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.entry_mut(index)?.name = name.into();
        Ok(())
    }

    pub fn set_credits(&mut self, index: usize, credits: u32) -> Result<()> {
        self.entry_mut(index)?.credits = credits;
        Ok(())
    }

    pub fn set_grade(&mut self, index: usize, grade: Option<LetterGrade>) -> Result<()> {
        self.entry_mut(index)?.grade = grade;
        Ok(())
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut CalculatorEntry> {
        self.entries
            .get_mut(index)
            .ok_or(PortalError::NoSuchEntry(index))
    }

    pub fn gpa(&self) -> f64 {
        compute_weighted_average(&self.entries)
    }

    pub fn tier(&self) -> PerformanceTier {
        classify(self.gpa())
    }

    /// Credits of every row that has a grade
    pub fn total_credits(&self) -> u64 {
        self.entries
            .iter()
            .filter(|entry| entry.grade.is_some())
            .map(|entry| u64::from(entry.credits))
            .sum()
    }

    pub fn valid_courses(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_valid()).count()
    }
}
