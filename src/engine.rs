//! Credit-weighted grade arithmetic.
//!
//! Everything here is a pure function of its input. Averages come back at
//! full precision; only [`round_for_display`] and [`format_gpa`] cut them to
//! two decimals.

use serde::Serialize;
use std::fmt;

use crate::course::{Course, Graded, SemesterMap};

/// Performance band shown next to a GPA figure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PerformanceTier {
    Excellent,
    Good,
    Satisfactory,
    NeedsImprovement,
    NoData,
}

impl PerformanceTier {
    pub fn label(self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "Excellent",
            PerformanceTier::Good => "Good",
            PerformanceTier::Satisfactory => "Satisfactory",
            PerformanceTier::NeedsImprovement => "Needs Improvement",
            PerformanceTier::NoData => "No Data",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Degree class for a single semester
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HonorsTier {
    FirstClass,
    SecondUpper,
    SecondLower,
    JustPass,
}

impl HonorsTier {
    pub fn label(self) -> &'static str {
        match self {
            HonorsTier::FirstClass => "First Class",
            HonorsTier::SecondUpper => "Second Upper",
            HonorsTier::SecondLower => "Second Lower",
            HonorsTier::JustPass => "Just Pass",
        }
    }
}

impl fmt::Display for HonorsTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Credit-weighted mean of grade points
///
/// Items without a grade or with zero credits are skipped. Returns `0.0` when
/// nothing is left to average.
///
/// # Examples
/// ```
/// use student_portal::calculator::CalculatorEntry;
/// use student_portal::engine::compute_weighted_average;
/// use student_portal::grade::LetterGrade;
///
/// let entries = [
///     CalculatorEntry::graded("", 3, LetterGrade::BPlus),
///     CalculatorEntry::graded("", 2, LetterGrade::CPlus),
/// ];
/// let gpa = compute_weighted_average(&entries);
/// assert!((gpa - 2.9).abs() < 1e-12);
/// ```
pub fn compute_weighted_average<I>(items: I) -> f64
where
    I: IntoIterator,
    I::Item: Graded,
{
    let mut weighted_tenths: u64 = 0;
    let mut credits: u64 = 0;

    for item in items {
        let Some(grade) = item.grade() else {
            continue;
        };
        let item_credits = u64::from(item.credits());
        if item_credits == 0 {
            continue;
        }
        weighted_tenths += u64::from(grade.tenths()) * item_credits;
        credits += item_credits;
    }

    if credits == 0 {
        return 0.0;
    }
    weighted_tenths as f64 / (10.0 * credits as f64)
}

/// Semester GPA over one semester's courses
pub fn compute_sgpa(courses: &[Course]) -> f64 {
    compute_weighted_average(courses)
}

/// Cumulative GPA over the union of all semesters
///
/// This is not the mean of the per-semester SGPAs: heavier semesters weigh more.
pub fn compute_cgpa(semesters: &SemesterMap) -> f64 {
    compute_weighted_average(semesters.values().flatten())
}

pub fn classify(gpa: f64) -> PerformanceTier {
    if gpa >= 3.5 {
        PerformanceTier::Excellent
    } else if gpa >= 3.0 {
        PerformanceTier::Good
    } else if gpa >= 2.5 {
        PerformanceTier::Satisfactory
    } else if gpa > 0.0 {
        PerformanceTier::NeedsImprovement
    } else {
        PerformanceTier::NoData
    }
}

pub fn classify_honors(sgpa: f64) -> HonorsTier {
    if sgpa >= 3.7 {
        HonorsTier::FirstClass
    } else if sgpa >= 3.3 {
        HonorsTier::SecondUpper
    } else if sgpa >= 3.0 {
        HonorsTier::SecondLower
    } else {
        HonorsTier::JustPass
    }
}

/// Two-decimal value for display
pub fn round_for_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_gpa(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::CourseStatus;
    use crate::grade::LetterGrade;

    fn course(credits: u32, grade: LetterGrade) -> Course {
        Course::new("T0000", "Test", credits, grade, CourseStatus::Pass).unwrap()
    }

    #[test]
    fn empty_input_averages_to_zero() {
        let none: Vec<Course> = Vec::new();
        assert_eq!(compute_weighted_average(&none), 0.0);
        assert_eq!(compute_sgpa(&none), 0.0);
        assert_eq!(compute_cgpa(&SemesterMap::new()), 0.0);
    }

    #[test]
    fn weighted_by_credits() {
        let courses = vec![course(3, LetterGrade::BPlus), course(2, LetterGrade::CPlus)];
        let gpa = compute_sgpa(&courses);
        assert!((gpa - 14.5 / 5.0).abs() < 1e-12);
        assert_eq!(format_gpa(gpa), "2.90");
    }

    #[test]
    fn full_precision_is_kept() {
        let courses = vec![
            course(3, LetterGrade::A),
            course(3, LetterGrade::AMinus),
            course(3, LetterGrade::BPlus),
        ];
        let gpa = compute_sgpa(&courses);
        assert!((gpa - 11.0 / 3.0).abs() < 1e-12);
        assert_eq!(round_for_display(gpa), 3.67);
        assert_eq!(format_gpa(gpa), "3.67");
    }

    #[test]
    fn order_does_not_matter() {
        let mut courses = vec![
            course(3, LetterGrade::AMinus),
            course(2, LetterGrade::CPlus),
            course(4, LetterGrade::BMinus),
            course(1, LetterGrade::DPlus),
        ];
        let forward = compute_sgpa(&courses);
        courses.reverse();
        assert_eq!(compute_sgpa(&courses), forward);
        courses.swap(0, 2);
        assert_eq!(compute_sgpa(&courses), forward);
    }

    #[test]
    fn cgpa_is_flattened_union() {
        let mut semesters = SemesterMap::new();
        semesters.insert(1, vec![course(1, LetterGrade::A)]);
        semesters.insert(2, vec![course(3, LetterGrade::C)]);

        let cgpa = compute_cgpa(&semesters);
        // (4.0 * 1 + 2.0 * 3) / 4
        assert!((cgpa - 2.5).abs() < 1e-12);

        let mean_of_sgpas = (compute_sgpa(&semesters[&1]) + compute_sgpa(&semesters[&2])) / 2.0;
        assert!((cgpa - mean_of_sgpas).abs() > 0.1);
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(classify(4.0), PerformanceTier::Excellent);
        assert_eq!(classify(3.5), PerformanceTier::Excellent);
        assert_eq!(classify(3.49), PerformanceTier::Good);
        assert_eq!(classify(3.0), PerformanceTier::Good);
        assert_eq!(classify(2.5), PerformanceTier::Satisfactory);
        assert_eq!(classify(2.49), PerformanceTier::NeedsImprovement);
        assert_eq!(classify(0.01), PerformanceTier::NeedsImprovement);
        assert_eq!(classify(0.0), PerformanceTier::NoData);
    }

    #[test]
    fn honors_boundaries() {
        assert_eq!(classify_honors(3.7), HonorsTier::FirstClass);
        assert_eq!(classify_honors(3.69), HonorsTier::SecondUpper);
        assert_eq!(classify_honors(3.3), HonorsTier::SecondUpper);
        assert_eq!(classify_honors(3.0), HonorsTier::SecondLower);
        assert_eq!(classify_honors(2.99), HonorsTier::JustPass);
        assert_eq!(classify_honors(0.0), HonorsTier::JustPass);
    }

    #[test]
    fn classification_is_stable() {
        for value in [0.0, 1.2, 2.5, 3.05, 3.7, 4.0] {
            assert_eq!(classify(value), classify(value));
            assert_eq!(classify_honors(value), classify_honors(value));
        }
    }

    #[test]
    fn labels() {
        assert_eq!(PerformanceTier::NeedsImprovement.to_string(), "Needs Improvement");
        assert_eq!(HonorsTier::SecondLower.to_string(), "Second Lower");
    }
}
