use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{PortalError, Result};
use crate::grade::LetterGrade;

/// Outcome recorded against a course
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    Pass,
    Fail,
    Incomplete,
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CourseStatus::Pass => "Pass",
            CourseStatus::Fail => "Fail",
            CourseStatus::Incomplete => "Incomplete",
        };
        f.pad(label)
    }
}

/// A graded course on the transcript
///
/// Grade points are never stored; they are always read off the grade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCourse")]
pub struct Course {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub grade: LetterGrade,
    pub status: CourseStatus,
}

#[derive(Deserialize)]
struct RawCourse {
    code: String,
    name: String,
    credits: u32,
    grade: LetterGrade,
    status: CourseStatus,
}

impl TryFrom<RawCourse> for Course {
    type Error = PortalError;

    fn try_from(raw: RawCourse) -> Result<Self> {
        Course::new(raw.code, raw.name, raw.credits, raw.grade, raw.status)
    }
}

impl Course {
    /// Create a course record
    ///
    /// Code and name are trimmed; the fixture data carries trailing spaces.
    ///
    /// # Errors
    /// * `PortalError::InvalidCredits` if `credits` is zero
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        credits: u32,
        grade: LetterGrade,
        status: CourseStatus,
    ) -> Result<Self> {
        let code = code.into().trim().to_string();
        if credits == 0 {
            return Err(PortalError::InvalidCredits { code });
        }
        Ok(Course {
            code,
            name: name.into().trim().to_string(),
            credits,
            grade,
            status,
        })
    }

    pub fn grade_points(&self) -> f64 {
        self.grade.points()
    }

    pub fn is_passed(&self) -> bool {
        self.status == CourseStatus::Pass
    }
}

/// Semester number to the courses taken in it, in recorded order
pub type SemesterMap = BTreeMap<u32, Vec<Course>>;

/// Anything that contributes to a credit-weighted GPA
pub trait Graded {
    fn credits(&self) -> u32;

    /// `None` when no grade has been chosen yet
    fn grade(&self) -> Option<LetterGrade>;
}

impl Graded for Course {
    fn credits(&self) -> u32 {
        self.credits
    }

    fn grade(&self) -> Option<LetterGrade> {
        Some(self.grade)
    }
}

impl<T: Graded + ?Sized> Graded for &T {
    fn credits(&self) -> u32 {
        (**self).credits()
    }

    fn grade(&self) -> Option<LetterGrade> {
        (**self).grade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_points_follow_grade() {
        let mut course = Course::new(
            "EE2201",
            "Electromagnetics ",
            2,
            LetterGrade::AMinus,
            CourseStatus::Pass,
        )
        .unwrap();
        assert_eq!(course.name, "Electromagnetics");
        assert_eq!(course.grade_points(), 3.7);

        course.grade = LetterGrade::C;
        assert_eq!(course.grade_points(), 2.0);
    }

    #[test]
    fn zero_credit_course_is_rejected() {
        let err = Course::new("X1", "Nothing", 0, LetterGrade::A, CourseStatus::Pass).unwrap_err();
        assert!(matches!(err, PortalError::InvalidCredits { code } if code == "X1"));
    }

    #[test]
    fn deserialization_validates() {
        let ok: Course = serde_json::from_str(
            r#"{"code":"CS1301","name":"Introduction to Computing","credits":3,"grade":"A+","status":"Pass"}"#,
        )
        .unwrap();
        assert_eq!(ok.grade, LetterGrade::APlus);

        let zero = serde_json::from_str::<Course>(
            r#"{"code":"CS1301","name":"x","credits":0,"grade":"A","status":"Pass"}"#,
        );
        assert!(zero.is_err());

        let bad_grade = serde_json::from_str::<Course>(
            r#"{"code":"CS1301","name":"x","credits":3,"grade":"E","status":"Pass"}"#,
        );
        assert!(bad_grade.is_err());
    }
}
