use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::course::{Course, CourseStatus, SemesterMap};
use crate::engine::{HonorsTier, classify_honors, compute_cgpa, compute_sgpa};
use crate::error::Result;
use crate::grade::LetterGrade;

/// Who the transcript belongs to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdentity {
    pub name: String,
    pub student_id: String,
    pub program: String,
}

impl StudentIdentity {
    /// First word of the name, used in the dashboard greeting
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// Per-semester line on the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SemesterSummary {
    pub semester: u32,
    pub sgpa: f64,
    /// Number of courses recorded for the semester
    pub courses: usize,
    pub honors: HonorsTier,
}

/// Everything the portal knows about one student
///
/// Only the raw records are stored. CGPA, credit totals and semester
/// summaries are derived on demand so they can never disagree with the
/// course list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcademicProfile {
    pub identity: StudentIdentity,
    pub current_semester: u32,
    pub total_semesters: u32,
    /// Credits the programme requires in total
    pub program_credits: u32,
    pub standing: String,
    pub semesters: SemesterMap,
}

impl AcademicProfile {
    /// Courses of a semester, empty if nothing is recorded for it
    pub fn semester(&self, semester: u32) -> &[Course] {
        self.semesters
            .get(&semester)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_semester(&self, semester: u32) -> bool {
        self.semesters.contains_key(&semester)
    }

    pub fn sgpa(&self, semester: u32) -> f64 {
        compute_sgpa(self.semester(semester))
    }

    pub fn cgpa(&self) -> f64 {
        compute_cgpa(&self.semesters)
    }

    /// Credits across every recorded course
    pub fn total_credits(&self) -> u64 {
        self.semesters
            .values()
            .flatten()
            .map(|course| u64::from(course.credits))
            .sum()
    }

    /// Credits of passed courses only, never above `total_credits`
    pub fn completed_credits(&self) -> u64 {
        self.semesters
            .values()
            .flatten()
            .filter(|course| course.is_passed())
            .map(|course| u64::from(course.credits))
            .sum()
    }

    /// Share of the programme's credits already completed, in percent
    pub fn progress_percent(&self) -> f64 {
        if self.program_credits == 0 {
            return 0.0;
        }
        self.completed_credits() as f64 / f64::from(self.program_credits) * 100.0
    }

    pub fn summarize(&self, semester: u32) -> SemesterSummary {
        let sgpa = self.sgpa(semester);
        SemesterSummary {
            semester,
            sgpa,
            courses: self.semester(semester).len(),
            honors: classify_honors(sgpa),
        }
    }

    /// Summaries of recorded semesters, most recent first
    pub fn semester_summaries(&self) -> Vec<SemesterSummary> {
        self.semesters
            .keys()
            .rev()
            .map(|&semester| self.summarize(semester))
            .collect()
    }

    /// `(semester, sgpa)` points in ascending semester order for a trend chart
    pub fn sgpa_trend(&self) -> Vec<(u32, f64)> {
        self.semesters
            .keys()
            .map(|&semester| (semester, self.sgpa(semester)))
            .collect()
    }
}

/// Read-only source of the student's profile
///
/// Created once at start-up and handed to the controller.
pub trait ProfileStore {
    fn profile(&self) -> &AcademicProfile;
}

impl<T: ProfileStore + ?Sized> ProfileStore for Box<T> {
    fn profile(&self) -> &AcademicProfile {
        (**self).profile()
    }
}

/// The compiled-in demonstration profile
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticProfileStore;

impl ProfileStore for StaticProfileStore {
    fn profile(&self) -> &AcademicProfile {
        &DEMO_PROFILE
    }
}

/// Profile read from a JSON document
///
/// The file is read once; nothing is ever written back.
#[derive(Clone, Debug)]
pub struct JsonProfileStore {
    profile: AcademicProfile,
}

impl JsonProfileStore {
    /// Load a profile file
    ///
    /// # Errors
    /// * `PortalError::ProfileIo` if the file cannot be read
    /// * `PortalError::ProfileFormat` if it is not a valid profile, including
    ///   unknown grade symbols and zero-credit courses
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let store = Self::from_json(&contents)?;
        log::info!(
            "loaded profile for {} from {}",
            store.profile.identity.student_id,
            path.as_ref().display()
        );
        Ok(store)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let profile: AcademicProfile = serde_json::from_str(contents)?;
        Ok(JsonProfileStore { profile })
    }
}

impl From<AcademicProfile> for JsonProfileStore {
    fn from(profile: AcademicProfile) -> Self {
        JsonProfileStore { profile }
    }
}

impl ProfileStore for JsonProfileStore {
    fn profile(&self) -> &AcademicProfile {
        &self.profile
    }
}

type FixtureRow = (&'static str, &'static str, u32, LetterGrade);

const SEMESTER_1: &[FixtureRow] = &[
    ("CS1301", "Introduction to Computing", 3, LetterGrade::APlus),
    ("EE1301", "Principles of Electrical Engineering", 3, LetterGrade::BPlus),
    ("ID1202", "English", 2, LetterGrade::CPlus),
    ("ID1301", "Mathematics- I", 3, LetterGrade::BPlus),
    ("ME1301", "Applied Mechanics", 3, LetterGrade::B),
    ("ME1302", "Engineering Drawing", 3, LetterGrade::B),
];

const SEMESTER_2: &[FixtureRow] = &[
    ("ME1303", "Engineering Materials and Processes", 3, LetterGrade::B),
    ("EE1302", "Principles of Electronic Engineering", 3, LetterGrade::AMinus),
    ("ID1303", "Mathematics- II", 3, LetterGrade::A),
    ("ME1304", "Thermodynamics and Fluid Mechanics", 3, LetterGrade::B),
    ("ID1204", "Communication Skills for Engineers", 2, LetterGrade::CPlus),
    ("CE1301", "Mechanics of Materials", 3, LetterGrade::B),
];

const SEMESTER_3: &[FixtureRow] = &[
    ("EE2201", "Electromagnetics", 2, LetterGrade::AMinus),
    ("EE2202", "Electrical Circuit Analysis", 2, LetterGrade::B),
    ("EE2203", "Electrical Measurements", 2, LetterGrade::BMinus),
    ("EE2304", "Digital Electronics", 3, LetterGrade::CPlus),
    ("EE2305", "Introduction to Telecommunications", 3, LetterGrade::AMinus),
    ("EE2306", "Theory of Electricity", 3, LetterGrade::A),
    ("ID2301", "Differential Equations", 3, LetterGrade::B),
];

const SEMESTER_4: &[FixtureRow] = &[
    ("CS2302", "Computer Architecture", 3, LetterGrade::CPlus),
    ("EE2307", "Introduction to Electrical Machines and Power Systems", 3, LetterGrade::C),
    ("EE2308", "Analogue Electronics", 3, LetterGrade::B),
    ("EE2309", "Signals and Systems", 3, LetterGrade::BMinus),
    ("ID2302", "Probability and Statistics for Engineers", 3, LetterGrade::BMinus),
    ("ID2303", "Industrial Management I", 3, LetterGrade::BMinus),
    ("ID5211", "Climate Change", 2, LetterGrade::BPlus),
];

fn fixture_semester(rows: &[FixtureRow]) -> Vec<Course> {
    rows.iter()
        .map(|&(code, name, credits, grade)| Course {
            code: code.to_string(),
            name: name.to_string(),
            credits,
            grade,
            status: CourseStatus::Pass,
        })
        .collect()
}

lazy_static! {
    static ref DEMO_PROFILE: AcademicProfile = {
        let mut semesters = SemesterMap::new();
        semesters.insert(1, fixture_semester(SEMESTER_1));
        semesters.insert(2, fixture_semester(SEMESTER_2));
        semesters.insert(3, fixture_semester(SEMESTER_3));
        semesters.insert(4, fixture_semester(SEMESTER_4));

        AcademicProfile {
            identity: StudentIdentity {
                name: "Mithushan Sachchithananthan".to_string(),
                student_id: "SEU/IS/20/EG/078".to_string(),
                program: "Electrical and Electronics Engineering".to_string(),
            },
            current_semester: 6,
            total_semesters: 8,
            program_credits: 150,
            standing: "Good Standing".to_string(),
            semesters,
        }
    };
}
