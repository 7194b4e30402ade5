//! Screen selection for the portal.
//!
//! [`ViewController`] is a small state machine over [`ViewState`]. Each
//! variant carries only what its screen needs: the results screen knows its
//! semester, the calculator owns its worksheet. A [`Session`] exists exactly
//! while the state is not `LoggedOut`.

use serde::Serialize;

use crate::calculator::CalculatorSheet;
use crate::course::Course;
use crate::engine::{PerformanceTier, classify, compute_sgpa};
use crate::error::{PortalError, Result};
use crate::login::{AcceptNonEmpty, CredentialVerifier, Session};
use crate::notify::{Notification, NotificationSink};
use crate::profile::{AcademicProfile, ProfileStore, SemesterSummary, StaticProfileStore};

/// The screen currently shown
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState {
    LoggedOut,
    Dashboard,
    ResultsDetail { semester: u32 },
    Calculator(CalculatorSheet),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::LoggedOut => "login",
            ViewState::Dashboard => "dashboard",
            ViewState::ResultsDetail { .. } => "results",
            ViewState::Calculator(_) => "calculator",
        }
    }

    pub fn is_logged_in(&self) -> bool {
        !matches!(self, ViewState::LoggedOut)
    }
}

/// Figures shown on the dashboard
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardView {
    pub first_name: String,
    pub cgpa: f64,
    pub cgpa_tier: PerformanceTier,
    pub standing: String,
    pub current_semester: u32,
    pub total_semesters: u32,
    pub completed_credits: u64,
    pub program_credits: u32,
    pub progress_percent: f64,
    /// Most recent semester first
    pub recent_results: Vec<SemesterSummary>,
    pub sgpa_trend: Vec<(u32, f64)>,
}

impl DashboardView {
    pub fn last_semester(&self) -> Option<&SemesterSummary> {
        self.recent_results.first()
    }
}

/// The results table for one semester
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SemesterResultsView<'a> {
    pub semester: u32,
    pub courses: &'a [Course],
    pub sgpa: f64,
    pub tier: PerformanceTier,
    pub total_credits: u64,
    pub passed: usize,
}

/// Drives the portal screens for a single user
pub struct ViewController<S: ProfileStore, N: NotificationSink> {
    store: S,
    verifier: Box<dyn CredentialVerifier>,
    sink: N,
    state: ViewState,
    session: Option<Session>,
}

impl<N: NotificationSink> ViewController<StaticProfileStore, N> {
    /// Compiled-in profile, any non-empty credentials accepted
    pub fn demo(sink: N) -> Self {
        ViewController::new(StaticProfileStore, AcceptNonEmpty, sink)
    }
}

impl<S: ProfileStore, N: NotificationSink> ViewController<S, N> {
    pub fn new(store: S, verifier: impl CredentialVerifier + 'static, sink: N) -> Self {
        ViewController {
            store,
            verifier: Box::new(verifier),
            sink,
            state: ViewState::LoggedOut,
            session: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn profile(&self) -> &AcademicProfile {
        self.store.profile()
    }

    pub fn notifications(&self) -> &N {
        &self.sink
    }

    pub fn notifications_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    fn invalid(&self, trigger: &'static str) -> PortalError {
        log::debug!("rejected {} in {}", trigger, self.state.name());
        PortalError::InvalidTransition {
            state: self.state.name(),
            trigger,
        }
    }

    fn enter(&mut self, next: ViewState) {
        log::info!("view {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    /// Sign in from the login screen
    ///
    /// Empty fields never reach the verifier. A rejected attempt emits a
    /// "Login Failed" notification and leaves the state as it was.
    ///
    /// # Errors
    /// * `PortalError::InvalidCredentials` if a field is empty or the verifier refuses
    /// * `PortalError::InvalidTransition` if someone is already signed in
    pub fn submit_credentials(&mut self, student_id: &str, password: &str) -> Result<()> {
        if self.state != ViewState::LoggedOut {
            return Err(self.invalid("submit credentials"));
        }

        let accepted = !student_id.is_empty()
            && !password.is_empty()
            && self.verifier.verify(student_id, password);
        if !accepted {
            log::warn!("login rejected for {:?}", student_id);
            self.sink.notify(Notification::login_failed());
            return Err(PortalError::InvalidCredentials);
        }

        let session = Session::start(student_id, self.store.profile());
        log::info!("session {} opened for {}", session.id, student_id);
        self.session = Some(session);
        self.enter(ViewState::Dashboard);
        self.sink.notify(Notification::login_successful());
        Ok(())
    }

    /// Open the results of a semester from the dashboard
    ///
    /// A semester with no records is still shown, as an empty table with SGPA 0.
    pub fn select_semester(&mut self, semester: u32) -> Result<()> {
        if self.state != ViewState::Dashboard {
            return Err(self.invalid("select a semester"));
        }
        if !self.profile().has_semester(semester) {
            log::debug!("no results recorded for semester {}", semester);
        }
        self.enter(ViewState::ResultsDetail { semester });
        Ok(())
    }

    /// Dashboard shortcut to the current semester's results
    pub fn view_current_results(&mut self) -> Result<()> {
        let current = self.profile().current_semester;
        self.select_semester(current)
    }

    pub fn open_calculator(&mut self) -> Result<()> {
        if self.state != ViewState::Dashboard {
            return Err(self.invalid("open the calculator"));
        }
        self.enter(ViewState::Calculator(CalculatorSheet::new()));
        Ok(())
    }

    /// Return to the dashboard; the calculator worksheet is discarded
    pub fn back(&mut self) -> Result<()> {
        match self.state {
            ViewState::ResultsDetail { .. } | ViewState::Calculator(_) => {
                self.enter(ViewState::Dashboard);
                Ok(())
            }
            _ => Err(self.invalid("go back")),
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        if !self.state.is_logged_in() {
            return Err(self.invalid("log out"));
        }
        if let Some(session) = self.session.take() {
            log::info!("session {} closed", session.id);
        }
        self.enter(ViewState::LoggedOut);
        self.sink.notify(Notification::logged_out());
        Ok(())
    }

    /// Acknowledge a transcript download; no file is produced here
    pub fn request_transcript_download(&mut self) -> Result<()> {
        if !self.state.is_logged_in() {
            return Err(self.invalid("download the transcript"));
        }
        self.sink.notify(Notification::transcript_requested());
        Ok(())
    }

    /// Acknowledge a semester result download; no file is produced here
    pub fn request_result_download(&mut self, semester: u32) -> Result<()> {
        if !self.state.is_logged_in() {
            return Err(self.invalid("download results"));
        }
        self.sink.notify(Notification::result_requested(semester));
        Ok(())
    }

    /// The calculator worksheet, while the calculator is open
    pub fn calculator(&self) -> Option<&CalculatorSheet> {
        match &self.state {
            ViewState::Calculator(sheet) => Some(sheet),
            _ => None,
        }
    }

    pub fn calculator_mut(&mut self) -> Option<&mut CalculatorSheet> {
        match &mut self.state {
            ViewState::Calculator(sheet) => Some(sheet),
            _ => None,
        }
    }

    /// Dashboard figures, while the dashboard is shown
    pub fn dashboard(&self) -> Option<DashboardView> {
        if self.state != ViewState::Dashboard {
            return None;
        }
        let profile = self.profile();
        let cgpa = profile.cgpa();
        Some(DashboardView {
            first_name: profile.identity.first_name().to_string(),
            cgpa,
            cgpa_tier: classify(cgpa),
            standing: profile.standing.clone(),
            current_semester: profile.current_semester,
            total_semesters: profile.total_semesters,
            completed_credits: profile.completed_credits(),
            program_credits: profile.program_credits,
            progress_percent: profile.progress_percent(),
            recent_results: profile.semester_summaries(),
            sgpa_trend: profile.sgpa_trend(),
        })
    }

    /// Results table, while a semester is selected
    pub fn results(&self) -> Option<SemesterResultsView<'_>> {
        let ViewState::ResultsDetail { semester } = self.state else {
            return None;
        };
        let courses = self.profile().semester(semester);
        let sgpa = compute_sgpa(courses);
        Some(SemesterResultsView {
            semester,
            courses,
            sgpa,
            tier: classify(sgpa),
            total_credits: courses.iter().map(|course| u64::from(course.credits)).sum(),
            passed: courses.iter().filter(|course| course.is_passed()).count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;

    fn signed_in() -> ViewController<StaticProfileStore, RecordingSink> {
        let mut portal = ViewController::demo(RecordingSink::new());
        portal.submit_credentials("SEU/IS/20/EG/078", "seusl").unwrap();
        portal
    }

    #[test]
    fn starts_logged_out() {
        let portal = ViewController::demo(RecordingSink::new());
        assert_eq!(portal.state(), &ViewState::LoggedOut);
        assert!(portal.session().is_none());
        assert!(portal.dashboard().is_none());
    }

    #[test]
    fn dashboard_only_transitions() {
        let mut portal = ViewController::demo(RecordingSink::new());
        assert!(matches!(
            portal.select_semester(1),
            Err(PortalError::InvalidTransition { state: "login", .. })
        ));
        assert!(portal.open_calculator().is_err());
        assert!(portal.back().is_err());
        assert!(portal.logout().is_err());
        assert!(portal.request_transcript_download().is_err());
        assert_eq!(portal.state(), &ViewState::LoggedOut);
        assert!(portal.notifications().notifications().is_empty());
    }

    #[test]
    fn cannot_log_in_twice() {
        let mut portal = signed_in();
        let first = portal.session().unwrap().id;
        assert!(portal.submit_credentials("other", "pw").is_err());
        assert_eq!(portal.session().unwrap().id, first);
    }

    #[test]
    fn back_is_rejected_on_dashboard() {
        let mut portal = signed_in();
        assert!(matches!(
            portal.back(),
            Err(PortalError::InvalidTransition { state: "dashboard", trigger: "go back" })
        ));
    }

    #[test]
    fn calculator_sheet_is_discarded_on_back() {
        let mut portal = signed_in();
        portal.open_calculator().unwrap();
        portal
            .calculator_mut()
            .unwrap()
            .set_grade(0, Some(crate::grade::LetterGrade::A))
            .unwrap();
        assert!(portal.calculator().unwrap().gpa() > 0.0);

        portal.back().unwrap();
        assert!(portal.calculator().is_none());
        portal.open_calculator().unwrap();
        assert_eq!(portal.calculator().unwrap(), &CalculatorSheet::new());
    }

    #[test]
    fn results_summary_for_recorded_semester() {
        let mut portal = signed_in();
        portal.select_semester(3).unwrap();
        let view = portal.results().unwrap();
        assert_eq!(view.semester, 3);
        assert_eq!(view.courses.len(), 7);
        assert_eq!(view.total_credits, 18);
        assert_eq!(view.passed, 7);
        assert_eq!(view.tier, PerformanceTier::Good);
    }

    #[test]
    fn results_total_credits_widen_past_u32() {
        use crate::course::CourseStatus;
        use crate::grade::LetterGrade;
        use crate::profile::JsonProfileStore;

        let mut profile = StaticProfileStore.profile().clone();
        profile.semesters.insert(
            9,
            vec![
                Course::new("BIG1", "Large", u32::MAX, LetterGrade::A, CourseStatus::Pass).unwrap(),
                Course::new("ONE1", "Small", 1, LetterGrade::B, CourseStatus::Fail).unwrap(),
            ],
        );
        let store = JsonProfileStore::from(profile);
        let mut portal = ViewController::new(store, AcceptNonEmpty, RecordingSink::new());
        portal.submit_credentials("id", "pw").unwrap();
        portal.select_semester(9).unwrap();

        let view = portal.results().unwrap();
        assert_eq!(view.total_credits, u64::from(u32::MAX) + 1);
        assert_eq!(view.passed, 1);
    }

    #[test]
    fn current_results_shortcut_uses_current_semester() {
        let mut portal = signed_in();
        portal.view_current_results().unwrap();
        assert_eq!(portal.state(), &ViewState::ResultsDetail { semester: 6 });
        assert_eq!(portal.results().unwrap().sgpa, 0.0);
    }

    #[test]
    fn downloads_do_not_change_state() {
        let mut portal = signed_in();
        portal.select_semester(2).unwrap();
        portal.request_result_download(2).unwrap();
        portal.request_transcript_download().unwrap();
        assert_eq!(portal.state(), &ViewState::ResultsDetail { semester: 2 });

        let titles: Vec<&str> = portal
            .notifications()
            .notifications()
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["Login Successful", "Downloading Results", "Downloading Transcript"]
        );
    }
}
