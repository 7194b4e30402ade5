use student_portal::controller::{ViewController, ViewState};
use student_portal::engine::{PerformanceTier, classify};
use student_portal::error::PortalError;
use student_portal::login::Argon2Verifier;
use student_portal::notify::{RecordingSink, Severity};
use student_portal::profile::StaticProfileStore;

fn portal() -> ViewController<StaticProfileStore, RecordingSink> {
    ViewController::demo(RecordingSink::new())
}

#[test]
fn empty_student_id_keeps_login_screen() {
    let mut portal = portal();
    let err = portal.submit_credentials("", "x").unwrap_err();

    assert!(matches!(err, PortalError::InvalidCredentials));
    assert_eq!(portal.state(), &ViewState::LoggedOut);
    assert!(portal.session().is_none());

    let sent = portal.notifications().notifications();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Login Failed");
    assert_eq!(sent[0].severity, Severity::Destructive);
}

#[test]
fn empty_password_keeps_login_screen() {
    let mut portal = portal();
    assert!(portal.submit_credentials("SEU/IS/20/EG/078", "").is_err());
    assert_eq!(portal.state(), &ViewState::LoggedOut);
}

#[test]
fn filled_credentials_open_dashboard() {
    let mut portal = portal();
    portal.submit_credentials("guest", "anything").unwrap();

    assert_eq!(portal.state(), &ViewState::Dashboard);
    let session = portal.session().expect("session after login");
    assert_eq!(session.identity.student_id, "guest");
    assert_eq!(session.identity.name, "Mithushan Sachchithananthan");
    assert_eq!(
        portal.notifications().last().unwrap().title,
        "Login Successful"
    );
}

#[test]
fn unknown_semester_shows_empty_results() {
    let mut portal = portal();
    portal.submit_credentials("guest", "anything").unwrap();
    portal.select_semester(99).unwrap();

    assert_eq!(portal.state(), &ViewState::ResultsDetail { semester: 99 });
    let view = portal.results().unwrap();
    assert!(view.courses.is_empty());
    assert_eq!(view.sgpa, 0.0);
    assert_eq!(view.tier, PerformanceTier::NoData);
    assert_eq!(view.total_credits, 0);
}

#[test]
fn full_navigation_cycle() {
    let mut portal = portal();
    portal.submit_credentials("guest", "pw").unwrap();

    portal.select_semester(1).unwrap();
    assert_eq!(portal.results().unwrap().courses.len(), 6);
    portal.back().unwrap();
    assert_eq!(portal.state(), &ViewState::Dashboard);

    portal.open_calculator().unwrap();
    assert!(portal.calculator().is_some());
    portal.back().unwrap();
    assert_eq!(portal.state(), &ViewState::Dashboard);

    portal.open_calculator().unwrap();
    portal.logout().unwrap();
    assert_eq!(portal.state(), &ViewState::LoggedOut);
    assert!(portal.session().is_none());
    assert_eq!(portal.notifications().last().unwrap().title, "Logged Out");
}

#[test]
fn logout_from_results_destroys_session() {
    let mut portal = portal();
    portal.submit_credentials("guest", "pw").unwrap();
    portal.select_semester(4).unwrap();
    portal.logout().unwrap();

    assert!(portal.session().is_none());
    assert!(portal.results().is_none());
    portal.submit_credentials("again", "pw").unwrap();
    assert_eq!(portal.session().unwrap().identity.student_id, "again");
}

#[test]
fn dashboard_reports_fixture_figures() {
    let mut portal = portal();
    portal.submit_credentials("guest", "pw").unwrap();
    let view = portal.dashboard().unwrap();

    assert_eq!(view.first_name, "Mithushan");
    assert_eq!(view.cgpa_tier, classify(view.cgpa));
    assert_eq!(view.cgpa_tier, PerformanceTier::Good);
    assert_eq!(view.completed_credits, 72);
    assert_eq!(view.program_credits, 150);
    assert!(view.completed_credits <= 72);
    assert_eq!(view.last_semester().unwrap().semester, 4);
    assert_eq!(view.recent_results.len(), 4);
    assert_eq!(view.sgpa_trend.first().unwrap().0, 1);
}

#[test]
fn injected_verifier_rejects_wrong_password() {
    let verifier = Argon2Verifier::new("SEU/IS/20/EG/078", "seusl").unwrap();
    let mut portal = ViewController::new(StaticProfileStore, verifier, RecordingSink::new());

    assert!(matches!(
        portal.submit_credentials("SEU/IS/20/EG/078", "nope"),
        Err(PortalError::InvalidCredentials)
    ));
    assert_eq!(portal.state(), &ViewState::LoggedOut);
    assert_eq!(portal.notifications().last().unwrap().title, "Login Failed");

    portal.submit_credentials("SEU/IS/20/EG/078", "seusl").unwrap();
    assert_eq!(portal.state(), &ViewState::Dashboard);
}

#[test]
fn calculator_worksheet_through_controller() {
    use student_portal::grade::LetterGrade;

    let mut portal = portal();
    portal.submit_credentials("guest", "pw").unwrap();
    portal.open_calculator().unwrap();

    let sheet = portal.calculator_mut().unwrap();
    sheet.set_grade(0, Some(LetterGrade::BPlus)).unwrap();
    let row = sheet.add_entry();
    sheet.set_credits(row, 2).unwrap();
    sheet.set_grade(row, Some(LetterGrade::CPlus)).unwrap();

    let sheet = portal.calculator().unwrap();
    assert!((sheet.gpa() - 2.9).abs() < 1e-12);
    assert_eq!(sheet.total_credits(), 5);
    assert_eq!(sheet.valid_courses(), 2);
}
