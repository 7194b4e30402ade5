/*!
# Student Portal

The core of a student academic portal: sign in, a dashboard of academic
metrics, a per-semester results table and a what-if GPA calculator.

## Overview

All data is read once from a profile source and never written back. The
crate has two halves:

- **Grade engine** - pure functions that turn letter grades into grade points
  and aggregate course records into SGPA and CGPA figures, plus the
  performance and honours bands shown next to them.
- **View controller** - a finite state machine choosing which screen is
  shown, carrying the selected semester and the signed-in session between
  screens.

Front ends (the bundled terminal one, or anything else) call into the
controller and render what it exposes; they never compute grades themselves.

## Screens

```text
LoggedOut --submit_credentials--> Dashboard --select_semester--> ResultsDetail
                                     |  ^                              |
                                     |  +------------back--------------+
                                     +--open_calculator--> Calculator --back--> Dashboard
any signed-in screen --logout--> LoggedOut
```

## Grade scale

| Grade | Points | Grade | Points | Grade | Points |
|-------|--------|-------|--------|-------|--------|
| A+    | 4.0    | B     | 3.0    | C-    | 1.7    |
| A     | 4.0    | B-    | 2.7    | D+    | 1.3    |
| A-    | 3.7    | C+    | 2.3    | D     | 1.0    |
| B+    | 3.3    | C     | 2.0    | F     | 0.0    |

Unknown symbols are rejected when data is entered rather than counted as zero.

## Modules

- **grade**: the fixed letter grade scale
- **course**: course records and semester maps
- **engine**: weighted averages, SGPA/CGPA, performance and honours bands
- **calculator**: the GPA calculator worksheet
- **profile**: student profile, derived aggregates and profile stores
- **login**: credential verification and sessions
- **notify**: user-visible notifications and their sinks
- **controller**: the screen state machine
- **error**: the error taxonomy

## Example

```
use student_portal::controller::{ViewController, ViewState};
use student_portal::notify::RecordingSink;

let mut portal = ViewController::demo(RecordingSink::new());
portal.submit_credentials("SEU/IS/20/EG/078", "secret").unwrap();
assert_eq!(portal.state(), &ViewState::Dashboard);

portal.select_semester(1).unwrap();
let results = portal.results().unwrap();
assert_eq!(results.courses.len(), 6);
```
*/

pub mod calculator;
pub mod controller;
pub mod course;
pub mod engine;
pub mod error;
pub mod grade;
pub mod login;
pub mod notify;
pub mod profile;

/// Re-export the commonly used types at the crate root
pub use calculator::{CalculatorEntry, CalculatorSheet};
pub use controller::{DashboardView, SemesterResultsView, ViewController, ViewState};
pub use course::{Course, CourseStatus, Graded, SemesterMap};
pub use engine::{
    HonorsTier, PerformanceTier, classify, classify_honors, compute_cgpa, compute_sgpa,
    compute_weighted_average, format_gpa, round_for_display,
};
pub use error::PortalError;
pub use grade::{LetterGrade, grade_points, grade_points_for_symbol};
pub use login::{AcceptNonEmpty, Argon2Verifier, CredentialVerifier, Session};
pub use notify::{LogSink, Notification, NotificationSink, RecordingSink, Severity};
pub use profile::{
    AcademicProfile, JsonProfileStore, ProfileStore, SemesterSummary, StaticProfileStore,
    StudentIdentity,
};
