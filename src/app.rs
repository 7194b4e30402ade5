#![cfg(not(tarpaulin_include))]

use lazy_static::lazy_static;
use regex::Regex;
use std::error::Error;
use std::io::{self, BufRead, Write};

use student_portal::calculator::CalculatorSheet;
use student_portal::controller::{DashboardView, SemesterResultsView, ViewController, ViewState};
use student_portal::engine::format_gpa;
use student_portal::grade::LetterGrade;
use student_portal::notify::{LogSink, Notification, NotificationSink, RecordingSink, Severity};
use student_portal::profile::ProfileStore;

lazy_static! {
    static ref LOGIN_CMD: Regex = Regex::new(r"^login(?:\s+(\S+))?(?:\s+(\S+))?$").unwrap();
    static ref RESULTS_CMD: Regex = Regex::new(r"^results\s+(\d+)$").unwrap();
    static ref DOWNLOAD_CMD: Regex = Regex::new(r"^download(?:\s+(\d+))?$").unwrap();
    static ref ROW_CMD: Regex =
        Regex::new(r"^(remove|credits|grade|name)\s+(\d+)(?:\s+(.+))?$").unwrap();
}

/// A parsed line of input
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Quit,
    Show,
    Login(String, String),
    Results(u32),
    Current,
    Calculator,
    Transcript,
    Download(Option<u32>),
    Back,
    Logout,
    Add,
    Remove(usize),
    Credits(usize, u32),
    Grade(usize, Option<LetterGrade>),
    Name(usize, String),
}

/// Calculator rows are shown 1-based
fn row_index(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err("rows are numbered from 1".to_string()),
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    match line {
        "help" => return Ok(Command::Help),
        "q" | "quit" => return Ok(Command::Quit),
        "show" => return Ok(Command::Show),
        "current" => return Ok(Command::Current),
        "calc" => return Ok(Command::Calculator),
        "transcript" => return Ok(Command::Transcript),
        "back" => return Ok(Command::Back),
        "logout" => return Ok(Command::Logout),
        "add" => return Ok(Command::Add),
        _ => {}
    }

    if let Some(caps) = LOGIN_CMD.captures(line) {
        let field = |i: usize| caps.get(i).map_or(String::new(), |m| m.as_str().to_string());
        return Ok(Command::Login(field(1), field(2)));
    }
    if let Some(caps) = RESULTS_CMD.captures(line) {
        let semester = caps[1].parse().map_err(|_| "semester out of range")?;
        return Ok(Command::Results(semester));
    }
    if let Some(caps) = DOWNLOAD_CMD.captures(line) {
        let semester = match caps.get(1) {
            Some(m) => Some(m.as_str().parse().map_err(|_| "semester out of range")?),
            None => None,
        };
        return Ok(Command::Download(semester));
    }
    if let Some(caps) = ROW_CMD.captures(line) {
        let index = row_index(&caps[2])?;
        let arg = caps.get(3).map(|m| m.as_str().trim());
        return match (&caps[1], arg) {
            ("remove", None) => Ok(Command::Remove(index)),
            ("credits", Some(raw)) => {
                let credits = raw.parse().map_err(|_| "credits must be a whole number")?;
                Ok(Command::Credits(index, credits))
            }
            ("grade", Some("none")) => Ok(Command::Grade(index, None)),
            ("grade", Some(raw)) => {
                let grade = raw.parse::<LetterGrade>().map_err(|e| e.to_string())?;
                Ok(Command::Grade(index, Some(grade)))
            }
            ("name", Some(raw)) => Ok(Command::Name(index, raw.to_string())),
            _ => Err("invalid command".to_string()),
        };
    }

    Err("invalid command".to_string())
}

fn print_help() {
    println!("Commands:");
    println!("  login <student id> <password>  Sign in");
    println!("  results <n>                    Show semester n results");
    println!("  current                        Show current semester results");
    println!("  calc                           Open the GPA calculator");
    println!("  transcript                     Request the academic transcript");
    println!("  download [n]                   Request semester results");
    println!("  add | remove <row>             Calculator rows");
    println!("  credits <row> <n>              Set calculator credits");
    println!("  grade <row> <A+..F|none>       Set calculator grade");
    println!("  name <row> <text>              Name a calculator row");
    println!("  back | logout | show | help | q");
}

fn print_notification(notification: &Notification) {
    let marker = match notification.severity {
        Severity::Info => "*",
        Severity::Destructive => "!",
    };
    println!(
        "{} {}: {}",
        marker, notification.title, notification.description
    );
}

fn render_dashboard(view: &DashboardView) {
    println!("Welcome back, {}!", view.first_name);
    println!(
        "  Current CGPA      {} ({})",
        format_gpa(view.cgpa),
        view.cgpa_tier
    );
    println!(
        "  Academic Status   {}, Semester {} of {}",
        view.standing, view.current_semester, view.total_semesters
    );
    println!(
        "  Credits Progress  {}/{} ({:.1}% Complete)",
        view.completed_credits, view.program_credits, view.progress_percent
    );
    match view.last_semester() {
        Some(last) => println!(
            "  Last Semester     {} (SGPA - Semester {})",
            format_gpa(last.sgpa),
            last.semester
        ),
        None => println!("  Last Semester     N/A"),
    }

    println!();
    println!("Recent Semester Results");
    for summary in &view.recent_results {
        println!(
            "  Semester {:<3} {:>2} courses  {}  {}",
            summary.semester,
            summary.courses,
            format_gpa(summary.sgpa),
            summary.honors
        );
    }

    let trend: Vec<String> = view
        .sgpa_trend
        .iter()
        .map(|(semester, sgpa)| format!("Sem {} {}", semester, format_gpa(*sgpa)))
        .collect();
    println!("SGPA trend: {}", trend.join(" | "));
}

fn render_results(view: &SemesterResultsView<'_>) {
    println!("Semester {} Results", view.semester);
    println!(
        "  Semester GPA {} ({})  Total Credits {}  Courses {} ({} Passed)",
        format_gpa(view.sgpa),
        view.tier,
        view.total_credits,
        view.courses.len(),
        view.passed
    );
    if view.courses.is_empty() {
        println!("  No results recorded for this semester.");
        return;
    }
    println!(
        "  {:<8} {:<50} {:>7} {:>5} {:>6}  Status",
        "Code", "Course Name", "Credits", "Grade", "Points"
    );
    for course in view.courses {
        println!(
            "  {:<8} {:<50} {:>7} {:>5} {:>6.2}  {}",
            course.code,
            course.name,
            course.credits,
            course.grade,
            course.grade_points(),
            course.status
        );
    }
}

fn render_calculator(sheet: &CalculatorSheet) {
    println!("GPA Calculator");
    for (i, entry) in sheet.entries().iter().enumerate() {
        let grade = entry
            .grade
            .map(|g| format!("{} ({:.1})", g, g.points()))
            .unwrap_or_else(|| "-".to_string());
        let name = if entry.name.is_empty() {
            "(unnamed)"
        } else {
            entry.name.as_str()
        };
        println!(
            "  {:>2}. {:<30} {:>2} credits  {}",
            i + 1,
            name,
            entry.credits,
            grade
        );
    }
    println!(
        "  Calculated GPA {} ({})  Total Credits {}  Valid Courses {}",
        format_gpa(sheet.gpa()),
        sheet.tier(),
        sheet.total_credits(),
        sheet.valid_courses()
    );
}

fn render<S: ProfileStore>(portal: &ViewController<S, RecordingSink>) {
    if let Some(session) = portal.session() {
        println!(
            "[{} | {} | {}]",
            session.identity.name, session.identity.student_id, session.identity.program
        );
    }
    match portal.state() {
        ViewState::LoggedOut => {
            println!("Student Login");
            println!("  login <student id> <password>");
        }
        ViewState::Dashboard => {
            if let Some(view) = portal.dashboard() {
                render_dashboard(&view);
            }
        }
        ViewState::ResultsDetail { .. } => {
            if let Some(view) = portal.results() {
                render_results(&view);
            }
        }
        ViewState::Calculator(sheet) => render_calculator(sheet),
    }
}

fn sheet_mut<S: ProfileStore>(
    portal: &mut ViewController<S, RecordingSink>,
) -> Result<&mut CalculatorSheet, String> {
    portal
        .calculator_mut()
        .ok_or_else(|| "open the calculator first".to_string())
}

fn dispatch<S: ProfileStore>(
    portal: &mut ViewController<S, RecordingSink>,
    command: Command,
) -> Result<(), String> {
    match command {
        Command::Help | Command::Quit | Command::Show => Ok(()),
        Command::Login(id, password) => portal
            .submit_credentials(&id, &password)
            .map_err(|e| e.to_string()),
        Command::Results(semester) => portal.select_semester(semester).map_err(|e| e.to_string()),
        Command::Current => portal.view_current_results().map_err(|e| e.to_string()),
        Command::Calculator => portal.open_calculator().map_err(|e| e.to_string()),
        Command::Transcript => portal
            .request_transcript_download()
            .map_err(|e| e.to_string()),
        Command::Download(semester) => {
            let semester = match (semester, portal.state()) {
                (Some(n), _) => n,
                (None, ViewState::ResultsDetail { semester }) => *semester,
                (None, _) => return Err("usage: download <semester>".to_string()),
            };
            portal
                .request_result_download(semester)
                .map_err(|e| e.to_string())
        }
        Command::Back => portal.back().map_err(|e| e.to_string()),
        Command::Logout => portal.logout().map_err(|e| e.to_string()),
        Command::Add => {
            sheet_mut(portal)?.add_entry();
            Ok(())
        }
        Command::Remove(index) => {
            if sheet_mut(portal)?.remove_entry(index) {
                Ok(())
            } else {
                Err("cannot remove that row".to_string())
            }
        }
        Command::Credits(index, credits) => sheet_mut(portal)?
            .set_credits(index, credits)
            .map_err(|e| e.to_string()),
        Command::Grade(index, grade) => sheet_mut(portal)?
            .set_grade(index, grade)
            .map_err(|e| e.to_string()),
        Command::Name(index, name) => sheet_mut(portal)?
            .set_name(index, name)
            .map_err(|e| e.to_string()),
    }
}

/// Run the interactive portal until `q` or end of input
pub fn run<S: ProfileStore>(
    mut portal: ViewController<S, RecordingSink>,
) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut status = String::from("ok");
    let mut show = true;
    let mut log_sink = LogSink;

    loop {
        for notification in portal.notifications_mut().drain() {
            print_notification(&notification);
            log_sink.notify(notification);
        }
        if show {
            render(&portal);
        }

        print!("({}) {}> ", status, portal.state().name());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            show = false;
            continue;
        }

        match parse_command(line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                print_help();
                show = false;
            }
            Ok(command) => match dispatch(&mut portal, command) {
                Ok(()) => {
                    status = String::from("ok");
                    show = true;
                }
                Err(e) => {
                    status = e;
                    show = false;
                }
            },
            Err(e) => {
                status = e;
                show = false;
            }
        }
    }

    Ok(())
}
