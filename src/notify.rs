use serde::Serialize;

/// How a notification should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Destructive,
}

/// A user-visible message; carries text only and never affects portal state
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn login_successful() -> Self {
        Self::info(
            "Login Successful",
            "Welcome to South Eastern University Of Sri Lanka Academic Portal",
        )
    }

    pub fn login_failed() -> Self {
        Self::destructive("Login Failed", "Please enter valid credentials")
    }

    pub fn logged_out() -> Self {
        Self::info("Logged Out", "You have been successfully logged out.")
    }

    pub fn transcript_requested() -> Self {
        Self::info(
            "Downloading Transcript",
            "Your academic transcript is being prepared for download.",
        )
    }

    pub fn result_requested(semester: u32) -> Self {
        Self::info(
            "Downloading Results",
            format!("Semester {} results are being downloaded.", semester),
        )
    }
}

/// Receiver of portal notifications (toasts, status lines, logs)
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Keeps every notification in order
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    notifications: Vec<Notification>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Hand over everything recorded so far
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

/// Forwards notifications to the `log` facade
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Info => log::info!("{}: {}", notification.title, notification.description),
            Severity::Destructive => {
                log::warn!("{}: {}", notification.title, notification.description)
            }
        }
    }
}
