//! Hand-off of routed complaints to their department.
//!
//! Transport is pluggable through [`Notifier`]. The engine never depends on
//! delivery: [`notify_department`] logs failures and returns.

use std::fmt;

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::category::CategoryLabel;
use crate::routing::department::DepartmentRecord;

/// Characters of the description carried in a notice.
pub const DESCRIPTION_EXCERPT_CHARS: usize = 200;

/// Everything a department needs to pick up a complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintNotice {
    pub complaint_id: String,
    pub category: CategoryLabel,
    pub title: String,
    pub description_excerpt: String,
    pub department_contact: DepartmentRecord,
}

impl ComplaintNotice {
    pub fn new(
        complaint_id: impl Into<String>,
        category: CategoryLabel,
        title: impl Into<String>,
        description: &str,
        department_contact: DepartmentRecord,
    ) -> Self {
        ComplaintNotice {
            complaint_id: complaint_id.into(),
            category,
            title: title.into(),
            description_excerpt: excerpt(description, DESCRIPTION_EXCERPT_CHARS),
            department_contact,
        }
    }

    pub fn subject(&self) -> String {
        format!(
            "[Action Required] New {} Complaint (ID:{})",
            self.category, self.complaint_id
        )
    }

    /// Plain-text message body.
    pub fn body(&self) -> String {
        format!(
            "Dear {},\n\n\
             A new complaint has been assigned to your department.\n\n\
             Complaint ID: {}\n\
             Category: {}\n\
             Title: {}\n\
             Description: {}\n\n\
             Please log in to the portal to review and take action.",
            self.department_contact.department_name,
            self.complaint_id,
            self.category,
            self.title,
            self.description_excerpt
        )
    }

    /// Short text for SMS-style channels.
    pub fn short_message(&self) -> String {
        format!(
            "New {} complaint (ID:{}) assigned to your department",
            self.category, self.complaint_id
        )
    }
}

impl fmt::Display for ComplaintNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.subject(),
            self.department_contact.department_name
        )
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Delivery channel for complaint notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &ComplaintNotice) -> anyhow::Result<()>;

    fn name(&self) -> &'static str;
}

/// Notifier that writes notices to the log.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        LogNotifier
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, notice: &ComplaintNotice) -> anyhow::Result<()> {
        info!(
            "{} to {} <{}>",
            notice.subject(),
            notice.department_contact.department_name,
            notice.department_contact.contact_email
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Send `notice` through `notifier`. Returns whether delivery succeeded;
/// failures are logged, never propagated.
pub fn notify_department(notifier: &dyn Notifier, notice: &ComplaintNotice) -> bool {
    match notifier.notify(notice) {
        Ok(()) => true,
        Err(err) => {
            error!(
                "Failed to notify {} via {} for complaint {}: {:#}",
                notice.department_contact.department_name,
                notifier.name(),
                notice.complaint_id,
                err
            );
            false
        }
    }
}
