//! Category to department routing and the notification boundary.

pub mod department;
pub mod notifier;

pub use department::{DepartmentDirectory, DepartmentRecord};
pub use notifier::{ComplaintNotice, LogNotifier, Notifier, notify_department};
