//! Parse notification / diagnostic system.
//!
//! Non-fatal issues encountered while reading an `.ac` file are collected as
//! `Notification` items rather than being silently dropped or causing hard
//! errors: degenerate surfaces, repaired material indices, preserved unknown
//! directives.
//!
//! After a read the caller can inspect [`SceneGraph::notifications`] and
//! decide how to surface them.
//!
//! [`SceneGraph::notifications`]: crate::scene::SceneGraph::notifications

use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Surface with too few references for its type.
    DegenerateGeometry,
    /// Out-of-range reference replaced by a default (e.g., material index).
    RepairedReference,
    /// Directive the codec does not model; kept opaque or dropped.
    UnknownDirective,
    /// Any other tolerated defect.
    Warning,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateGeometry => write!(f, "DegenerateGeometry"),
            Self::RepairedReference => write!(f, "RepairedReference"),
            Self::UnknownDirective => write!(f, "UnknownDirective"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// A single notification produced during reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// The category.
    pub notification_type: NotificationType,
    /// Source line, when the issue is tied to one.
    pub line: Option<usize>,
    /// A human-readable description of the issue.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            line: None,
            message: message.into(),
        }
    }

    /// Attach a source line.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        Ok(())
    }
}

/// Collects notifications during a read.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification::new(notification_type, message));
    }

    /// Record a notification tied to a source line.
    pub fn notify_at(
        &mut self,
        notification_type: NotificationType,
        line: usize,
        message: impl Into<String>,
    ) {
        self.items
            .push(Notification::new(notification_type, message).at_line(line));
    }

    /// Record an already built notification.
    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    /// Move every notification of `other` into this collection.
    pub fn extend(&mut self, other: impl IntoIterator<Item = Notification>) {
        self.items.extend(other);
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// Consume the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::new(NotificationType::Warning, "kids missing");
        assert_eq!(n.notification_type, NotificationType::Warning);
        assert_eq!(n.message, "kids missing");
        assert_eq!(n.line, None);
    }

    #[test]
    fn test_collection_basics() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.notify(NotificationType::DegenerateGeometry, "d1");
        c.notify_at(NotificationType::RepairedReference, 12, "r1");
        c.notify(NotificationType::DegenerateGeometry, "d2");

        assert_eq!(c.len(), 3);
        assert_eq!(c.of_type(NotificationType::DegenerateGeometry).len(), 2);
        assert!(c.has_type(NotificationType::RepairedReference));
        assert!(!c.has_type(NotificationType::UnknownDirective));
    }

    #[test]
    fn test_display() {
        let n = Notification::new(NotificationType::UnknownDirective, "shader \"x\"");
        assert_eq!(format!("{}", n), "[UnknownDirective] shader \"x\"");

        let n = n.at_line(9);
        assert_eq!(format!("{}", n), "[UnknownDirective] shader \"x\" (line 9)");
    }
}
