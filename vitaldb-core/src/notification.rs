use std::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A one-shot message for the user, e.g. a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}
impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Where notifications go. Sending never fails: if nobody is listening any
/// more, the notification is dropped.
#[derive(Debug, Clone, Default)]
pub struct Notifier(Option<mpsc::Sender<Notification>>);
impl Notifier {
    pub fn new(sender: mpsc::Sender<Notification>) -> Self {
        Self(Some(sender))
    }

    /// A notifier that discards everything.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn notify(&self, notification: Notification) {
        let Some(sender) = &self.0 else {
            return;
        };
        if sender.send(notification).is_err() {
            tracing::debug!("notification receiver dropped");
        }
    }
}
