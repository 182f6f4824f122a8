use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_ALERT_TTL: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
}

impl AlertKind {
    pub fn css_class(self) -> &'static str {
        match self {
            AlertKind::Success => "alert-success",
            AlertKind::Error => "alert-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
}

/// Alerts currently on screen, oldest first. Overlapping alerts stack.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Alerts {
    next_id: u64,
    items: Vec<Alert>,
}

impl Alerts {
    pub fn push(&mut self, kind: AlertKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Alert {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|alert| alert.id != id);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_stack_and_dismiss_by_id() {
        let mut alerts = Alerts::default();
        let first = alerts.push(AlertKind::Success, "saved");
        let second = alerts.push(AlertKind::Error, "failed");
        assert_ne!(first, second);
        assert_eq!(alerts.len(), 2);

        assert!(alerts.dismiss(first));
        assert!(!alerts.dismiss(first));
        let remaining: Vec<_> = alerts.iter().map(|alert| alert.id).collect();
        assert_eq!(remaining, vec![second]);
    }
}
