//! Enum-to-display lookups for badges and icons.

use crate::assessment::Severity;
use crate::catalog::{AttachmentKind, ContactStatus};
use crate::ui::theme::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub glyph: &'static str,
    pub label: &'static str,
    pub tone: Tone,
}

pub fn severity_badge(severity: Severity) -> Badge {
    match severity {
        Severity::Low => Badge { glyph: "●", label: "Low", tone: Tone::Success },
        Severity::Medium => Badge { glyph: "▲", label: "Medium", tone: Tone::Warning },
        Severity::High => Badge { glyph: "◆", label: "High", tone: Tone::Danger },
    }
}

pub fn status_badge(status: ContactStatus) -> Badge {
    match status {
        ContactStatus::Online => Badge { glyph: "●", label: "Online", tone: Tone::Success },
        ContactStatus::Offline => Badge { glyph: "○", label: "Offline", tone: Tone::Muted },
    }
}

pub fn attachment_badge(kind: AttachmentKind) -> Badge {
    match kind {
        AttachmentKind::Image => Badge { glyph: "▣", label: "Image", tone: Tone::Accent },
        AttachmentKind::Document => Badge { glyph: "▤", label: "Document", tone: Tone::Accent },
        AttachmentKind::Prescription => {
            Badge { glyph: "℞", label: "Prescription", tone: Tone::Warning }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_tones_escalate() {
        assert_eq!(severity_badge(Severity::Low).tone, Tone::Success);
        assert_eq!(severity_badge(Severity::Medium).tone, Tone::Warning);
        assert_eq!(severity_badge(Severity::High).tone, Tone::Danger);
    }

    #[test]
    fn test_labels() {
        assert_eq!(status_badge(ContactStatus::Offline).label, "Offline");
        assert_eq!(attachment_badge(AttachmentKind::Prescription).glyph, "℞");
    }
}
