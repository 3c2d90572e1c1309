use crate::messaging::Draft;
use std::collections::BTreeSet;

/// Symptom ids the user has ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedSymptoms(BTreeSet<String>);

impl SelectedSymptoms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for SelectedSymptoms {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PossibleCondition {
    pub name: String,
    /// Likelihood in `[0, 1]`.
    pub probability: f32,
    pub severity: Severity,
    pub description: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentResult {
    /// Most likely first.
    pub possible_conditions: Vec<PossibleCondition>,
    pub urgency: Severity,
    pub recommendations: Vec<String>,
}

/// How long the symptoms have been present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymptomDuration {
    #[default]
    LessThanDay,
    FewDays,
    AboutWeek,
    LongerThanWeek,
}

impl SymptomDuration {
    const ALL: [SymptomDuration; 4] = [
        SymptomDuration::LessThanDay,
        SymptomDuration::FewDays,
        SymptomDuration::AboutWeek,
        SymptomDuration::LongerThanWeek,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SymptomDuration::LessThanDay => "Less than a day",
            SymptomDuration::FewDays => "A few days",
            SymptomDuration::AboutWeek => "About a week",
            SymptomDuration::LongerThanWeek => "Longer than a week",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Extra information gathered on the details step.
#[derive(Debug, Default)]
pub struct AssessmentDetails {
    pub duration: SymptomDuration,
    pub notes: Draft,
}

impl AssessmentDetails {
    pub fn reset(&mut self) {
        self.duration = SymptomDuration::default();
        self.notes.clear();
    }
}
