#[cfg(test)]
#[path = "wizard_step_test.rs"]
mod tests;

use strum::EnumIter;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, EnumIter)]
pub enum WizardStep {
    #[default]
    Upload,
    JobDescription,
    Review,
}

impl WizardStep {
    pub fn index(&self) -> usize {
        match self {
            WizardStep::Upload => return 0,
            WizardStep::JobDescription => return 1,
            WizardStep::Review => return 2,
        }
    }

    pub fn from_index(idx: usize) -> Option<WizardStep> {
        return WizardStep::iter().find(|e| return e.index() == idx);
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Upload => return "Upload resume",
            WizardStep::JobDescription => return "Job description",
            WizardStep::Review => return "Review & analyze",
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        return WizardStep::from_index(self.index() + 1);
    }

    pub fn previous(&self) -> Option<WizardStep> {
        if self.index() == 0 {
            return None;
        }
        return WizardStep::from_index(self.index() - 1);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorState {
    Pending,
    Active,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepIndicator {
    pub step: WizardStep,
    pub state: IndicatorState,
}

/// One indicator per step: the current step is active, everything before it
/// is completed.
pub fn step_indicators(current: WizardStep) -> Vec<StepIndicator> {
    return WizardStep::iter()
        .map(|step| {
            let state = if step == current {
                IndicatorState::Active
            } else if step < current {
                IndicatorState::Completed
            } else {
                IndicatorState::Pending
            };

            return StepIndicator { step, state };
        })
        .collect();
}

pub const PROGRESS_MARKER_COUNT: usize = 3;

/// Visual progress through the analyzer, separate from the navigator. Markers
/// are numbered from 1 and once lit stay lit until `reset`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressMarkers {
    active: [bool; PROGRESS_MARKER_COUNT],
}

impl Default for ProgressMarkers {
    fn default() -> ProgressMarkers {
        let mut markers = ProgressMarkers {
            active: [false; PROGRESS_MARKER_COUNT],
        };
        markers.activate(1);
        return markers;
    }
}

impl ProgressMarkers {
    pub fn activate(&mut self, upto: usize) {
        for idx in 1..=upto.min(PROGRESS_MARKER_COUNT) {
            self.active[idx - 1] = true;
        }
    }

    pub fn is_active(&self, marker: usize) -> bool {
        if marker == 0 || marker > PROGRESS_MARKER_COUNT {
            return false;
        }
        return self.active[marker - 1];
    }

    pub fn reset(&mut self) {
        *self = ProgressMarkers::default();
    }
}
