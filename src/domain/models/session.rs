#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use super::has_resume;
use super::job_description_ready;
use super::step_indicators;
use super::AnalysisResult;
use super::ProgressMarkers;
use super::ResumeFile;
use super::StepIndicator;
use super::ValidationError;
use super::WizardStep;

/// Everything the wizard knows about the current analysis. One instance lives
/// for the whole run and is cleared by `reset`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub uploaded_file: Option<ResumeFile>,
    pub job_description: String,
    pub current_step: WizardStep,
    pub last_result: Option<AnalysisResult>,
    pub progress: ProgressMarkers,
}

impl SessionState {
    pub fn attach_file(&mut self, file: ResumeFile) -> Result<(), ValidationError> {
        file.validate()?;

        self.uploaded_file = Some(file);
        self.progress.activate(1);

        return Ok(());
    }

    pub fn remove_file(&mut self) {
        self.uploaded_file = None;
    }

    pub fn set_job_description(&mut self, text: &str) {
        self.job_description = text.to_string();
        self.progress.activate(2);
    }

    pub fn clear_job_description(&mut self) {
        self.job_description = "".to_string();
    }

    pub fn has_resume(&self) -> bool {
        return has_resume(&self.uploaded_file);
    }

    pub fn job_description_ready(&self) -> bool {
        return job_description_ready(&self.job_description);
    }

    pub fn character_count(&self) -> usize {
        return self.job_description.chars().count();
    }

    pub fn can_analyze(&self) -> bool {
        return self.has_resume() && self.job_description_ready();
    }

    /// Forward moves are gated on the predicate of the step being left.
    pub fn next_step(&mut self) -> Result<WizardStep, ValidationError> {
        match self.current_step {
            WizardStep::Upload if !self.has_resume() => {
                return Err(ValidationError::ResumeRequired);
            }
            WizardStep::JobDescription if !self.job_description_ready() => {
                return Err(ValidationError::JobDescriptionTooShort);
            }
            _ => {}
        }

        if let Some(next) = self.current_step.next() {
            self.show_step(next);
        }

        return Ok(self.current_step);
    }

    pub fn back_step(&mut self) -> WizardStep {
        if let Some(previous) = self.current_step.previous() {
            self.show_step(previous);
        }

        return self.current_step;
    }

    pub fn show_step(&mut self, step: WizardStep) {
        self.current_step = step;
    }

    pub fn indicators(&self) -> Vec<StepIndicator> {
        return step_indicators(self.current_step);
    }

    /// Start new analysis: drops the file, text and result, and rewinds the
    /// wizard to the first step.
    pub fn reset(&mut self) {
        *self = SessionState::default();
        self.progress.reset();
    }
}
