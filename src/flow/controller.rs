//! SurveyController — owns the current stage, the accumulated answers, and
//! the per-stage reporting side effects.
//!
//! The controller is the sole owner of transition order: screens report
//! user input and ask it to advance, but no screen can jump directly to
//! another. Every forward transition dispatches its report as a detached
//! best-effort task; only the final registration submission is awaited.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::config::SurveyConfig;
use crate::error::FlowError;
use crate::flow::model::{RegistrationData, SelectedOptions, SurveyAnswers};
use crate::flow::stage::Stage;
use crate::report::Reporter;
use crate::session::identity::SurveyId;
use crate::session::lookup::{resolve_address, AddressLookup};

/// What the host should have on screen right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Loading,
    Landing,
    TshirtSelection,
    PreferencesIntro,
    Questions,
    RegistrationIntro,
    Registration,
    Completed,
}

impl From<Stage> for View {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Landing => View::Landing,
            Stage::TshirtSelection => View::TshirtSelection,
            Stage::PreferencesIntro => View::PreferencesIntro,
            Stage::Questions => View::Questions,
            Stage::RegistrationIntro => View::RegistrationIntro,
            Stage::Registration => View::Registration,
            Stage::Completed => View::Completed,
        }
    }
}

/// Handle to a scheduled stage transition.
///
/// Dropping the handle detaches the timer; the transition still fires. An
/// owner being torn down simply abandons it (or calls [`abort`]), in which
/// case the pending transition is dropped.
///
/// [`abort`]: TransitionHandle::abort
#[derive(Debug)]
pub struct TransitionHandle(JoinHandle<()>);

impl TransitionHandle {
    /// Cancel the pending transition.
    pub fn abort(&self) {
        self.0.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }

    /// Wait for the transition to apply. Completes immediately if the
    /// transition was aborted.
    pub async fn wait(self) {
        let _ = self.0.await;
    }
}

#[derive(Debug, Default)]
struct FlowState {
    stage: Stage,
    loading: bool,
    selected: SelectedOptions,
    answers: SurveyAnswers,
    registration: RegistrationData,
    client_address: Option<String>,
}

/// The stage-transition state machine.
pub struct SurveyController {
    state: Arc<RwLock<FlowState>>,
    survey_id: SurveyId,
    reporter: Arc<Reporter>,
    config: SurveyConfig,
}

impl SurveyController {
    /// Build a controller at the Landing stage with a freshly minted id.
    pub fn new(config: SurveyConfig, reporter: Arc<Reporter>) -> Self {
        Self {
            state: Arc::new(RwLock::new(FlowState::default())),
            survey_id: SurveyId::mint(),
            reporter,
            config,
        }
    }

    pub fn survey_id(&self) -> &SurveyId {
        &self.survey_id
    }

    pub async fn stage(&self) -> Stage {
        self.state.read().await.stage
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn client_address(&self) -> Option<String> {
        self.state.read().await.client_address.clone()
    }

    /// The render rule: Loading while a transition is pending, and for
    /// every stage after Landing until the client address has resolved.
    pub async fn view(&self) -> View {
        let state = self.state.read().await;
        if state.loading || (state.stage != Stage::Landing && state.client_address.is_none()) {
            return View::Loading;
        }
        View::from(state.stage)
    }

    // ── Session wiring ──────────────────────────────────────────────

    /// Install the resolved client address. First write wins; the address
    /// is immutable once set.
    pub async fn set_client_address(&self, address: String) {
        let mut state = self.state.write().await;
        if state.client_address.is_none() {
            tracing::debug!(%address, "client address resolved");
            state.client_address = Some(address);
        }
    }

    /// Run the one-shot address lookup and install the result (or the
    /// sentinel fallback).
    pub async fn resolve_client_address(&self, lookup: &dyn AddressLookup) {
        let address = resolve_address(lookup).await;
        self.set_client_address(address).await;
    }

    // ── Answer mutation (driven by the screens) ─────────────────────

    pub async fn toggle_option(&self, option: &str) {
        self.state.write().await.selected.toggle(option);
    }

    pub async fn record_answer(&self, question: impl Into<String>, answer: serde_json::Value) {
        self.state.write().await.answers.record(question, answer);
    }

    pub async fn set_registration(&self, registration: RegistrationData) {
        self.state.write().await.registration = registration;
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Schedule a transition to `next` after `delay`.
    ///
    /// The loading flag is raised before this returns; the stage switches
    /// and the flag drops together once the delay elapses. The delay is a
    /// pacing device for the transitional loading screen, not a data
    /// dependency.
    pub async fn advance(&self, next: Stage, delay: Duration) -> TransitionHandle {
        {
            let mut state = self.state.write().await;
            state.loading = true;
        }
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.write().await;
            state.stage = next;
            state.loading = false;
        });
        TransitionHandle(handle)
    }

    /// Leave Landing: log the survey start and advance to the t-shirt
    /// selection.
    pub async fn start_survey(&self) -> TransitionHandle {
        if let Some(ip) = self.client_address().await {
            let reporter = Arc::clone(&self.reporter);
            let id = self.survey_id.clone();
            tokio::spawn(async move {
                reporter.log_survey_start(&ip, id.as_str()).await;
            });
        }
        self.advance(Stage::TshirtSelection, self.config.advance_delay)
            .await
    }

    /// Leave TshirtSelection: submit the expanded selection flags and
    /// advance to the preferences intro.
    pub async fn submit_tshirts(&self) -> TransitionHandle {
        if let Some(ip) = self.client_address().await {
            let selected = self.state.read().await.selected.clone();
            let reporter = Arc::clone(&self.reporter);
            let id = self.survey_id.clone();
            tokio::spawn(async move {
                reporter
                    .submit_tshirt_selection(&ip, id.as_str(), &selected)
                    .await;
            });
        }
        self.advance(Stage::PreferencesIntro, self.config.advance_delay)
            .await
    }

    /// Leave PreferencesIntro: log the click and advance to the questions.
    pub async fn acknowledge_preferences_intro(&self) -> TransitionHandle {
        if let Some(ip) = self.client_address().await {
            let reporter = Arc::clone(&self.reporter);
            let id = self.survey_id.clone();
            tokio::spawn(async move {
                reporter.log_preferences_intro_click(&ip, id.as_str()).await;
            });
        }
        self.advance(Stage::Questions, self.config.advance_delay).await
    }

    /// Leave Questions: submit the accumulated answers and advance to the
    /// registration intro.
    pub async fn submit_answers(&self) -> TransitionHandle {
        if let Some(ip) = self.client_address().await {
            let answers = self.state.read().await.answers.clone();
            let reporter = Arc::clone(&self.reporter);
            let id = self.survey_id.clone();
            tokio::spawn(async move {
                reporter
                    .submit_question_answers(&ip, id.as_str(), &answers)
                    .await;
            });
        }
        self.advance(Stage::RegistrationIntro, self.config.advance_delay)
            .await
    }

    /// Leave RegistrationIntro: log the click and advance to the
    /// registration form.
    pub async fn acknowledge_registration_intro(&self) -> TransitionHandle {
        if let Some(ip) = self.client_address().await {
            let reporter = Arc::clone(&self.reporter);
            let id = self.survey_id.clone();
            tokio::spawn(async move {
                reporter
                    .log_registration_intro_click(&ip, id.as_str())
                    .await;
            });
        }
        self.advance(Stage::Registration, self.config.advance_delay)
            .await
    }

    /// Submit the registration form and, on success, schedule the shorter
    /// transition to Completed.
    ///
    /// On a real submission failure the failure is reported best-effort as
    /// a tracked error, the loading flag drops, and the error is returned
    /// for the host to alert on; the user stays on the registration stage
    /// and may resubmit. There is no automatic retry.
    pub async fn complete_survey(&self) -> Result<TransitionHandle, FlowError> {
        // The survey id is minted at construction, so only the address can
        // be missing here.
        let Some(ip) = self.client_address().await else {
            tracing::error!("client address not resolved; registration not submitted");
            return Err(FlowError::AddressUnresolved);
        };

        {
            let mut state = self.state.write().await;
            state.loading = true;
        }

        let registration = self.state.read().await.registration.clone();
        match self
            .reporter
            .submit_registration_data(&ip, self.survey_id.as_str(), &registration)
            .await
        {
            Ok(()) => Ok(self
                .advance(Stage::Completed, self.config.completion_delay)
                .await),
            Err(error) => {
                tracing::error!(%error, "registration submission failed");
                self.reporter
                    .track_error(
                        self.survey_id.as_str(),
                        "RegistrationSubmissionFailed",
                        Some(&error.to_string()),
                    )
                    .await;
                let mut state = self.state.write().await;
                state.loading = false;
                Err(FlowError::Submission(error))
            }
        }
    }

    /// Log a click on the completed screen.
    pub async fn log_completed_click(&self) {
        if let Some(ip) = self.client_address().await {
            let reporter = Arc::clone(&self.reporter);
            let id = self.survey_id.clone();
            tokio::spawn(async move {
                reporter.log_completed_page_click(&ip, id.as_str()).await;
            });
        }
    }
}
