//! Named report operations — one per action in the collection catalog.
//!
//! Every payload carries `ip` and `surveyId` (trackError carries `surveyId`
//! only). All wrappers except the registration submission post in
//! best-effort mode and swallow failures locally, so a reporting hiccup can
//! never interrupt the flow.

use serde_json::json;

use crate::error::ReportError;
use crate::flow::model::{RegistrationData, SelectedOptions, SurveyAnswers};
use crate::report::client::{DeliveryMode, Reporter};

// Action names are fixed and case-sensitive; the receiving script routes
// each one to its own sheet.
pub const LOG_SURVEY_START: &str = "logSurveyStart";
pub const SUBMIT_TSHIRT_SELECTION: &str = "submitTshirtSelection";
pub const LOG_PREFERENCES_INTRO_CLICK: &str = "logPreferencesIntroClick";
pub const SUBMIT_QUESTION_ANSWERS: &str = "submitQuestionAnswers";
pub const LOG_REGISTRATION_INTRO_CLICK: &str = "logRegistrationIntroClick";
pub const SUBMIT_REGISTRATION_DATA: &str = "submitRegistrationData";
pub const LOG_COMPLETED_PAGE_CLICK: &str = "logCompletedPageClick";
pub const TRACK_ERROR: &str = "trackError";

impl Reporter {
    /// Send a best-effort report, logging and discarding any failure.
    async fn best_effort(&self, action: &str, data: serde_json::Value) {
        if let Err(error) = self.report(action, data, DeliveryMode::BestEffort).await {
            tracing::warn!(action, %error, "best-effort report dropped");
        }
    }

    pub async fn log_survey_start(&self, ip: &str, survey_id: &str) {
        self.best_effort(LOG_SURVEY_START, json!({"ip": ip, "surveyId": survey_id}))
            .await;
    }

    /// Submit the t-shirt selection, expanded into one flag per option.
    pub async fn submit_tshirt_selection(
        &self,
        ip: &str,
        survey_id: &str,
        selected: &SelectedOptions,
    ) {
        let mut data = serde_json::Map::new();
        data.insert("ip".to_string(), json!(ip));
        data.insert("surveyId".to_string(), json!(survey_id));
        for (name, flag) in selected.flag_entries() {
            data.insert(name, json!(flag));
        }
        self.best_effort(SUBMIT_TSHIRT_SELECTION, serde_json::Value::Object(data))
            .await;
    }

    pub async fn log_preferences_intro_click(&self, ip: &str, survey_id: &str) {
        self.best_effort(
            LOG_PREFERENCES_INTRO_CLICK,
            json!({"ip": ip, "surveyId": survey_id}),
        )
        .await;
    }

    /// Submit the accumulated question answers, flattened beside the
    /// correlation fields.
    pub async fn submit_question_answers(&self, ip: &str, survey_id: &str, answers: &SurveyAnswers) {
        let mut data = serde_json::Map::new();
        data.insert("ip".to_string(), json!(ip));
        data.insert("surveyId".to_string(), json!(survey_id));
        for (question, answer) in answers.iter() {
            data.insert(question.clone(), answer.clone());
        }
        self.best_effort(SUBMIT_QUESTION_ANSWERS, serde_json::Value::Object(data))
            .await;
    }

    pub async fn log_registration_intro_click(&self, ip: &str, survey_id: &str) {
        self.best_effort(
            LOG_REGISTRATION_INTRO_CLICK,
            json!({"ip": ip, "surveyId": survey_id}),
        )
        .await;
    }

    /// Submit the registration form. This is the one verified report: the
    /// caller gets a definite success/failure signal.
    pub async fn submit_registration_data(
        &self,
        ip: &str,
        survey_id: &str,
        registration: &RegistrationData,
    ) -> Result<(), ReportError> {
        let mut data = serde_json::Map::new();
        data.insert("ip".to_string(), json!(ip));
        data.insert("surveyId".to_string(), json!(survey_id));
        if let serde_json::Value::Object(fields) = serde_json::to_value(registration)? {
            data.extend(fields);
        }
        self.report(
            SUBMIT_REGISTRATION_DATA,
            serde_json::Value::Object(data),
            DeliveryMode::Verified,
        )
        .await
    }

    pub async fn log_completed_page_click(&self, ip: &str, survey_id: &str) {
        self.best_effort(
            LOG_COMPLETED_PAGE_CLICK,
            json!({"ip": ip, "surveyId": survey_id}),
        )
        .await;
    }

    /// Report a client-side runtime error. Carries the survey id but no ip;
    /// the stack field is omitted entirely when there is none.
    pub async fn track_error(&self, survey_id: &str, message: &str, stack: Option<&str>) {
        let mut data = serde_json::Map::new();
        data.insert("surveyId".to_string(), json!(survey_id));
        data.insert("message".to_string(), json!(message));
        if let Some(stack) = stack {
            data.insert("stack".to_string(), json!(stack));
        }
        self.best_effort(TRACK_ERROR, serde_json::Value::Object(data))
            .await;
    }
}
