//! Survey flow — the stage state machine and the answer state it collects.

pub mod controller;
pub mod model;
pub mod stage;

pub use controller::{SurveyController, TransitionHandle, View};
pub use model::{RegistrationData, SelectedOptions, SurveyAnswers, TSHIRT_OPTION_COUNT};
pub use stage::Stage;
