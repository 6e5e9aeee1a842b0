//! Pre-deploy confirmation flow as a two-state machine.
//!
//! ```text
//! AwaitConfirmation --"n"/"no"--> Finished(Cancelled)
//! AwaitConfirmation --other-----> AwaitUrl
//! AwaitUrl ---------""----------> Finished(Proceed { cors_origin: None })
//! AwaitUrl ---------valid URL---> Finished(Proceed { cors_origin: Some(url) })
//! AwaitUrl ---------invalid-----> AwaitUrl (rejected)
//! ```
//!
//! The machine never touches a terminal; callers feed it one answer at a time.

use crate::endpoints;
use serde::Serialize;

pub const BANNER: &str = "
==================================================================================
                           Welcome to Air Remote
==================================================================================

Initializing the application deployment...
==================================================================================

Instructions:
1. Update the `config.json` under the root directory with your own values before
   deploying.

2. This process will create a .env file in the /outputs directory. This file will
   contain all the necessary endpoints for the frontend.
   - Make sure to replace the `<CLIENT-ID>` `<COGNITO-DOMAIN>` with your
     values manually and place the .env file in the base directory of the
     frontend project before deployment of the frontend project.

==================================================================================
";

pub const CONFIRM_QUESTION: &str = "Do you want to deploy? [Y/n]: ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Deploy. `cors_origin` is set when the operator entered a new frontend URL.
    Proceed { cors_origin: Option<String> },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    AwaitConfirmation,
    AwaitUrl,
    Finished(Outcome),
}

/// Result of feeding one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Ask the question for the new state.
    Ask(String),
    /// The answer was rejected; show the message and ask again.
    Rejected { message: String, question: String },
    Done(Outcome),
}

#[derive(Debug, Clone)]
pub struct PreDeployPrompt {
    state: PromptState,
    current_origin: Option<String>,
}

impl PreDeployPrompt {
    /// `current_origin` is the stored `corsOrigin`, offered as the default URL.
    pub fn new(current_origin: Option<String>) -> Self {
        Self {
            state: PromptState::AwaitConfirmation,
            current_origin,
        }
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    pub fn question(&self) -> Option<String> {
        match &self.state {
            PromptState::AwaitConfirmation => Some(CONFIRM_QUESTION.to_string()),
            PromptState::AwaitUrl => Some(match &self.current_origin {
                Some(origin) => format!("Frontend URL [{origin}]: "),
                None => "Frontend URL (e.g. https://app.example.com): ".to_string(),
            }),
            PromptState::Finished(_) => None,
        }
    }

    pub fn feed(&mut self, answer: &str) -> Step {
        let answer = answer.trim();
        match &self.state {
            PromptState::AwaitConfirmation => {
                let normalized = answer.to_lowercase();
                if normalized == "n" || normalized == "no" {
                    self.finish(Outcome::Cancelled)
                } else {
                    self.state = PromptState::AwaitUrl;
                    Step::Ask(self.question().unwrap_or_default())
                }
            }
            PromptState::AwaitUrl => {
                if answer.is_empty() {
                    if self.current_origin.is_none() {
                        return self.reject("a frontend URL is required: no origin is stored yet");
                    }
                    return self.finish(Outcome::Proceed { cors_origin: None });
                }
                match validate_origin_url(answer) {
                    Ok(()) => self.finish(Outcome::Proceed {
                        cors_origin: Some(answer.to_string()),
                    }),
                    Err(message) => self.reject(&message),
                }
            }
            PromptState::Finished(outcome) => Step::Done(outcome.clone()),
        }
    }

    /// End of input counts as declining.
    pub fn close(&mut self) -> Outcome {
        match &self.state {
            PromptState::Finished(outcome) => outcome.clone(),
            _ => {
                self.state = PromptState::Finished(Outcome::Cancelled);
                Outcome::Cancelled
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        self.state = PromptState::Finished(outcome.clone());
        Step::Done(outcome)
    }

    fn reject(&self, message: &str) -> Step {
        Step::Rejected {
            message: message.to_string(),
            question: self.question().unwrap_or_default(),
        }
    }
}

fn validate_origin_url(answer: &str) -> Result<(), String> {
    endpoints::origin_domain(answer)
        .map(|_| ())
        .map_err(|e| e.to_string())
}
