// cz-wizard - A customisable conventional-commit question wizard.
// Copyright (C) 2025 The cz-wizard authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3 of the License.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! The interactive session driver.
//!
//! [`run`] walks a built question list strictly in order against a fresh,
//! session-local answer set. The core performs no I/O itself: obtaining a
//! value is an opaque blocking call into the [`Prompt`] collaborator, and
//! the commit preview goes through the [`PreviewSink`] collaborator. An
//! abort is not an error: it is the terminal confirmation value, left for
//! the caller to interpret.

use std::io;

use thiserror::Error;

use crate::question::{
    Answer, Answers, Confirmation, Kind, Question, Validator,
};

/// The rendering collaborator obtaining values from the user.
///
/// Implementations own re-prompting: when a validator rejects a value,
/// the collaborator displays the rejection and asks again, and only
/// acceptable values are returned.
pub trait Prompt {
    /// The choice primitive, shared with the
    /// [`ChoiceFactory`](crate::question::ChoiceFactory) the question
    /// list was built with.
    type Choice;

    /// Asks the user to select one of the choices.
    fn select(
        &mut self,
        message: &str,
        choices: Vec<Self::Choice>,
    ) -> Result<Answer, PromptError>;

    /// Asks the user for free text.
    fn input(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: Option<Validator>,
    ) -> Result<String, PromptError>;

    /// Asks the user for the final confirmation.
    fn confirm(&mut self, message: &str)
    -> Result<Confirmation, PromptError>;
}

/// The sink receiving the commit message preview.
pub trait PreviewSink {
    /// Emits the preview text.
    fn emit(&mut self, preview: &str);
}

/// A sink printing previews to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl PreviewSink for ConsoleSink {
    fn emit(&mut self, preview: &str) {
        println!("{preview}");
    }
}

/// Errors that can occur while prompting.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The user has canceled the session.
    #[error("The prompt has been canceled by the user")]
    Canceled,
    /// The terminal cannot be driven.
    #[error("Failed to interact with the terminal")]
    Terminal(#[source] io::Error),
    /// Any other failure reported by the rendering collaborator.
    #[error("{0}")]
    Other(String),
}

/// Runs one interactive session over a built question list.
///
/// Questions are evaluated one at a time in list order: the presence
/// predicate first (a skipping predicate may pre-assign the answer), then
/// the preview emission for a question carrying one, then the prompt
/// itself. The output filter is applied before the answer is stored.
#[tracing::instrument(level = "trace", skip_all)]
pub fn run<P>(
    questions: &[Question<P::Choice>],
    prompt: &mut P,
    sink: &mut dyn PreviewSink,
) -> Result<Answers, PromptError>
where
    P: Prompt,
    P::Choice: Clone,
{
    let mut answers = Answers::new();

    for question in questions {
        if !question.is_present(&mut answers) {
            tracing::debug!(question = %question.name(), "not presented");
            continue;
        }

        if let Some(preview) = question.preview(&answers) {
            sink.emit(&preview);
        }

        let answer = match question.kind() {
            Kind::Select => {
                prompt.select(question.message(), question.choices(&answers))?
            }
            Kind::Input => {
                let value = prompt.input(
                    question.message(),
                    question.default_value(),
                    question.validator(),
                )?;
                Answer::Text(question.apply_filter(value))
            }
            Kind::Confirm => {
                Answer::Confirm(prompt.confirm(question.message())?)
            }
        };

        tracing::trace!(question = %question.name(), ?answer);
        answers.set(question.name(), answer);
    }

    Ok(answers)
}
