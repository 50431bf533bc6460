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

//! Terminal front-end backed by inquire widgets.
//!
//! This is the rendering collaborator shipped with the crate: the choice
//! primitive is a plain label/value pair, selections map onto
//! [`Select`], free text onto [`Text`], and validators are forwarded so
//! that inquire re-prompts on rejection. The widgets themselves belong to
//! inquire; nothing here renders on its own.

use std::fmt;

use inquire::{
    CustomUserError, Select, Text, error::InquireError,
    validator::Validation as InquireValidation,
};

use crate::{
    question::{Answer, ChoiceFactory, Confirmation, Validation, Validator},
    wizard::{Prompt, PromptError},
};

/// The size of a page in the terminal.
const PAGE_SIZE: usize = 15;

/// A choice as displayed in the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermChoice {
    /// A selectable entry carrying the value to record.
    Entry {
        /// The text displayed in the list.
        label: String,
        /// The answer recorded when the entry is selected.
        value: Answer,
    },
    /// A visual separator between groups of entries.
    Separator,
}

/// Builds terminal choices.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermChoices;

/// Runs the prompts in the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

/// A confirmation option as displayed in the terminal.
#[derive(Debug, Clone, Copy)]
struct ConfirmChoice(Confirmation);

impl fmt::Display for TermChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry { label, .. } => f.write_str(label),
            Self::Separator => f.write_str("──────────────"),
        }
    }
}

impl fmt::Display for ConfirmChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            Confirmation::Commit => "Yes",
            Confirmation::Abort => "Abort commit",
            Confirmation::Edit => "Edit message",
        })
    }
}

impl ChoiceFactory for TermChoices {
    type Choice = TermChoice;

    fn choice(&self, label: &str, value: Answer) -> TermChoice {
        TermChoice::Entry {
            label: label.to_owned(),
            value,
        }
    }

    fn separator(&self) -> TermChoice {
        TermChoice::Separator
    }
}

impl TerminalPrompt {
    /// Creates a terminal prompt.
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for TerminalPrompt {
    type Choice = TermChoice;

    fn select(
        &mut self,
        message: &str,
        choices: Vec<TermChoice>,
    ) -> Result<Answer, PromptError> {
        let choice = Select::new(message, selectable(choices))
            .with_page_size(PAGE_SIZE)
            .prompt()?;

        match choice {
            TermChoice::Entry { value, .. } => Ok(value),
            TermChoice::Separator => Err(PromptError::Other(String::from(
                "a separator has been selected",
            ))),
        }
    }

    fn input(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: Option<Validator>,
    ) -> Result<String, PromptError> {
        let mut text = Text::new(message);

        if let Some(default) = default {
            text = text.with_default(default);
        }

        let text = match validate {
            None => text,
            Some(validate) => text.with_validator(
                move |value: &str| -> Result<
                    InquireValidation,
                    CustomUserError,
                > {
                    Ok(match validate(value) {
                        Validation::Valid => InquireValidation::Valid,
                        Validation::Invalid(message) => {
                            InquireValidation::Invalid(message.into())
                        }
                    })
                },
            ),
        };

        Ok(text.prompt()?)
    }

    fn confirm(
        &mut self,
        message: &str,
    ) -> Result<Confirmation, PromptError> {
        let options = vec![
            ConfirmChoice(Confirmation::Commit),
            ConfirmChoice(Confirmation::Abort),
            ConfirmChoice(Confirmation::Edit),
        ];

        let choice = Select::new(message, options).prompt()?;
        Ok(choice.0)
    }
}

/// Keeps the selectable entries, dropping the separators.
///
/// Inquire renders a flat list: a separator would otherwise be a choice
/// the user could land on.
fn selectable(choices: Vec<TermChoice>) -> Vec<TermChoice> {
    choices
        .into_iter()
        .filter(|choice| !matches!(choice, TermChoice::Separator))
        .collect()
}

impl From<InquireError> for PromptError {
    fn from(error: InquireError) -> Self {
        match error {
            InquireError::OperationCanceled
            | InquireError::OperationInterrupted => Self::Canceled,
            InquireError::IO(error) => Self::Terminal(error),
            other => Self::Other(other.to_string()),
        }
    }
}
