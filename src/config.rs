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

//! Configuration for the wizard.
//!
//! A [`Config`] is what the caller hands over: partially specified, with
//! every optional field defaulted by serde so it can be deserialised from a
//! sparse document. [`Config::normalized`] turns it into an
//! [`EffectiveConfig`] where every message template and limit has a
//! concrete value. Normalisation is pure defaulting: it returns a new
//! value and has no error conditions.

use indexmap::{IndexMap, indexmap};
use serde::{Deserialize, Serialize};

use crate::question::QuestionName;

/// The default message for the type question.
const TYPE_MESSAGE: &str =
    "Select the type of change that you're committing:";
/// The default message for the scope question.
const SCOPE_MESSAGE: &str = "\nDenote the SCOPE of this change (optional):";
/// The default message for the custom scope question.
const CUSTOM_SCOPE_MESSAGE: &str = "Denote the SCOPE of this change:";
/// The prefix of the ticket number message when a pattern is configured.
const TICKET_NUMBER_PATTERN_PREFIX: &str =
    "Enter the ticket number following this pattern";
/// The default message for the ticket number question.
const TICKET_NUMBER_MESSAGE: &str = "Enter the ticket number:\n";
/// The default message for the subject question.
const SUBJECT_MESSAGE: &str =
    "Write a SHORT, IMPERATIVE tense description of the change:\n";
/// The default message for the body question.
const BODY_MESSAGE: &str = "Provide a LONGER description of the change \
    (optional). Use \"|\" to break new line:\n";
/// The default message for the breaking change question.
const BREAKING_MESSAGE: &str = "List any BREAKING CHANGES (optional):\n";
/// The default message for the footer question.
const FOOTER_MESSAGE: &str = "List any ISSUES CLOSED by this change \
    (optional). E.g.: #31, #34:\n";
/// The default message for the final confirmation.
const CONFIRM_COMMIT_MESSAGE: &str =
    "Are you sure you want to proceed with the commit above?";

/// The default subject length limit.
const DEFAULT_SUBJECT_LIMIT: usize = 100;

/// The wizard configuration, as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The valid commit types, mapping each type to its description.
    pub types: IndexMap<String, String>,
    /// The accepted scopes.
    pub scopes: Vec<String>,
    /// Per-type scope lists, replacing `scopes` for the types they name.
    pub scope_overrides: IndexMap<String, Vec<String>>,
    /// Whether an arbitrary scope may be entered.
    pub allow_custom_scopes: bool,
    /// Whether a type without scopes gets an empty scope instead of a
    /// custom one.
    pub skip_empty_scopes: bool,
    /// Whether to ask for a ticket number.
    pub allow_ticket_number: bool,
    /// Whether an empty ticket number is rejected.
    pub is_ticket_number_required: bool,
    /// The pattern valid ticket numbers are built from.
    pub ticket_number_regexp: Option<String>,
    /// Whether to ask for breaking changes before anything else.
    pub ask_for_breaking_change_first: bool,
    /// The types for which to ask for breaking changes.
    pub allow_breaking_changes: Vec<String>,
    /// Whether to prefill the subject and body from a previously prepared
    /// commit message.
    pub use_prepared_commit: bool,
    /// Whether the subject starts with an upper-case character.
    pub upper_case_subject: bool,
    /// The subject length limit.
    pub subject_limit: Option<usize>,
    /// The message templates.
    pub messages: Messages,
    /// The questions to skip entirely.
    pub skip_questions: Vec<QuestionName>,
}

/// Overrides for the message templates.
///
/// An empty template counts as unset and falls back to the built-in
/// default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// The message for the type question.
    pub r#type: Option<String>,
    /// The message for the scope question.
    pub scope: Option<String>,
    /// The message for the custom scope question.
    pub custom_scope: Option<String>,
    /// The message for the ticket number question.
    pub ticket_number: Option<String>,
    /// The message for the ticket number question when a pattern is
    /// configured, used only when `ticket_number` is unset.
    pub ticket_number_pattern: Option<String>,
    /// The message for the subject question.
    pub subject: Option<String>,
    /// The message for the body question.
    pub body: Option<String>,
    /// The message for the breaking change question.
    pub breaking: Option<String>,
    /// The message for the footer question.
    pub footer: Option<String>,
    /// The message for the final confirmation.
    pub confirm_commit: Option<String>,
}

/// The effective configuration, with every optional field resolved.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    /// The valid commit types, mapping each type to its description.
    pub types: IndexMap<String, String>,
    /// The accepted scopes.
    pub scopes: Vec<String>,
    /// Per-type scope lists, replacing `scopes` for the types they name.
    pub scope_overrides: IndexMap<String, Vec<String>>,
    /// Whether an arbitrary scope may be entered.
    pub allow_custom_scopes: bool,
    /// Whether a type without scopes gets an empty scope instead of a
    /// custom one.
    pub skip_empty_scopes: bool,
    /// Whether to ask for a ticket number.
    pub allow_ticket_number: bool,
    /// Whether an empty ticket number is rejected.
    pub is_ticket_number_required: bool,
    /// The pattern valid ticket numbers are built from.
    pub ticket_number_regexp: Option<String>,
    /// Whether to ask for breaking changes before anything else.
    pub ask_for_breaking_change_first: bool,
    /// The types for which to ask for breaking changes.
    pub allow_breaking_changes: Vec<String>,
    /// Whether to prefill the subject and body from a previously prepared
    /// commit message.
    pub use_prepared_commit: bool,
    /// Whether the subject starts with an upper-case character.
    pub upper_case_subject: bool,
    /// The subject length limit.
    pub subject_limit: usize,
    /// The message for each question, all non-empty.
    pub messages: PromptMessages,
    /// The questions to skip entirely.
    pub skip_questions: Vec<QuestionName>,
}

/// The resolved message for each question.
#[derive(Debug, Clone)]
pub struct PromptMessages {
    /// The message for the type question.
    pub r#type: String,
    /// The message for the scope question.
    pub scope: String,
    /// The message for the custom scope question.
    pub custom_scope: String,
    /// The message for the ticket number question.
    pub ticket_number: String,
    /// The message for the subject question.
    pub subject: String,
    /// The message for the body question.
    pub body: String,
    /// The message for the breaking change question.
    pub breaking: String,
    /// The message for the footer question.
    pub footer: String,
    /// The message for the final confirmation.
    pub confirm_commit: String,
}

impl Default for Config {
    fn default() -> Self {
        let default_types = indexmap! {
            "feat" => "A new feature",
            "fix" => "A bug fix",
            "docs" => "Documentation only changes",
            "style" => "Changes that do not affect the meaning of the code",
            "refactor" => "A change that neither fixes a bug nor adds a feature",
            "perf" => "A change that improves performance",
            "test" => "Adding missing tests",
            "build" => "Changes to the build process or auxiliary tools",
            "ci" => "Changes to the CI configuration",
            "chore" => "Other changes that don't modify source or test files",
            "revert" => "Revert to a commit",
            "wip" => "Work in progress",
        };

        Self {
            types: default_types
                .into_iter()
                .map(|(key, value)| (String::from(key), String::from(value)))
                .collect(),
            scopes: vec![],
            scope_overrides: IndexMap::new(),
            allow_custom_scopes: false,
            skip_empty_scopes: false,
            allow_ticket_number: false,
            is_ticket_number_required: false,
            ticket_number_regexp: None,
            ask_for_breaking_change_first: false,
            allow_breaking_changes: vec![],
            use_prepared_commit: false,
            upper_case_subject: false,
            subject_limit: None,
            messages: Messages::default(),
            skip_questions: vec![],
        }
    }
}

impl Config {
    /// Resolves every optional field to a concrete value.
    pub fn normalized(&self) -> EffectiveConfig {
        EffectiveConfig {
            types: self.types.clone(),
            scopes: self.scopes.clone(),
            scope_overrides: self.scope_overrides.clone(),
            allow_custom_scopes: self.allow_custom_scopes,
            skip_empty_scopes: self.skip_empty_scopes,
            allow_ticket_number: self.allow_ticket_number,
            is_ticket_number_required: self.is_ticket_number_required,
            ticket_number_regexp: self.ticket_number_regexp.clone(),
            ask_for_breaking_change_first: self.ask_for_breaking_change_first,
            allow_breaking_changes: self.allow_breaking_changes.clone(),
            use_prepared_commit: self.use_prepared_commit,
            upper_case_subject: self.upper_case_subject,
            subject_limit: self.subject_limit.unwrap_or(DEFAULT_SUBJECT_LIMIT),
            messages: self
                .messages
                .filled(self.ticket_number_regexp.as_deref()),
            skip_questions: self.skip_questions.clone(),
        }
    }
}

impl Messages {
    /// Resolves every template, falling back to the built-in defaults.
    fn filled(&self, ticket_number_regexp: Option<&str>) -> PromptMessages {
        let ticket_number = match non_empty(&self.ticket_number) {
            Some(message) => message,
            None => match ticket_number_regexp {
                Some(pattern) => non_empty(&self.ticket_number_pattern)
                    .unwrap_or_else(|| {
                        format!(
                            "{TICKET_NUMBER_PATTERN_PREFIX} ({pattern})\n"
                        )
                    }),
                None => TICKET_NUMBER_MESSAGE.to_owned(),
            },
        };

        PromptMessages {
            r#type: or_default(&self.r#type, TYPE_MESSAGE),
            scope: or_default(&self.scope, SCOPE_MESSAGE),
            custom_scope: or_default(&self.custom_scope, CUSTOM_SCOPE_MESSAGE),
            ticket_number,
            subject: or_default(&self.subject, SUBJECT_MESSAGE),
            body: or_default(&self.body, BODY_MESSAGE),
            breaking: or_default(&self.breaking, BREAKING_MESSAGE),
            footer: or_default(&self.footer, FOOTER_MESSAGE),
            confirm_commit: or_default(
                &self.confirm_commit,
                CONFIRM_COMMIT_MESSAGE,
            ),
        }
    }
}

/// Returns the template if it is set and non-empty.
fn non_empty(message: &Option<String>) -> Option<String> {
    message
        .as_deref()
        .filter(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}

/// Returns the template, falling back to `default`.
fn or_default(message: &Option<String>, default: &str) -> String {
    non_empty(message).unwrap_or_else(|| default.to_owned())
}
