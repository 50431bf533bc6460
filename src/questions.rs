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

//! The question graph builder.
//!
//! [`build`] wires the ordered question list: each node carries its
//! presence predicate, choices, validator, default and output filter as
//! functions of the effective configuration and of the answers collected
//! earlier in the session. The semantics live here; presenting the
//! questions is the session driver's business ([`crate::wizard`]).

use std::rc::Rc;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

use crate::{
    config::{Config, EffectiveConfig},
    policy,
    prepared::{self, Part, PreparedCommitSource},
    question::{
        Answer, Answers, ChoiceFactory, CommitFormatter, Question,
        QuestionName, Validation,
    },
    rules,
    tracing::LogResult as _,
};

/// The scope value that makes the wizard ask for a custom scope.
pub const CUSTOM_SCOPE: &str = "custom";

/// The label of the explicit empty scope choice.
const EMPTY_SCOPE_LABEL: &str = "empty";

/// The line framing the commit message preview.
const PREVIEW_SEPARATOR: &str =
    "###--------------------------------------------------------###";

/// Errors that can occur when building the question list.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configured ticket number pattern is not a valid regular
    /// expression.
    #[error("Invalid ticket number pattern")]
    TicketPattern(#[from] regex::Error),
}

/// Builds the ordered question list for one session.
///
/// The configuration is normalised once, the ticket pattern is compiled
/// once, and the prepared commit message is read once, all at build time.
/// The returned list already has the skip list and the breaking-first
/// policy applied.
#[tracing::instrument(level = "trace", skip_all)]
pub fn build<F>(
    config: &Config,
    factory: F,
    formatter: Rc<dyn CommitFormatter>,
    prepared: &dyn PreparedCommitSource,
) -> Result<Vec<Question<F::Choice>>, BuildError>
where
    F: ChoiceFactory + 'static,
{
    let config = Rc::new(config.normalized());
    let factory = Rc::new(factory);

    let ticket_pattern = config
        .ticket_number_regexp
        .as_deref()
        .map(Regex::new)
        .transpose()
        .map_err(BuildError::TicketPattern)
        .log_err()?;

    let (subject_default, body_default) =
        prepared_defaults(&config, prepared);

    let questions = vec![
        type_question(&config, &factory),
        scope_question(&config, &factory),
        custom_scope_question(&config),
        ticket_number_question(&config, ticket_pattern),
        subject_question(&config, subject_default),
        body_question(&config, body_default),
        breaking_question(&config),
        footer_question(&config),
        confirm_question(&config, formatter),
    ];

    Ok(policy::apply(questions, &config))
}

/// Resolves the subject and body defaults from the prepared commit.
fn prepared_defaults(
    config: &EffectiveConfig,
    prepared: &dyn PreparedCommitSource,
) -> (Option<String>, Option<String>) {
    if !config.use_prepared_commit {
        return (None, None);
    }

    match prepared.read() {
        Some(text) => (
            prepared::extract(&text, Part::Subject),
            prepared::extract(&text, Part::Body),
        ),
        None => (None, None),
    }
}

/// The type question: always present, one choice per configured type.
fn type_question<F: ChoiceFactory>(
    config: &Rc<EffectiveConfig>,
    factory: &Rc<F>,
) -> Question<F::Choice> {
    let choices = format_types(&config.types)
        .into_iter()
        .zip(config.types.keys())
        .map(|(label, commit_type)| {
            factory.choice(&label, Answer::Text(commit_type.clone()))
        })
        .collect();

    Question::select(QuestionName::Type, &config.messages.r#type, choices)
}

/// The scope question.
///
/// Choices depend on the chosen type: its override list when it has one,
/// the global list otherwise, with `empty` and `custom` entries appended
/// when custom scopes are allowed or no scope is configured. When the
/// type has no scope at all the question is skipped and the answer is
/// pre-assigned; otherwise it is presented unless the type is a wip.
fn scope_question<F: ChoiceFactory + 'static>(
    config: &Rc<EffectiveConfig>,
    factory: &Rc<F>,
) -> Question<F::Choice> {
    let choices = {
        let config = Rc::clone(config);
        let factory = Rc::clone(factory);
        move |answers: &Answers| {
            let scopes =
                scopes_for(&config, answers.text(QuestionName::Type));

            let mut choices: Vec<F::Choice> = scopes
                .iter()
                .map(|scope| {
                    factory.choice(scope, Answer::Text(scope.clone()))
                })
                .collect();

            if config.allow_custom_scopes || scopes.is_empty() {
                choices.push(factory.separator());
                choices.push(factory.choice(EMPTY_SCOPE_LABEL, Answer::Empty));
                choices.push(factory.choice(
                    CUSTOM_SCOPE,
                    Answer::Text(CUSTOM_SCOPE.to_owned()),
                ));
            }

            choices
        }
    };

    let when = {
        let config = Rc::clone(config);
        move |answers: &mut Answers| {
            let commit_type = answers.text(QuestionName::Type).to_owned();

            if scopes_for(&config, &commit_type).is_empty() {
                let scope = if config.skip_empty_scopes {
                    String::new()
                } else {
                    CUSTOM_SCOPE.to_owned()
                };
                tracing::debug!(%scope, "no configured scope, pre-assigning");
                answers.set(QuestionName::Scope, Answer::Text(scope));
                false
            } else {
                !rules::is_wip(&commit_type)
            }
        }
    };

    Question::select_with(QuestionName::Scope, &config.messages.scope, choices)
        .with_when(when)
}

/// The custom scope question: present when the scope answer is `custom`.
fn custom_scope_question<C>(config: &Rc<EffectiveConfig>) -> Question<C> {
    Question::input(QuestionName::CustomScope, &config.messages.custom_scope)
        .with_when(|answers: &mut Answers| {
            // The scope is legitimately unanswered when the type is a wip.
            answers.text_of(QuestionName::Scope) == Some(CUSTOM_SCOPE)
        })
}

/// The ticket number question: present only when allowed by configuration.
fn ticket_number_question<C>(
    config: &Rc<EffectiveConfig>,
    pattern: Option<Regex>,
) -> Question<C> {
    let validate = {
        let required = config.is_ticket_number_required;
        let pattern_text = config.ticket_number_regexp.clone();
        move |value: &str| {
            if rules::is_valid_ticket_number(value, required, pattern.as_ref())
            {
                Validation::Valid
            } else if value.is_empty() {
                Validation::Invalid(String::from(
                    "A ticket number is required",
                ))
            } else {
                let pattern_text = pattern_text.as_deref().unwrap_or_default();
                Validation::Invalid(format!(
                    "The ticket number must match the pattern \
                     ({pattern_text})"
                ))
            }
        }
    };

    let allowed = config.allow_ticket_number;

    Question::input(QuestionName::TicketNumber, &config.messages.ticket_number)
        .with_when(move |_| allowed)
        .with_validator(validate)
}

/// The subject question, prefilled from the prepared commit when enabled.
fn subject_question<C>(
    config: &Rc<EffectiveConfig>,
    default: Option<String>,
) -> Question<C> {
    let validate = {
        let limit = config.subject_limit;
        move |value: &str| {
            if rules::subject_within_limit(value, limit) {
                Validation::Valid
            } else {
                Validation::Invalid(format!("Exceed limit: {limit}"))
            }
        }
    };

    let filter = {
        let upper_case = config.upper_case_subject;
        move |value: String| rules::recase_first(&value, upper_case)
    };

    Question::input(QuestionName::Subject, &config.messages.subject)
        .with_default(default)
        .with_validator(validate)
        .with_filter(filter)
}

/// The body question, prefilled from the prepared commit when enabled.
fn body_question<C>(
    config: &Rc<EffectiveConfig>,
    default: Option<String>,
) -> Question<C> {
    Question::input(QuestionName::Body, &config.messages.body)
        .with_default(default)
}

/// The breaking change question.
///
/// Present when configured to be asked first, or when the chosen type
/// allows breaking changes. The first check must not read the type: when
/// the question is asked first, no type has been chosen yet.
fn breaking_question<C>(config: &Rc<EffectiveConfig>) -> Question<C> {
    let when = {
        let config = Rc::clone(config);
        move |answers: &mut Answers| {
            if config.ask_for_breaking_change_first {
                return true;
            }

            let commit_type =
                answers.text(QuestionName::Type).to_lowercase();
            config.allow_breaking_changes.contains(&commit_type)
        }
    };

    Question::input(QuestionName::Breaking, &config.messages.breaking)
        .with_when(when)
}

/// The footer question: present unless the type is a wip.
fn footer_question<C>(config: &Rc<EffectiveConfig>) -> Question<C> {
    Question::input(QuestionName::Footer, &config.messages.footer).with_when(
        |answers: &mut Answers| {
            !rules::is_wip(answers.text(QuestionName::Type))
        },
    )
}

/// The final confirmation, carrying the framed preview computation.
fn confirm_question<C>(
    config: &Rc<EffectiveConfig>,
    formatter: Rc<dyn CommitFormatter>,
) -> Question<C> {
    let preview = {
        let config = Rc::clone(config);
        move |answers: &Answers| {
            let message = formatter.format(answers, &config);
            format!("\n{PREVIEW_SEPARATOR}\n{message}\n{PREVIEW_SEPARATOR}\n")
        }
    };

    Question::confirm(
        QuestionName::ConfirmCommit,
        &config.messages.confirm_commit,
    )
    .with_preview(preview)
}

/// Returns the scopes applicable to a type.
///
/// An override list present but empty does *not* fall back to the global
/// list: it means the type has no scope.
fn scopes_for<'a>(
    config: &'a EffectiveConfig,
    commit_type: &str,
) -> &'a [String] {
    config
        .scope_overrides
        .get(commit_type)
        .map_or(config.scopes.as_slice(), Vec::as_slice)
}

/// Formats the type choice labels, aligning the descriptions.
fn format_types(types: &IndexMap<String, String>) -> Vec<String> {
    let Some(max_type_len) = types.keys().map(String::len).max() else {
        return vec![];
    };

    types
        .iter()
        .map(|(ty, doc)| {
            let padding = " ".repeat(max_type_len.saturating_sub(ty.len()));
            format!("{ty}{padding}  {doc}")
        })
        .collect()
}
