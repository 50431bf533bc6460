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

//! End-to-end wizard sessions driven through scripted collaborators.

#![allow(clippy::pedantic, clippy::restriction)]

use std::collections::VecDeque;
use std::rc::Rc;

use cz_wizard::{
    Answer, Answers, ChoiceFactory, CommitFormatter, Config, Confirmation,
    EffectiveConfig, PreviewSink, Prompt, PromptError, Question,
    QuestionName, Validation, Validator,
    prepared::PreparedCommitSource,
};

////////////////////////////////////////////////////////////////////////////////
//                            Scripted collaborators                          //
////////////////////////////////////////////////////////////////////////////////

/// The choice primitive of the scripted front-end.
#[derive(Debug, Clone, PartialEq)]
enum TestChoice {
    Entry { label: String, value: Answer },
    Separator,
}

#[derive(Debug, Clone, Copy, Default)]
struct TestChoices;

impl ChoiceFactory for TestChoices {
    type Choice = TestChoice;

    fn choice(&self, label: &str, value: Answer) -> TestChoice {
        TestChoice::Entry {
            label: label.to_owned(),
            value,
        }
    }

    fn separator(&self) -> TestChoice {
        TestChoice::Separator
    }
}

/// A prompt replaying scripted answers, re-prompting on rejections the way
/// a real front-end would.
struct Script {
    selections: VecDeque<&'static str>,
    inputs: VecDeque<&'static str>,
    confirmation: Confirmation,
    asked: Vec<String>,
    rejections: Vec<String>,
}

impl Script {
    fn new(
        selections: &[&'static str],
        inputs: &[&'static str],
        confirmation: Confirmation,
    ) -> Self {
        Self {
            selections: selections.iter().copied().collect(),
            inputs: inputs.iter().copied().collect(),
            confirmation,
            asked: vec![],
            rejections: vec![],
        }
    }
}

impl Prompt for Script {
    type Choice = TestChoice;

    fn select(
        &mut self,
        message: &str,
        choices: Vec<TestChoice>,
    ) -> Result<Answer, PromptError> {
        self.asked.push(message.to_owned());

        let target = self
            .selections
            .pop_front()
            .expect("no scripted selection left");

        let value = choices.iter().find_map(|choice| match choice {
            TestChoice::Entry { label, value }
                if label.as_str() == target
                    || label.starts_with(&format!("{target} ")) =>
            {
                Some(value.clone())
            }
            _ => None,
        });

        Ok(value.expect("scripted selection not among the choices"))
    }

    fn input(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: Option<Validator>,
    ) -> Result<String, PromptError> {
        self.asked.push(message.to_owned());

        loop {
            let raw = self.inputs.pop_front().expect("no scripted input left");
            let value = if raw.is_empty() {
                default.unwrap_or(raw).to_owned()
            } else {
                raw.to_owned()
            };

            match &validate {
                None => return Ok(value),
                Some(validate) => match validate(&value) {
                    Validation::Valid => return Ok(value),
                    Validation::Invalid(why) => self.rejections.push(why),
                },
            }
        }
    }

    fn confirm(
        &mut self,
        message: &str,
    ) -> Result<Confirmation, PromptError> {
        self.asked.push(message.to_owned());
        Ok(self.confirmation)
    }
}

#[derive(Default)]
struct RecordingSink(Vec<String>);

impl PreviewSink for RecordingSink {
    fn emit(&mut self, preview: &str) {
        self.0.push(preview.to_owned());
    }
}

struct NoPrepared;

impl PreparedCommitSource for NoPrepared {
    fn read(&self) -> Option<String> {
        None
    }
}

struct Prepared(&'static str);

impl PreparedCommitSource for Prepared {
    fn read(&self) -> Option<String> {
        Some(self.0.to_owned())
    }
}

/// Formats the answers as `type: subject` for the preview.
struct TypeAndSubject;

impl CommitFormatter for TypeAndSubject {
    fn format(
        &self,
        answers: &Answers,
        _config: &EffectiveConfig,
    ) -> String {
        format!(
            "{}: {}",
            answers.text(QuestionName::Type),
            answers.text(QuestionName::Subject)
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
//                                  Helpers                                   //
////////////////////////////////////////////////////////////////////////////////

struct Session {
    answers: Answers,
    asked: Vec<String>,
    rejections: Vec<String>,
    previews: Vec<String>,
}

fn run_session(
    config: &Config,
    selections: &[&'static str],
    inputs: &[&'static str],
    confirmation: Confirmation,
) -> Session {
    run_session_with(config, &NoPrepared, selections, inputs, confirmation)
}

fn run_session_with(
    config: &Config,
    prepared: &dyn PreparedCommitSource,
    selections: &[&'static str],
    inputs: &[&'static str],
    confirmation: Confirmation,
) -> Session {
    let questions: Vec<Question<TestChoice>> =
        cz_wizard::build(config, TestChoices, Rc::new(TypeAndSubject), prepared)
            .expect("failed to build the question list");

    let mut script = Script::new(selections, inputs, confirmation);
    let mut sink = RecordingSink::default();

    let answers = cz_wizard::run(&questions, &mut script, &mut sink)
        .expect("the session failed");

    Session {
        answers,
        asked: script.asked,
        rejections: script.rejections,
        previews: sink.0,
    }
}

fn config_with_types(types: &[&str]) -> Config {
    Config {
        types: types
            .iter()
            .map(|ty| (String::from(*ty), String::from("description")))
            .collect(),
        ..Config::default()
    }
}

////////////////////////////////////////////////////////////////////////////////
//                                 Sessions                                   //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn a_default_session_asks_for_a_custom_scope() {
    let config = Config::default();
    let messages = config.normalized().messages;

    let session = run_session(
        &config,
        &["feat"],
        &["api", "Add new thing", "", ""],
        Confirmation::Commit,
    );

    // No scope is configured: the scope question is answered silently and
    // the custom scope question runs instead.
    assert_eq!(
        session.asked,
        [
            messages.r#type,
            messages.custom_scope,
            messages.subject,
            messages.body,
            messages.footer,
            messages.confirm_commit,
        ]
    );

    assert_eq!(session.answers.text(QuestionName::Type), "feat");
    assert_eq!(session.answers.text(QuestionName::Scope), "custom");
    assert_eq!(session.answers.text(QuestionName::CustomScope), "api");
    assert_eq!(session.answers.text(QuestionName::Subject), "add new thing");
    assert_eq!(session.answers.confirmation(), Some(Confirmation::Commit));
}

#[test]
fn a_wip_type_skips_the_footer() {
    let session = run_session(
        &config_with_types(&["feat", "wip"]),
        &["wip"],
        &["x", "try things", ""],
        Confirmation::Commit,
    );

    assert_eq!(session.answers.text(QuestionName::Scope), "custom");
    assert_eq!(session.answers.get(QuestionName::Footer), None);
    assert_eq!(session.answers.get(QuestionName::Breaking), None);
    assert_eq!(session.answers.confirmation(), Some(Confirmation::Commit));
}

#[test]
fn a_configured_scope_is_selected_from_the_list() {
    let config = Config {
        scopes: vec![String::from("api"), String::from("ui")],
        ..config_with_types(&["feat", "fix"])
    };

    let session = run_session(
        &config,
        &["feat", "ui"],
        &["do something", "", ""],
        Confirmation::Commit,
    );

    assert_eq!(session.answers.text(QuestionName::Scope), "ui");
    assert_eq!(session.answers.get(QuestionName::CustomScope), None);
}

#[test]
fn the_empty_choice_records_an_empty_scope() {
    let config = Config {
        scopes: vec![String::from("api")],
        allow_custom_scopes: true,
        ..config_with_types(&["feat"])
    };

    let session = run_session(
        &config,
        &["feat", "empty"],
        &["do something", "", ""],
        Confirmation::Commit,
    );

    assert_eq!(
        session.answers.get(QuestionName::Scope),
        Some(&Answer::Empty)
    );
    assert_eq!(session.answers.get(QuestionName::CustomScope), None);
}

#[test]
fn the_custom_choice_asks_for_the_scope() {
    let config = Config {
        scopes: vec![String::from("api")],
        allow_custom_scopes: true,
        ..config_with_types(&["feat"])
    };

    let session = run_session(
        &config,
        &["feat", "custom"],
        &["cli", "do something", "", ""],
        Confirmation::Commit,
    );

    assert_eq!(session.answers.text(QuestionName::Scope), "custom");
    assert_eq!(session.answers.text(QuestionName::CustomScope), "cli");
}

#[test]
fn skipping_empty_scopes_records_an_empty_string() {
    let config = Config {
        skip_empty_scopes: true,
        ..config_with_types(&["feat"])
    };

    let session = run_session(
        &config,
        &["feat"],
        &["do something", "", ""],
        Confirmation::Commit,
    );

    assert_eq!(session.answers.text(QuestionName::Scope), "");
    assert_eq!(session.answers.get(QuestionName::CustomScope), None);
}

#[test]
fn an_invalid_ticket_number_is_asked_again() {
    let config = Config {
        allow_ticket_number: true,
        is_ticket_number_required: true,
        ticket_number_regexp: Some(String::from("TICKET-[0-9]+")),
        ..Config::default()
    };

    let session = run_session(
        &config,
        &["feat"],
        &["api", "nope", "TICKET-42", "do something", "", ""],
        Confirmation::Commit,
    );

    assert_eq!(
        session.rejections,
        ["The ticket number must match the pattern (TICKET-[0-9]+)"]
    );
    assert_eq!(
        session.answers.text(QuestionName::TicketNumber),
        "TICKET-42"
    );
}

#[test]
fn a_subject_over_the_limit_is_asked_again() {
    let config = Config {
        subject_limit: Some(5),
        ..Config::default()
    };

    let session = run_session(
        &config,
        &["feat"],
        &["api", "much too long", "add x", "", ""],
        Confirmation::Commit,
    );

    assert_eq!(session.rejections, ["Exceed limit: 5"]);
    assert_eq!(session.answers.text(QuestionName::Subject), "add x");
}

#[test]
fn the_subject_is_recased_before_storage() {
    let config = Config {
        upper_case_subject: true,
        ..Config::default()
    };

    let session = run_session(
        &config,
        &["feat"],
        &["api", "add new thing", "", ""],
        Confirmation::Commit,
    );

    assert_eq!(session.answers.text(QuestionName::Subject), "Add new thing");
}

#[test]
fn a_prepared_commit_prefills_the_subject_and_body() {
    let config = Config {
        use_prepared_commit: true,
        ..Config::default()
    };
    let prepared = Prepared("feat: add x\n\nmore detail\nsecond line");

    // Accepting the defaults by submitting empty input.
    let session = run_session_with(
        &config,
        &prepared,
        &["feat"],
        &["api", "", "", ""],
        Confirmation::Commit,
    );

    assert_eq!(session.answers.text(QuestionName::Subject), "feat: add x");
    assert_eq!(
        session.answers.text(QuestionName::Body),
        "more detail|second line"
    );
}

#[test]
fn the_preview_is_emitted_once_before_the_confirmation() {
    let session = run_session(
        &Config::default(),
        &["feat"],
        &["api", "add new thing", "", ""],
        Confirmation::Commit,
    );

    assert_eq!(session.previews.len(), 1);
    let preview = &session.previews[0];
    assert!(preview.contains("feat: add new thing"));
    assert!(preview.contains(
        "###--------------------------------------------------------###"
    ));
}

#[test]
fn breaking_changes_can_be_asked_first() {
    let config = Config {
        ask_for_breaking_change_first: true,
        ..Config::default()
    };
    let messages = config.normalized().messages;

    let session = run_session(
        &config,
        &["feat"],
        &["changes the API", "api", "add new thing", "", ""],
        Confirmation::Commit,
    );

    assert_eq!(session.asked[0], messages.breaking);
    assert_eq!(
        session.answers.text(QuestionName::Breaking),
        "changes the API"
    );
}

#[test]
fn breaking_changes_are_asked_for_allowed_types() {
    let config = Config {
        allow_breaking_changes: vec![String::from("feat")],
        ..config_with_types(&["feat", "fix"])
    };

    let session = run_session(
        &config,
        &["feat"],
        &["api", "add new thing", "", "drops the old API", ""],
        Confirmation::Commit,
    );
    assert_eq!(
        session.answers.text(QuestionName::Breaking),
        "drops the old API"
    );

    let session = run_session(
        &config,
        &["fix"],
        &["api", "fix the thing", "", ""],
        Confirmation::Commit,
    );
    assert_eq!(session.answers.get(QuestionName::Breaking), None);
}

#[test]
fn skipped_questions_are_never_asked() {
    let config = Config {
        skip_questions: vec![QuestionName::Body, QuestionName::Footer],
        ..Config::default()
    };
    let messages = config.normalized().messages;

    let session = run_session(
        &config,
        &["feat"],
        &["api", "add new thing"],
        Confirmation::Commit,
    );

    assert!(!session.asked.contains(&messages.body));
    assert!(!session.asked.contains(&messages.footer));
    assert_eq!(session.answers.get(QuestionName::Body), None);
    assert_eq!(session.answers.get(QuestionName::Footer), None);
}

#[test]
fn aborting_is_a_terminal_answer() {
    let session = run_session(
        &Config::default(),
        &["feat"],
        &["api", "add new thing", "", ""],
        Confirmation::Abort,
    );

    assert_eq!(session.answers.confirmation(), Some(Confirmation::Abort));
}
