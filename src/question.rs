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

//! The question node and answer model.
//!
//! A [`Question`] is a record of small closures: its presence, choices,
//! validation, default and output filter are plain functions of the
//! configuration and of the [`Answers`] collected so far. Nodes are built
//! once per session by [`crate::questions::build`] and are immutable
//! afterwards.

use std::{fmt, rc::Rc};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::EffectiveConfig;

/// A shared validator, as handed to the rendering collaborator.
///
/// Validators are shared because the collaborator keeps one for as long as
/// it re-prompts; sessions are single-threaded, so an [`Rc`] is enough.
pub type Validator = Rc<dyn Fn(&str) -> Validation>;

/// A presence predicate, which may pre-assign an answer when it skips.
type WhenFn = Box<dyn Fn(&mut Answers) -> bool>;
/// A dynamic choice generator.
type ChoicesFn<C> = Box<dyn Fn(&Answers) -> Vec<C>>;
/// An output filter applied before storage.
type FilterFn = Box<dyn Fn(String) -> String>;
/// A pure preview computation.
type PreviewFn = Box<dyn Fn(&Answers) -> String>;

/// The name of a question.
///
/// Names are unique within a built list and are the keys of the skip list
/// in the configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum QuestionName {
    /// The type of change.
    Type,
    /// The scope of the change.
    Scope,
    /// The free-text scope, when the scope answer is `custom`.
    CustomScope,
    /// The ticket number.
    TicketNumber,
    /// The short description of the change.
    Subject,
    /// The longer description of the change.
    Body,
    /// The breaking change description.
    Breaking,
    /// The issues closed by the change.
    Footer,
    /// The final confirmation.
    ConfirmCommit,
}

/// The kind of prompt a question maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A single selection from a list of choices.
    Select,
    /// A free-text input.
    Input,
    /// A confirmation with three fixed options.
    Confirm,
}

/// The outcome of the final confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Confirmation {
    /// Proceed with the commit.
    #[default]
    Commit,
    /// Abort the commit.
    Abort,
    /// Edit the message before committing.
    Edit,
}

/// A collected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Free text, or the value carried by a selected choice.
    Text(String),
    /// The explicit `empty` choice of the scope question.
    Empty,
    /// The outcome of the final confirmation.
    Confirm(Confirmation),
}

/// The answers collected during one session, in collection order.
///
/// Values are write-once: a question is answered at most once per session,
/// either by the user or by a presence predicate pre-assigning a value when
/// it skips the question.
#[derive(Debug, Default)]
pub struct Answers(IndexMap<QuestionName, Answer>);

/// The result of validating a candidate value.
///
/// Validators never fail with an error: they either accept the value or
/// return a human-readable rejection, upon which the rendering collaborator
/// re-prompts without advancing the answer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The value is acceptable.
    Valid,
    /// The value is rejected, with the reason to display.
    Invalid(String),
}

/// A factory for the rendering collaborator's choice primitives.
///
/// The core never renders choices itself: it asks the collaborator to
/// construct them, so the built list is directly consumable by whatever
/// front-end drives the session.
pub trait ChoiceFactory {
    /// The collaborator's choice primitive.
    type Choice;

    /// Builds a selectable choice displayed as `label` and recording
    /// `value` when selected.
    fn choice(&self, label: &str, value: Answer) -> Self::Choice;

    /// Builds a visual separator between groups of choices.
    fn separator(&self) -> Self::Choice;
}

/// A formatter turning a completed answer set into a commit message.
///
/// This is an external collaborator: the core invokes it only to compute
/// the preview shown before the final confirmation.
pub trait CommitFormatter {
    /// Formats the answers as a human-readable commit message.
    fn format(&self, answers: &Answers, config: &EffectiveConfig)
    -> String;
}

/// One step of the interactive sequence.
///
/// `C` is the choice primitive of the rendering collaborator, obtained
/// through its [`ChoiceFactory`].
pub struct Question<C> {
    /// The unique name of the question.
    name: QuestionName,
    /// The kind of prompt to present.
    kind: Kind,
    /// The message to display.
    message: String,
    /// The presence predicate, if any. Absent means always present.
    when: Option<WhenFn>,
    /// Where the choices come from.
    choices: ChoiceSource<C>,
    /// The validator, if any.
    validate: Option<Validator>,
    /// The output filter, if any.
    filter: Option<FilterFn>,
    /// The default value, if any.
    default: Option<String>,
    /// The pure preview computation, if any.
    preview: Option<PreviewFn>,
}

/// The source of a question's choices.
enum ChoiceSource<C> {
    /// The question has no choices.
    None,
    /// A static list, built once at graph-build time.
    Static(Vec<C>),
    /// A list computed from the answers collected so far.
    Dynamic(ChoicesFn<C>),
}

impl QuestionName {
    /// Returns the configuration-facing name of the question.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Scope => "scope",
            Self::CustomScope => "custom_scope",
            Self::TicketNumber => "ticket_number",
            Self::Subject => "subject",
            Self::Body => "body",
            Self::Breaking => "breaking",
            Self::Footer => "footer",
            Self::ConfirmCommit => "confirm_commit",
        }
    }
}

impl fmt::Display for QuestionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Answer {
    /// Returns the text of the answer, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Empty | Self::Confirm(_) => None,
        }
    }
}

impl Answers {
    /// Creates an empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether no answer has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the answer for `name`, if it has been collected.
    pub fn get(&self, name: QuestionName) -> Option<&Answer> {
        self.0.get(&name)
    }

    /// Gets the text answer for `name`, if it has been collected as text.
    pub fn text_of(&self, name: QuestionName) -> Option<&str> {
        self.get(name).and_then(Answer::as_text)
    }

    /// Gets the text answer for `name`.
    ///
    /// # Panics
    ///
    /// Panics when the question has not been answered, or when its answer
    /// is not text. A question's predicate, choices and validator may only
    /// reference answers collected earlier in the list: hitting this is a
    /// bug in the question graph or a contradictory skip configuration, not
    /// a user-facing error.
    #[expect(
        clippy::panic,
        reason = "Reading an unanswered field is a programming error and \
            must fail loudly instead of silently defaulting."
    )]
    pub fn text(&self, name: QuestionName) -> &str {
        match self.0.get(&name) {
            Some(Answer::Text(text)) => text,
            Some(other) => {
                panic!("the answer for `{name}` is not text: {other:?}")
            }
            None => panic!("the question `{name}` has not been answered"),
        }
    }

    /// Records the answer for `name`.
    ///
    /// # Panics
    ///
    /// Panics when an answer for `name` has already been collected: answers
    /// are immutable for the remainder of the session.
    pub fn set(&mut self, name: QuestionName, answer: Answer) {
        let previous = self.0.insert(name, answer);
        assert!(
            previous.is_none(),
            "the answer for `{name}` has already been collected"
        );
    }

    /// Returns the outcome of the final confirmation, if it was reached.
    pub fn confirmation(&self) -> Option<Confirmation> {
        match self.get(QuestionName::ConfirmCommit) {
            Some(Answer::Confirm(confirmation)) => Some(*confirmation),
            _ => None,
        }
    }

    /// Iterates over the collected answers in collection order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (QuestionName, &Answer)> + '_ {
        self.0.iter().map(|(name, answer)| (*name, answer))
    }
}

impl<C> Question<C> {
    /// Creates a question with no behaviour attached.
    fn new(name: QuestionName, kind: Kind, message: &str) -> Self {
        Self {
            name,
            kind,
            message: message.to_owned(),
            when: None,
            choices: ChoiceSource::None,
            validate: None,
            filter: None,
            default: None,
            preview: None,
        }
    }

    /// Creates a single-select question with a static choice list.
    pub(crate) fn select(
        name: QuestionName,
        message: &str,
        choices: Vec<C>,
    ) -> Self {
        let mut question = Self::new(name, Kind::Select, message);
        question.choices = ChoiceSource::Static(choices);
        question
    }

    /// Creates a single-select question with answer-dependent choices.
    pub(crate) fn select_with(
        name: QuestionName,
        message: &str,
        choices: impl Fn(&Answers) -> Vec<C> + 'static,
    ) -> Self {
        let mut question = Self::new(name, Kind::Select, message);
        question.choices = ChoiceSource::Dynamic(Box::new(choices));
        question
    }

    /// Creates a free-text question.
    pub(crate) fn input(name: QuestionName, message: &str) -> Self {
        Self::new(name, Kind::Input, message)
    }

    /// Creates a confirmation question.
    pub(crate) fn confirm(name: QuestionName, message: &str) -> Self {
        Self::new(name, Kind::Confirm, message)
    }

    /// Attaches a presence predicate.
    pub(crate) fn with_when(
        mut self,
        when: impl Fn(&mut Answers) -> bool + 'static,
    ) -> Self {
        self.when = Some(Box::new(when));
        self
    }

    /// Attaches a validator.
    pub(crate) fn with_validator(
        mut self,
        validate: impl Fn(&str) -> Validation + 'static,
    ) -> Self {
        self.validate = Some(Rc::new(validate));
        self
    }

    /// Attaches an output filter.
    pub(crate) fn with_filter(
        mut self,
        filter: impl Fn(String) -> String + 'static,
    ) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Sets the default value.
    pub(crate) fn with_default(mut self, default: Option<String>) -> Self {
        self.default = default;
        self
    }

    /// Attaches a pure preview computation.
    pub(crate) fn with_preview(
        mut self,
        preview: impl Fn(&Answers) -> String + 'static,
    ) -> Self {
        self.preview = Some(Box::new(preview));
        self
    }

    /// Returns the name of the question.
    pub fn name(&self) -> QuestionName {
        self.name
    }

    /// Returns the kind of prompt the question maps to.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the message to display.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the default value, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Evaluates the presence predicate against the answers so far.
    ///
    /// A predicate deciding to skip the question may pre-assign its answer,
    /// which is why this takes the answers mutably.
    pub fn is_present(&self, answers: &mut Answers) -> bool {
        self.when.as_ref().is_none_or(|when| when(answers))
    }

    /// Resolves the choices against the answers so far.
    pub fn choices(&self, answers: &Answers) -> Vec<C>
    where
        C: Clone,
    {
        match &self.choices {
            ChoiceSource::None => Vec::new(),
            ChoiceSource::Static(choices) => choices.clone(),
            ChoiceSource::Dynamic(choices) => choices(answers),
        }
    }

    /// Validates a candidate value.
    pub fn validate(&self, value: &str) -> Validation {
        match &self.validate {
            None => Validation::Valid,
            Some(validate) => validate(value),
        }
    }

    /// Returns the validator, if any, for the rendering collaborator.
    pub fn validator(&self) -> Option<Validator> {
        self.validate.clone()
    }

    /// Applies the output filter to a collected value.
    pub fn apply_filter(&self, value: String) -> String {
        match &self.filter {
            None => value,
            Some(filter) => filter(value),
        }
    }

    /// Computes the preview to emit before presenting the question.
    ///
    /// Only the final confirmation carries a preview; the session driver
    /// emits it exactly once, when the question becomes the active one.
    pub fn preview(&self, answers: &Answers) -> Option<String> {
        self.preview.as_ref().map(|preview| preview(answers))
    }
}

impl<C> fmt::Debug for Question<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
