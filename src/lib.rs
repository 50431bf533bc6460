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

//! A customisable conventional-commit question wizard.
//!
//! This crate builds the ordered, conditionally-branching list of
//! questions that collects the parts of a structured commit message: type,
//! scope, ticket number, subject, body, breaking change and footer, ending
//! with a confirmation. Each question carries its presence predicate,
//! choices, validator, default and output filter as functions of the
//! configuration and of the answers already collected, so the whole
//! branching logic lives in the list itself.
//!
//! The crate does not execute commits, load configuration files, or format
//! the final commit message: those are collaborators the core reaches
//! through narrow traits ([`CommitFormatter`],
//! [`prepared::PreparedCommitSource`], [`PreviewSink`]). A terminal
//! front-end backed by inquire ships in [`prompt`].
//!
//! # Example
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use cz_wizard::{
//!     Answers, Config, EffectiveConfig, QuestionName,
//!     prepared::GitPreparedCommit,
//!     prompt::{TermChoices, TerminalPrompt},
//!     question::CommitFormatter,
//!     wizard::ConsoleSink,
//! };
//!
//! struct OneLine;
//!
//! impl CommitFormatter for OneLine {
//!     fn format(
//!         &self,
//!         answers: &Answers,
//!         _config: &EffectiveConfig,
//!     ) -> String {
//!         format!(
//!             "{}: {}",
//!             answers.text(QuestionName::Type),
//!             answers.text(QuestionName::Subject),
//!         )
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let questions = cz_wizard::build(
//!         &config,
//!         TermChoices,
//!         Rc::new(OneLine),
//!         &GitPreparedCommit,
//!     )?;
//!     let answers = cz_wizard::run(
//!         &questions,
//!         &mut TerminalPrompt::new(),
//!         &mut ConsoleSink,
//!     )?;
//!
//!     println!("{:?}", answers.confirmation());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![warn(rust_2018_idioms)]
#![warn(clippy::redundant_pub_crate)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::use_self)]

pub mod config;
pub mod policy;
pub mod prepared;
pub mod prompt;
pub mod question;
pub mod questions;
pub mod rules;
mod tracing;
pub mod wizard;

pub use self::{
    config::{Config, EffectiveConfig, Messages, PromptMessages},
    question::{
        Answer, Answers, ChoiceFactory, CommitFormatter, Confirmation, Kind,
        Question, QuestionName, Validation, Validator,
    },
    questions::{BuildError, build},
    wizard::{ConsoleSink, PreviewSink, Prompt, PromptError, run},
};
