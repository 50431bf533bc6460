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

//! Prior state from a previously prepared commit message.
//!
//! When a commit is aborted, Git leaves the message behind. The wizard
//! only ever reads that text to prefill the subject and body defaults:
//! [`PreparedCommitSource`] is the narrow interface to whatever stores it,
//! and [`extract`] normalises the text into the part a question needs.

use std::{fs, io, path::PathBuf, process::Command};

use thiserror::Error;

use crate::tracing::LogResult as _;

/// The marker of comment lines in a prepared commit message.
const COMMENT_CHAR: char = '#';

/// The file where Git leaves the message of an aborted commit.
const COMMIT_EDITMSG_FILE_NAME: &str = "COMMIT_EDITMSG";

/// A source of previously prepared, uncommitted messages.
pub trait PreparedCommitSource {
    /// Returns the text of the prepared message, or `None` when there is
    /// none.
    fn read(&self) -> Option<String>;
}

/// The part of a prepared commit message to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// The subject line.
    Subject,
    /// The body lines, joined with `|`.
    Body,
}

/// Errors that can occur when getting the Git directory.
#[derive(Debug, Error)]
pub enum GitDirError {
    /// The `git` command cannot be run.
    #[error("Failed to run the git command")]
    CannotRunGit(#[source] io::Error),
    /// Git has returned an error.
    #[error("{0}")]
    GitError(String),
    /// The output of the git command is not proper UTF-8.
    #[error("The output of the git command is not proper UTF-8")]
    EncodingError(#[source] std::string::FromUtf8Error),
}

/// Extracts a normalised part from a prepared commit message.
///
/// Comment lines and blank lines are stripped, and any newline convention
/// is accepted. The subject is the first remaining line; the body is the
/// remaining lines joined with `|`, present only when there is more than
/// one line.
pub fn extract(text: &str, part: Part) -> Option<String> {
    let lines = significant_lines(text);

    match part {
        Part::Subject => lines.first().map(|line| (*line).to_owned()),
        Part::Body => lines
            .get(1..)
            .filter(|rest| !rest.is_empty())
            .map(|rest| rest.join("|")),
    }
}

/// Splits the text into lines, dropping comments and blanks.
fn significant_lines(text: &str) -> Vec<&str> {
    text.split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.starts_with(COMMENT_CHAR))
        .collect()
}

/// Reads the message Git left behind after an aborted commit.
///
/// Lookup failures are not user-facing errors: they are logged and treated
/// as the absence of a prepared message.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitPreparedCommit;

impl PreparedCommitSource for GitPreparedCommit {
    #[tracing::instrument(name = "read_prepared_commit", level = "trace")]
    fn read(&self) -> Option<String> {
        let commit_editmsg =
            git_dir().log_err().ok()?.join(COMMIT_EDITMSG_FILE_NAME);

        match fs::read_to_string(&commit_editmsg) {
            Ok(message) => {
                tracing::debug!(
                    ?commit_editmsg,
                    "found a prepared commit message"
                );
                Some(message)
            }
            Err(error) => {
                if error.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        ?error,
                        ?commit_editmsg,
                        "cannot read the prepared commit message"
                    );
                }
                None
            }
        }
    }
}

/// Returns the path of the Git directory.
fn git_dir() -> Result<PathBuf, GitDirError> {
    let git_rev_parse = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .map_err(GitDirError::CannotRunGit)?;

    if git_rev_parse.status.success() {
        Ok(String::from_utf8(git_rev_parse.stdout)
            .map_err(GitDirError::EncodingError)?
            .trim()
            .into())
    } else {
        Err(GitDirError::GitError(
            String::from_utf8(git_rev_parse.stderr)
                .map_err(GitDirError::EncodingError)?
                .trim()
                .to_owned(),
        ))
    }
}
