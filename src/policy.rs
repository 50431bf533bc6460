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

//! The post-build policy: skip-list filtering and reordering.

use crate::{
    config::EffectiveConfig,
    question::{Question, QuestionName},
};

/// Applies the post-build policy to a freshly built question list.
///
/// Questions named in the skip list are removed, preserving the order of
/// the remainder. When breaking changes are to be asked first, a surviving
/// breaking question is moved to the front; the relative order of every
/// other question is untouched.
pub fn apply<C>(
    mut questions: Vec<Question<C>>,
    config: &EffectiveConfig,
) -> Vec<Question<C>> {
    questions
        .retain(|question| !config.skip_questions.contains(&question.name()));

    if config.ask_for_breaking_change_first {
        let breaking = questions
            .iter()
            .position(|question| question.name() == QuestionName::Breaking);

        if let Some(position) = breaking {
            let question = questions.remove(position);
            questions.insert(0, question);
        }
    }

    questions
}
