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

//! Pure validation rules and transforms, free of any prompt concern.

use regex::Regex;

/// The type name marking a work-in-progress commit.
const WIP_TYPE: &str = "wip";

/// Returns whether the commit type marks a work in progress.
pub fn is_wip(commit_type: &str) -> bool {
    commit_type.eq_ignore_ascii_case(WIP_TYPE)
}

/// Returns whether a candidate ticket number is acceptable.
///
/// An empty value is acceptable only when a ticket number is not required.
/// A non-empty value is acceptable when no pattern is configured, or when
/// the whole value is built from matches of the pattern.
pub fn is_valid_ticket_number(
    value: &str,
    required: bool,
    pattern: Option<&Regex>,
) -> bool {
    if value.is_empty() {
        !required
    } else {
        match pattern {
            None => true,
            Some(pattern) => pattern.replace_all(value, "").is_empty(),
        }
    }
}

/// Returns whether the subject fits within the length limit.
pub fn subject_within_limit(subject: &str, limit: usize) -> bool {
    subject.chars().count() <= limit
}

/// Upper- or lower-cases the first character, leaving the rest unchanged.
pub fn recase_first(value: &str, upper_case: bool) -> String {
    let mut chars = value.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let first: String = if upper_case {
                first.to_uppercase().collect()
            } else {
                first.to_lowercase().collect()
            };
            first + chars.as_str()
        }
    }
}
