//! Sentence merging: folds role-tagged fragments into complete lines.
//!
//! PDF layout breaks sentences across visual rows. The merger walks the
//! ordered `(text, role)` stream once, holding a single buffered line, and
//! joins a fragment into the buffer only when nothing indicates a boundary:
//! same role, buffer not already sentence-final, no explicit turn marker on
//! the incoming fragment.

use crate::role::Role;

/// Trailing characters that close a sentence and stop further merging.
/// The set is deliberately narrow; visually similar marks such as closing
/// quotes are not terminators.
const SENTENCE_TERMINATORS: [char; 8] = ['.', '!', '?', '。', '！', '？', ';', '；'];

/// Literal prefixes that open an explicit new dialogue turn.
const DIALOGUE_MARKERS: [&str; 6] = ["问：", "答：", "Q:", "A:", "Q：", "A："];

/// A merged logical line, the unit written to output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergedLine {
    /// The merged text.
    pub text: String,
    /// The role shared by every fragment merged into this line.
    pub role: Role,
}

/// Folds an ordered `(text, role)` sequence into merged lines.
pub struct SentenceMerger;

impl SentenceMerger {
    /// Merge continuation fragments into complete lines.
    ///
    /// For each fragment after the first, the first matching rule wins:
    ///
    /// 1. role differs from the buffered role: flush;
    /// 2. either role is [`Role::Undetermined`]: flush;
    /// 3. the buffer ends (after trailing-whitespace trim) in a sentence
    ///    terminator: flush;
    /// 4. the buffer ends in an ASCII colon: flush;
    /// 5. the fragment starts (after trim) with a dialogue marker: flush;
    /// 6. otherwise merge, inserting one space only when both boundary
    ///    characters are ASCII.
    ///
    /// The buffer is flushed unconditionally at the end. Empty input
    /// produces empty output.
    pub fn merge(fragments: Vec<(String, Role)>) -> Vec<MergedLine> {
        let mut iter = fragments.into_iter();
        let Some((mut buffer_text, mut buffer_role)) = iter.next() else {
            return Vec::new();
        };
        let mut merged = Vec::new();

        for (curr_text, curr_role) in iter {
            if Self::boundary_between(&buffer_text, buffer_role, &curr_text, curr_role) {
                merged.push(MergedLine {
                    text: buffer_text,
                    role: buffer_role,
                });
                buffer_text = curr_text;
                buffer_role = curr_role;
                continue;
            }

            let prev_last = buffer_text.trim_end().chars().last();
            let curr_first = curr_text.trim_start().chars().next();
            if prev_last.is_some_and(|c| c.is_ascii()) && curr_first.is_some_and(|c| c.is_ascii())
            {
                buffer_text.push(' ');
            }
            buffer_text.push_str(&curr_text);
        }

        merged.push(MergedLine {
            text: buffer_text,
            role: buffer_role,
        });
        merged
    }

    /// Rules 1 through 5: does a boundary separate the buffer from `curr`?
    fn boundary_between(
        buffer_text: &str,
        buffer_role: Role,
        curr_text: &str,
        curr_role: Role,
    ) -> bool {
        if curr_role != buffer_role {
            return true;
        }
        if buffer_role == Role::Undetermined || curr_role == Role::Undetermined {
            return true;
        }

        let prev = buffer_text.trim_end();
        if prev
            .chars()
            .last()
            .is_some_and(|c| SENTENCE_TERMINATORS.contains(&c))
        {
            return true;
        }
        if prev.ends_with(':') {
            return true;
        }

        let curr = curr_text.trim();
        DIALOGUE_MARKERS.iter().any(|m| curr.starts_with(m))
    }
}
