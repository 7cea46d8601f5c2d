//! Message gate (commit-msg): validates the draft commit message against
//! the conventional-commit grammar.

use crate::domain::MessageGrammar;
use crate::gate::{GateResult, Violation};

/// Validates a draft commit message as git would record it.
///
/// Comment lines are stripped, the first remaining line is the subject.
/// A subject starting with `Merge` is exempt; everything else must match
/// the grammar.
pub fn evaluate(message: &str, grammar: &MessageGrammar) -> GateResult {
    let subject = MessageGrammar::subject_of(message);

    if grammar.matches(subject) {
        GateResult::accept()
    } else {
        GateResult::reject(Violation::InvalidCommitMessage {
            subject: subject.to_string(),
            types: grammar.types().to_vec(),
        })
    }
}
