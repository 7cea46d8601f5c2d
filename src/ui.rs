//! Terminal reporting for gate outcomes.
//!
//! Display helpers only; all decision logic lives in the gates.

use crate::gate::{Advisory, GateResult, Violation};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a non-fatal warning in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Print a rejected policy rule with its remediation text.
pub fn display_violation(violation: &Violation) {
    eprintln!("{} {}", style("✗ REJECTED:").red().bold(), violation);
}

/// Print an advisory; the operation still proceeds.
pub fn display_advisory(advisory: &Advisory) {
    display_warning(&advisory.to_string());
}

/// Report a full gate result: every advisory, then every violation.
pub fn display_result(result: &GateResult) {
    for advisory in &result.advisories {
        display_advisory(advisory);
    }
    for violation in &result.violations {
        display_violation(violation);
    }
}
