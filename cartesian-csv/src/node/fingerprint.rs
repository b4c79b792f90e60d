//! Re-execution hint for the host.
//!
//! A host may skip a node whose hint is unchanged since the last run. Reset
//! and explicit row selection always force a run; anything else is keyed on
//! a SHA-256 of the raw inputs.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::outputs::NodeInputs;

/// Whether cached outputs may be reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ChangeHint {
    /// The node must run.
    Always,
    /// Stable key of the inputs; equal keys may reuse cached outputs.
    Fingerprint(String),
}

impl ChangeHint {
    pub fn must_run(&self) -> bool {
        matches!(self, ChangeHint::Always)
    }
}

/// Compute the re-execution hint for `inputs`.
pub fn change_hint(inputs: &NodeInputs) -> ChangeHint {
    if inputs.row_index != -1 || inputs.reset {
        return ChangeHint::Always;
    }

    let key = format!(
        "{}-{}-{}",
        inputs.csv_files, inputs.row_index, inputs.show_combined_text
    );
    ChangeHint::Fingerprint(hex::encode(Sha256::digest(key.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(csv_files: &str) -> NodeInputs {
        NodeInputs::new(csv_files)
    }

    #[test]
    fn test_override_and_reset_force_run() {
        let mut with_override = inputs("a.csv");
        with_override.row_index = 3;
        assert!(change_hint(&with_override).must_run());

        let mut with_reset = inputs("a.csv");
        with_reset.reset = true;
        assert_eq!(change_hint(&with_reset), ChangeHint::Always);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let first = change_hint(&inputs("a.csv\nb.csv"));
        let second = change_hint(&inputs("a.csv\nb.csv"));

        assert_eq!(first, second);
        match first {
            ChangeHint::Fingerprint(hash) => assert_eq!(hash.len(), 64),
            ChangeHint::Always => panic!("expected fingerprint"),
        }
    }

    #[test]
    fn test_fingerprint_tracks_inputs() {
        let plain = change_hint(&inputs("a.csv"));
        assert_ne!(plain, change_hint(&inputs("b.csv")));

        let mut with_text = inputs("a.csv");
        with_text.show_combined_text = true;
        assert_ne!(plain, change_hint(&with_text));
    }
}
