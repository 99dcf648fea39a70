//! Instruction lookup capability.
//!
//! The synthesizer needs a command's instruction text when it embeds
//! instructions at generation time, and the validation pass needs the same
//! lookup to check that every record has instructions. Both go through
//! [`InstructionSource`] so neither depends on how the document is parsed,
//! and tests can substitute a map.

use std::collections::{BTreeMap, HashMap};

/// Resolves a command name to its instruction text.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use toolgen_core::InstructionSource;
///
/// let mut source = HashMap::new();
/// source.insert("cmd-alpha".to_string(), "step 1\n".to_string());
///
/// assert_eq!(source.instructions("cmd-alpha").as_deref(), Some("step 1\n"));
/// assert!(source.instructions("cmd-beta").is_none());
/// ```
pub trait InstructionSource {
    /// Returns the instruction text of `command`, or `None` if it cannot be located.
    fn instructions(&self, command: &str) -> Option<String>;
}

impl InstructionSource for HashMap<String, String> {
    fn instructions(&self, command: &str) -> Option<String> {
        self.get(command).cloned()
    }
}

impl InstructionSource for BTreeMap<String, String> {
    fn instructions(&self, command: &str) -> Option<String> {
        self.get(command).cloned()
    }
}

impl<T: InstructionSource + ?Sized> InstructionSource for &T {
    fn instructions(&self, command: &str) -> Option<String> {
        (**self).instructions(command)
    }
}

/// An instruction source that never finds anything.
///
/// Used when instructions are looked up at run time by the generated code and
/// the generator itself has no document at hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInstructions;

impl InstructionSource for NoInstructions {
    fn instructions(&self, _command: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_btree_source() {
        let mut source = BTreeMap::new();
        source.insert("/flow-x".to_string(), "do x".to_string());
        assert_eq!(source.instructions("/flow-x"), Some("do x".to_string()));
    }

    #[test]
    fn test_reference_forwarding() {
        let mut source = HashMap::new();
        source.insert("a".to_string(), "b".to_string());
        let borrowed: &dyn InstructionSource = &source;
        assert_eq!((&borrowed).instructions("a"), Some("b".to_string()));
    }

    #[test]
    fn test_no_instructions() {
        assert!(NoInstructions.instructions("anything").is_none());
    }
}
