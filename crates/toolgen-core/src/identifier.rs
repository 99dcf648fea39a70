//! Python identifier rules.
//!
//! Generated functions, the initializer tool and the support module name all
//! end up as Python source, so they share one validity check.

/// Reserved words of Python 3 that cannot name a function.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise",
    "return", "try", "while", "with", "yield",
];

/// Returns `true` if `name` is an ASCII Python identifier that is not a keyword.
///
/// # Examples
///
/// ```
/// use toolgen_core::identifier::is_valid_identifier;
///
/// assert!(is_valid_identifier("flow_task_add"));
/// assert!(is_valid_identifier("_private"));
/// assert!(!is_valid_identifier("2fast"));
/// assert!(!is_valid_identifier("flow-task"));
/// assert!(!is_valid_identifier("class"));
/// ```
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !PYTHON_KEYWORDS.contains(&name)
}

/// Returns `true` if `path` is a dotted Python module path (`pkg.module`).
///
/// # Examples
///
/// ```
/// use toolgen_core::identifier::is_valid_module_path;
///
/// assert!(is_valid_module_path("flow_core"));
/// assert!(is_valid_module_path("flow.core.helpers"));
/// assert!(!is_valid_module_path("flow..core"));
/// ```
#[must_use]
pub fn is_valid_module_path(path: &str) -> bool {
    !path.is_empty() && path.split('.').all(is_valid_identifier)
}

/// Derives a function identifier from a command name.
///
/// Leading characters that cannot start an identifier are dropped and every
/// remaining character outside `[A-Za-z0-9_]` becomes `_`.
///
/// # Examples
///
/// ```
/// use toolgen_core::identifier::derive_identifier;
///
/// assert_eq!(derive_identifier("/flow-task-add"), "flow_task_add");
/// assert_eq!(derive_identifier("cmd-alpha"), "cmd_alpha");
/// ```
#[must_use]
pub fn derive_identifier(command_name: &str) -> String {
    command_name
        .trim_start_matches(|c: char| !(c.is_ascii_alphabetic() || c == '_'))
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
