//! Matching a requested name against enumerated scripts.

use crate::error::{Result, ScriptyError};
use crate::scripts::ScriptRecord;

/// Whether `record` answers to `requested`, by bare name or name plus suffix.
#[must_use]
pub fn matches(record: &ScriptRecord, requested: &str) -> bool {
    requested == record.name
        || requested.strip_prefix(record.name.as_str()) == Some(record.suffix.as_str())
}

/// Find the script the caller asked for.
///
/// By default the first match in enumeration order wins, so a name that
/// exists in several subdirectories resolves to whichever was listed first.
/// With `strict`, more than one match is an error instead.
///
/// # Errors
///
/// [`ScriptyError::ScriptNotFound`] if nothing matches, or
/// [`ScriptyError::DuplicateScript`] in strict mode.
pub fn resolve<'a>(
    records: &'a [ScriptRecord],
    requested: &str,
    strict: bool,
) -> Result<&'a ScriptRecord> {
    let mut candidates = records.iter().filter(|record| matches(record, requested));

    let Some(first) = candidates.next() else {
        return Err(ScriptyError::ScriptNotFound(requested.to_string()));
    };

    if strict {
        let others: Vec<_> = candidates.map(|record| record.path.clone()).collect();
        if !others.is_empty() {
            let mut paths = vec![first.path.clone()];
            paths.extend(others);
            return Err(ScriptyError::DuplicateScript {
                name: requested.to_string(),
                paths,
            });
        }
    }

    Ok(first)
}
