//! Id derivation from titles.

use crate::error::{CoreError, Result};

/// Convert a title into a kebab-case id.
///
/// Words break on any non-alphanumeric character, on lower-to-upper case
/// transitions (`fooBar`), before the last capital of an acronym followed
/// by a lowercase letter (`XMLHttp`), and between letters and digits
/// (`unit1`). Apostrophes are dropped rather than treated as breaks.
pub fn slugify(text: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    let chars: Vec<char> = text
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush(&mut current, &mut words);
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p))
            && prev.is_alphanumeric()
        {
            let next = chars.get(i + 1).copied();
            let lower_to_upper = prev.is_lowercase() && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(|n| n.is_lowercase());
            let digit_edge = prev.is_numeric() != c.is_numeric();

            if lower_to_upper || acronym_end || digit_edge {
                flush(&mut current, &mut words);
            }
        }

        current.extend(c.to_lowercase());
    }
    flush(&mut current, &mut words);

    words.join("-")
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Check that `id` can name a single file or directory under `content/`.
///
/// Ids end up in paths such as `content/{course}/pages/{page}.mdx`, so
/// blank ids, path separators and `..` are rejected.
pub fn validate_id(id: &str) -> Result<()> {
    let trimmed = id.trim();
    if trimmed.is_empty()
        || trimmed.contains(['/', '\\', '\0'])
        || trimmed.contains("..")
        || trimmed == "."
    {
        return Err(CoreError::invalid_id(id));
    }
    Ok(())
}

/// Decide the id of a content item.
///
/// A non-blank explicit id wins; otherwise the id is the slug of the title.
/// Fails when neither produces a non-empty id, or when the explicit id is
/// not a valid path component.
pub fn derive_id(explicit: Option<&str>, title: Option<&str>) -> Result<String> {
    if let Some(id) = explicit.map(str::trim).filter(|id| !id.is_empty()) {
        validate_id(id)?;
        return Ok(id.to_string());
    }

    let slug = title.map(slugify).unwrap_or_default();
    if slug.is_empty() {
        return Err(CoreError::missing_id(match title {
            Some(t) => format!("title {t:?} has no usable characters"),
            None => "neither id nor title given".to_string(),
        }));
    }

    Ok(slug)
}
