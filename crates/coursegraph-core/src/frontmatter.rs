//! YAML front-matter parsing and rendering for content files.

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{CoreError, Result};

/// Delimiter line that opens and closes a front-matter header.
pub const DELIMITER: &str = "---";

/// Split content into the raw front-matter header and the body.
///
/// Returns `None` when the content does not open with a `---` line or the
/// header is never closed. The body is returned untouched.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let rest = content.strip_prefix(DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    // A closing delimiter on the very last line without a newline.
    if rest[offset..].trim_end() == DELIMITER {
        return Some((&rest[..offset], ""));
    }

    None
}

/// Parse the front-matter header into `T` and return it with the trimmed body.
///
/// Content without a header yields `T::default()` and the whole content as
/// body, the same way an empty header does.
pub fn parse_frontmatter<T>(content: &str, path: &Path) -> Result<(T, String)>
where
    T: DeserializeOwned + Default,
{
    let Some((header, body)) = split_frontmatter(content) else {
        return Ok((T::default(), content.trim().to_string()));
    };

    let frontmatter = if header.trim().is_empty() {
        T::default()
    } else {
        serde_yaml::from_str(header).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
    };

    Ok((frontmatter, body.trim().to_string()))
}

/// Render a front-matter header and body into a content file.
///
/// The layout is `---\n{yaml}---\n{body}`, with a trailing newline added to
/// non-empty bodies that lack one.
pub fn render_frontmatter<T: Serialize>(frontmatter: &T, body: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(frontmatter)?;

    let mut output = String::with_capacity(yaml.len() + body.len() + 10);
    output.push_str(DELIMITER);
    output.push('\n');
    output.push_str(&yaml);
    if !yaml.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(DELIMITER);
    output.push('\n');
    output.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
