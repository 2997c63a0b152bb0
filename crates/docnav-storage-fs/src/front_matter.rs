//! YAML front matter parsing.

use serde::Deserialize;

/// Front matter fields used for document discovery. Other keys are ignored.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct FrontMatter {
    pub id: Option<String>,
    pub title: Option<String>,
}

/// Split `---` fenced front matter from the body.
///
/// Returns `(None, content)` when the document has no front matter or the
/// fence is never closed.
pub(crate) fn split(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---")
        .and_then(|r| r.strip_prefix('\n').or_else(|| r.strip_prefix("\r\n")))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, content)
}

/// Parse front matter YAML; empty front matter yields defaults.
pub(crate) fn parse(yaml: &str) -> Result<FrontMatter, String> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(trimmed).map_err(|e| format!("Invalid YAML: {e}"))
}
