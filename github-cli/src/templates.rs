// ABOUTME: Discovery of repository issue templates and parsing of their YAML front matter
// ABOUTME: Follows GitHub's layout: ISSUE_TEMPLATE directories or a single ISSUE_TEMPLATE.md file

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// An issue template offered while creating an issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Display name: front matter `name`, else the file name
    pub name: String,
    /// Markdown body with the front matter removed
    pub body: String,
    pub path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct TemplateFrontmatter {
    #[serde(default)]
    name: Option<String>,
}

/// Find template files named `name` under `root_dir`.
///
/// Looks in `.github/`, the root and `docs/`, in that order, and stops at the
/// first directory that yields anything. A directory called `name` contributes
/// every `.md` file inside it; otherwise a `name.md` file is used. Names are
/// compared case-insensitively. Unreadable directories are skipped, so this
/// never fails.
pub fn find_templates(root_dir: &Path, name: &str) -> Vec<PathBuf> {
    let candidate_dirs = [root_dir.join(".github"), root_dir.to_path_buf(), root_dir.join("docs")];
    let single_file = format!("{name}.md");

    for dir in &candidate_dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        let mut entries: Vec<_> = entries.flatten().collect();
        entries.sort_by_key(|entry| entry.file_name());

        if let Some(template_dir) = entries.iter().find(|entry| {
            entry.file_name().to_string_lossy().eq_ignore_ascii_case(name)
                && entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
        }) {
            let mut results: Vec<PathBuf> = fs::read_dir(template_dir.path())
                .map(|files| {
                    files
                        .flatten()
                        .map(|file| file.path())
                        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
                        .collect()
                })
                .unwrap_or_default();
            if !results.is_empty() {
                results.sort();
                return results;
            }
        }

        if let Some(file) = entries.iter().find(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .eq_ignore_ascii_case(&single_file)
        }) {
            return vec![file.path()];
        }
    }

    Vec::new()
}

/// Split `---` delimited YAML front matter from the rest of a document
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    if let Some(body) = rest.strip_prefix("---") {
        return Some(("", body.trim_start_matches(['\r', '\n'])));
    }

    let end = rest.find("\n---")?;
    let yaml = &rest[..end];
    let after = &rest[end + "\n---".len()..];
    Some((yaml, after.trim_start_matches(['\r', '\n'])))
}

impl Template {
    /// Build a template from file contents; unparsable front matter is kept as body
    pub fn parse(path: &Path, content: &str) -> Self {
        let fallback_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match split_front_matter(content) {
            Some((yaml, body)) => {
                let meta: TemplateFrontmatter = serde_yaml::from_str(yaml).unwrap_or_else(|e| {
                    log::debug!("Ignoring front matter of {}: {e}", path.display());
                    TemplateFrontmatter::default()
                });
                Self {
                    name: meta
                        .name
                        .filter(|n| !n.trim().is_empty())
                        .unwrap_or(fallback_name),
                    body: body.to_string(),
                    path: path.to_path_buf(),
                }
            }
            None => Self {
                name: fallback_name,
                body: content.to_string(),
                path: path.to_path_buf(),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template '{}'", path.display()))?;
        Ok(Self::parse(path, &content))
    }
}

/// Read every template, skipping the ones that cannot be read
pub fn load_templates(paths: &[PathBuf]) -> Vec<Template> {
    paths
        .iter()
        .filter_map(|path| match Template::from_file(path) {
            Ok(template) => Some(template),
            Err(e) => {
                log::warn!("{e:#}");
                None
            }
        })
        .collect()
}
