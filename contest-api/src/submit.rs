//! Infers what is being submitted from the names of the submitted files.

use std::fs;
use std::io::{Cursor, Write as _};
use std::path::Path;

use anyhow::Context as _;
use getset::Getters;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ApiError;
use crate::model::{Language, Problem};
use crate::Result;

/// Problem, language and entry point of a submission about to be posted.
#[derive(Getters, Debug, Clone, PartialEq, Eq)]
#[get = "pub"]
pub struct ResolvedSubmission {
    problem: Problem,
    language: Language,
    entry_point: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Base name of the first file split into its part before the first `.`
/// and its extension.
fn split_first_file<P: AsRef<Path>>(file_names: &[P]) -> (String, String, String) {
    let base_name = file_names
        .first()
        .and_then(|path| path.as_ref().file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parts: Vec<&str> = base_name.split('.').collect();
    let stem = parts[0].to_string();
    let extension = if parts.len() > 1 {
        parts[parts.len() - 1].to_lowercase()
    } else {
        String::new()
    };
    (base_name, stem, extension)
}

/// Resolves problem, language and entry point of a submission.
///
/// Explicit values win. Missing ones are derived from the first file name:
/// its part before the first `.` names the problem and its extension picks
/// the language.
pub fn resolve_submission<P: AsRef<Path>>(
    problem_id: Option<&str>,
    language_id: Option<&str>,
    entry_point: Option<&str>,
    file_names: &[P],
    problems: &[Problem],
    languages: &[Language],
) -> std::result::Result<ResolvedSubmission, ApiError> {
    let (base_name, stem, extension) = split_first_file(file_names);

    let problem_key = match non_blank(problem_id) {
        Some(id) => id.to_string(),
        None => stem.to_lowercase(),
    };
    let language_key = match non_blank(language_id) {
        Some(id) => Some(id.to_string()),
        None => Language::find_by_extension(languages, &extension).map(|l| l.id().clone()),
    };

    let problem = Some(problem_key.as_str())
        .filter(|key| !key.is_empty())
        .and_then(|key| Problem::find(problems, key))
        .ok_or(ApiError::UnknownProblem)?;
    let language = language_key
        .and_then(|key| Language::find(languages, &key))
        .ok_or(ApiError::UnknownLanguage)?;

    let entry_point = match non_blank(entry_point) {
        Some(entry_point) => Some(entry_point.to_string()),
        None if language.entry_point_required() => {
            let derived = match language.id().as_str() {
                "java" => stem,
                "python" | "python2" | "python3" => base_name,
                "kotlin" => format!("{}Kt", kotlin_entry_point(&stem)),
                _ => String::new(),
            };
            if derived.is_empty() {
                return Err(ApiError::MissingEntryPoint);
            }
            Some(derived)
        }
        None => None,
    };

    Ok(ResolvedSubmission {
        problem: problem.clone(),
        language: language.clone(),
        entry_point,
    })
}

/// Turns a file name into the identifier Kotlin derives a class name from.
///
/// Every character other than an ASCII letter or digit becomes `_`. A
/// leading letter is upper-cased, anything else gets a `_` prefix.
pub fn kotlin_entry_point(base: &str) -> String {
    if base.is_empty() {
        return String::from("_");
    }
    let sanitized: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let mut chars = sanitized.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            format!("{}{}", first.to_ascii_uppercase(), chars.as_str())
        }
        _ => format!("_{}", sanitized),
    }
}

/// A file to be submitted.
#[derive(Getters, Debug, Clone, PartialEq, Eq)]
#[get = "pub"]
pub struct SourceFile {
    name: String,
    data: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Reads a local file; it keeps only its base name.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .with_context(|| format!("Not a file : {}", path.display()))?
            .to_string_lossy()
            .into_owned();
        let data = fs::read(path).with_context(|| format!("Could not read file : {}", path.display()))?;
        Ok(Self::new(name, data))
    }

    /// Packs `files` into a single zip archive.
    pub fn zip_all(files: &[SourceFile]) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        for file in files {
            writer
                .start_file(file.name.as_str(), options)
                .with_context(|| format!("Could not add file to archive : {}", file.name))?;
            writer.write_all(&file.data)?;
        }
        let cursor = writer.finish().context("Could not finish archive")?;
        Ok(cursor.into_inner())
    }
}
