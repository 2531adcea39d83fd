use std::path::Path;

use thiserror::Error;

/// Extensions the backend accepts for submissions.
pub const ALLOWED_EXTENSIONS: [&str; 9] = [
    "pdf", "zip", "doc", "docx", "txt", "ppt", "pptx", "xls", "xlsx",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UploadError {
    #[error("no file selected")]
    MissingFileName,

    #[error("images are not accepted; upload a document instead")]
    ImageNotAccepted,

    #[error("file type .{ext} is not allowed (allowed: {})", ALLOWED_EXTENSIONS.join(", "))]
    Disallowed { ext: String },
}

/// A file name that passed the extension gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadName {
    file_name: String,
    extension: String,
}

impl UploadName {
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Lowercased extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// Check a bare file name against the allow-list.
///
/// The extension is the text after the last `.`, compared case-insensitively.
///
/// # Errors
///
/// Returns `UploadError` when the name is empty, names a png, or carries an
/// extension outside [`ALLOWED_EXTENSIONS`].
pub fn check_upload_name(file_name: &str) -> Result<UploadName, UploadError> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(UploadError::MissingFileName);
    }

    let extension = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    if extension == "png" {
        return Err(UploadError::ImageNotAccepted);
    }
    if !file_name.contains('.') || !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::Disallowed { ext: extension });
    }

    Ok(UploadName {
        file_name: file_name.to_owned(),
        extension,
    })
}

/// Same as [`check_upload_name`] for a path on disk.
///
/// # Errors
///
/// Returns `UploadError::MissingFileName` when the path has no file name.
pub fn check_upload_path(path: &Path) -> Result<UploadName, UploadError> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or(UploadError::MissingFileName)?;
    check_upload_name(name)
}
