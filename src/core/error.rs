use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationInvalidArgument,
    ValidationInvalidJson,

    ManifestNotFound,
    ManifestInvalidJson,

    ReadmeNotFound,
    ReadmeSectionMissing,
    ReadmeTitleMismatch,

    VersionUnchanged,

    GitCommandFailed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::ValidationInvalidJson => "validation.invalid_json",

            ErrorCode::ManifestNotFound => "manifest.not_found",
            ErrorCode::ManifestInvalidJson => "manifest.invalid_json",

            ErrorCode::ReadmeNotFound => "readme.not_found",
            ErrorCode::ReadmeSectionMissing => "readme.section_missing",
            ErrorCode::ReadmeTitleMismatch => "readme.title_mismatch",

            ErrorCode::VersionUnchanged => "version.unchanged",

            ErrorCode::GitCommandFailed => "git.command_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestNotFoundDetails {
    pub file_name: String,
    pub checked_dirs: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMissingDetails {
    pub header: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleMismatchDetails {
    pub expected_title: String,
    pub expected_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionUnchangedDetails {
    pub version: String,
    pub branch: String,
    pub branch_sha: String,
    pub current_branch: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn validation_invalid_json(err: serde_json::Error, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": err.to_string(),
            "context": context,
        });

        Self::new(ErrorCode::ValidationInvalidJson, "Invalid JSON", details)
    }

    pub fn manifest_not_found(
        message: impl Into<String>,
        file_name: impl Into<String>,
        checked_dirs: Vec<String>,
    ) -> Self {
        let details = to_details(ManifestNotFoundDetails {
            file_name: file_name.into(),
            checked_dirs,
        });

        Self::new(ErrorCode::ManifestNotFound, message, details)
            .with_hint("Run from inside a package directory or pass --manifest <path>")
    }

    pub fn manifest_invalid_json(path: impl Into<String>, error: impl Into<String>) -> Self {
        let path = path.into();
        let details = to_details(ManifestInvalidJsonDetails {
            path: path.clone(),
            error: error.into(),
        });

        Self::new(
            ErrorCode::ManifestInvalidJson,
            format!("Failed to read manifest at [{}]", path),
            details,
        )
    }

    pub fn readme_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::ReadmeNotFound,
            format!("README.md file not found in the repository at [{}]", path),
            serde_json::json!({ "path": path }),
        )
        .with_hint("Create an empty README.md to let `utilkit readme sync` populate it")
    }

    pub fn readme_section_missing(header: impl Into<String>) -> Self {
        let header = header.into();
        let message = format!(
            "Validation failed. Required section [{}] is missing.",
            header
        );

        Self::new(
            ErrorCode::ReadmeSectionMissing,
            message,
            to_details(SectionMissingDetails { header }),
        )
    }

    pub fn readme_title_mismatch(
        expected_title: impl Into<String>,
        expected_description: impl Into<String>,
    ) -> Self {
        let expected_title = expected_title.into();
        let expected_description = expected_description.into();
        let message = format!(
            "Validation failed. README does not match expected title and description from the manifest.\n\
             Expected Title [{}]\nExpected Description [{}]",
            expected_title, expected_description
        );

        Self::new(
            ErrorCode::ReadmeTitleMismatch,
            message,
            to_details(TitleMismatchDetails {
                expected_title,
                expected_description,
            }),
        )
    }

    pub fn version_unchanged(details: VersionUnchangedDetails) -> Self {
        let message = format!(
            "Version has not been changed. [{}] in [{}][{}] is the same as the local version in [{}].",
            details.version, details.branch, details.branch_sha, details.current_branch
        );

        Self::new(ErrorCode::VersionUnchanged, message, to_details(details))
            .with_hint("Update the manifest version before committing")
    }

    pub fn git_command_failed(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::GitCommandFailed,
            message,
            Value::Object(serde_json::Map::new()),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    /// True for the "file absent after search" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ManifestNotFound | ErrorCode::ReadmeNotFound
        )
    }

    /// True for conformance failures (missing sections, title drift, bad arguments).
    pub fn is_validation(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ValidationInvalidArgument
                | ErrorCode::ReadmeSectionMissing
                | ErrorCode::ReadmeTitleMismatch
                | ErrorCode::VersionUnchanged
        )
    }

    /// True when structured input could not be parsed.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ManifestInvalidJson | ErrorCode::ValidationInvalidJson
        )
    }
}
