/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use localesync::errors::{AppError, LoaderError, ProviderError, SyncError, TranslationError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_authenticationError_shouldDisplayCorrectly() {
    let error = ProviderError::AuthenticationError("Invalid API key".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Authentication error"));
    assert!(display.contains("Invalid API key"));
}

#[test]
fn test_translationError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::RequestFailed("Test error".to_string());
    let error: TranslationError = provider_error.into();

    assert!(matches!(error, TranslationError::ProviderCallFailed(_)));
    assert!(error.raw_response().is_none());
    assert!(error.to_string().contains("Test error"));
}

#[test]
fn test_translationError_malformedResponse_shouldKeepRawText() {
    let error = TranslationError::MalformedProviderResponse {
        raw: "Sorry, no JSON today".to_string(),
        reason: "whole response: expected value".to_string(),
    };

    assert_eq!(error.raw_response(), Some("Sorry, no JSON today"));
    assert!(error.to_string().contains("expected value"));
}

#[test]
fn test_syncError_fromTranslationError_shouldWrapCorrectly() {
    let error: SyncError = TranslationError::from(ProviderError::EmptyResponse).into();
    assert!(matches!(error, SyncError::Translation(_)));
    assert!(error.to_string().contains("empty response"));
}

#[test]
fn test_syncError_missingSourceFile_shouldNamePath() {
    let error = SyncError::MissingSourceFile(PathBuf::from("locales/en/common.json"));
    assert!(error.to_string().contains("locales/en/common.json"));
}

#[test]
fn test_syncError_fromJsonError_shouldWrapCorrectly() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: SyncError = json_error.into();
    assert!(matches!(error, SyncError::Json(_)));
}

#[test]
fn test_appError_fromLoaderError_shouldWrapCorrectly() {
    let error: AppError = LoaderError::IndexNotFound(PathBuf::from("variants/index.json")).into();
    assert!(matches!(error, AppError::Loader(_)));
    assert!(error.to_string().contains("index.json"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let error: AppError = anyhow::anyhow!("Something went wrong").into();
    assert!(matches!(error, AppError::Unknown(_)));
    assert!(error.to_string().contains("Something went wrong"));
}
