//! 💀 The library's typed errors.
//!
//! Two policies live in this crate and only one of them ends up here:
//! validation failures and signed-URL failures are errors. Transport failures
//! during a timed transfer are NOT. Those become sentinel durations over in
//! `timers`, so a batch keeps marching even when Jakarta has a bad day.

use thiserror::Error;

/// 🏷️ Everything a benchmark call can fail with, loudly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BenchmarkError {
    /// 📦 The file-size id is not one of the known payload names.
    #[error(
        "Invalid File Name: '{0}'. File names must be any of \"2mib.txt\", \"64mib.txt\" or \"256mib.txt\""
    )]
    InvalidFileName(String),

    /// 🌍 The region id is not a supported single-region location.
    #[error(
        "Invalid Bucket Name: '{0}'. Bucket must be a supported Google Cloud Storage Region Name. View https://cloud.google.com/storage/docs/locations for more information."
    )]
    InvalidBucketName(String),

    /// 🔏 The signing service didn't hand us an upload URL. Carries the upstream description.
    #[error("Failed to reach server to get signedURL: {0}")]
    SignedUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_one_where_the_messages_match_the_template_word_for_word() {
        assert_eq!(
            BenchmarkError::InvalidFileName("random_file_name".into()).to_string(),
            r#"Invalid File Name: 'random_file_name'. File names must be any of "2mib.txt", "64mib.txt" or "256mib.txt""#
        );
        assert_eq!(
            BenchmarkError::InvalidBucketName("random_bucket_name".into()).to_string(),
            "Invalid Bucket Name: 'random_bucket_name'. Bucket must be a supported Google Cloud Storage Region Name. View https://cloud.google.com/storage/docs/locations for more information."
        );
    }

    #[test]
    fn the_one_where_the_signer_error_keeps_the_upstream_story() {
        let err = BenchmarkError::SignedUrl("connection refused".into());
        assert_eq!(
            err.to_string(),
            "Failed to reach server to get signedURL: connection refused"
        );
    }
}
