//! S3 bucket probe adapter
//!
//! A HeadBucket check on the destination bucket. HEAD is cheap and answers
//! both questions the dispatcher has: does the bucket exist, and can these
//! credentials reach it.

use crate::adapters::traits::BucketProbe;
use crate::domain::errors::StorageError;
use async_trait::async_trait;
use aws_sdk_s3::error::SdkError;

/// S3-backed destination bucket probe
#[derive(Debug, Clone)]
pub struct S3BucketProbe {
    client: aws_sdk_s3::Client,
}

impl S3BucketProbe {
    /// Creates a probe from a shared AWS configuration
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

#[async_trait]
impl BucketProbe for S3BucketProbe {
    async fn verify_bucket(&self, bucket: &str) -> std::result::Result<(), StorageError> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(()),
            Err(err) => {
                // HeadBucket responses carry no error body; classify by
                // the modeled NotFound variant, then by HTTP status.
                let status = match &err {
                    SdkError::ServiceError(ctx) => Some(ctx.raw().status().as_u16()),
                    SdkError::ResponseError(ctx) => Some(ctx.raw().status().as_u16()),
                    _ => None,
                };
                let message = format!("{err}");
                let service_err = err.into_service_error();
                if service_err.is_not_found() || status == Some(404) {
                    Err(StorageError::BucketNotFound(bucket.to_string()))
                } else if status == Some(403) {
                    Err(StorageError::AccessDenied(bucket.to_string()))
                } else {
                    Err(StorageError::ProbeFailed(format!("{bucket}: {message}")))
                }
            }
        }
    }
}
