//! S3 destination bucket integration

pub mod client;

pub use client::S3BucketProbe;
