#![allow(dead_code)]

pub mod channel_source;
pub mod download_resolver;
pub mod freshness;
pub mod key_value_store;
pub mod sleeper;
pub mod transcriber;
pub mod transcription_api;
