#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod config;

pub use config::{CLOUD_INTEGRATIONS_GITHUB_ENABLED, ExperimentalConfig, FlagSource, LiveFlags};
pub use error::{BoxedError, Error, ErrorKind, Result};
