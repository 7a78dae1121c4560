//! Authenticated workstation push
//!
//! The only record written from an HTTP request. The handler is shared by
//! all request tasks behind an `Arc`, but it is the single writer role for
//! the workstation record.

use chrono::Local;
use std::fmt;
use subtle::ConstantTimeEq;

use crate::models::Workstation;
use crate::record::RecordWriter;

#[derive(Debug, PartialEq)]
pub enum PushError {
    Unauthorized,
}

impl std::error::Error for PushError {}

impl fmt::Display for PushError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PushError::Unauthorized => write!(fmt, "invalid key"),
        }
    }
}

pub struct WorkstationHandler {
    key: String,
    record: RecordWriter<Workstation>,
}

impl WorkstationHandler {
    pub fn new(key: String, record: RecordWriter<Workstation>) -> Self {
        Self { key, record }
    }

    /// Constant-time check of the presented credential.
    ///
    /// An unconfigured (empty) key never authorizes.
    pub fn authorize(&self, credential: Option<&str>) -> bool {
        let Some(credential) = credential else {
            return false;
        };
        if self.key.is_empty() {
            return false;
        }
        self.key.as_bytes().ct_eq(credential.as_bytes()).into()
    }

    pub fn push(&self, credential: Option<&str>, body: &str) -> Result<(), PushError> {
        if !self.authorize(credential) {
            return Err(PushError::Unauthorized);
        }

        tracing::debug!("workstation: {:?}", body);
        self.record.update(Workstation {
            status: body.to_string(),
            last_update: Some(Local::now()),
        });
        Ok(())
    }
}
