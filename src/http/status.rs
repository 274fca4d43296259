// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Status-code acceptance rules

use std::fmt;

use reqwest::StatusCode;

use crate::error::{Error, Result};

/// Which response statuses count as success for a request.
///
/// A request carries exactly one policy; setting a new one replaces the old.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Accept 2xx only
    #[default]
    Success,
    /// Accept every status
    Any,
    /// Accept `min..=max`
    Range { min: StatusCode, max: StatusCode },
    /// Accept a single status
    Specific(StatusCode),
}

impl StatusPolicy {
    /// Build an inclusive range policy, rejecting `min > max`
    pub fn range(min: StatusCode, max: StatusCode) -> Result<Self> {
        if min > max {
            return Err(Error::validation(format!(
                "status range minimum {} is greater than maximum {}",
                min.as_u16(),
                max.as_u16()
            )));
        }
        Ok(StatusPolicy::Range { min, max })
    }

    /// Check whether `status` is accepted
    pub fn accepts(&self, status: StatusCode) -> bool {
        match *self {
            StatusPolicy::Success => status.is_success(),
            StatusPolicy::Any => true,
            StatusPolicy::Range { min, max } => min <= status && status <= max,
            StatusPolicy::Specific(code) => status == code,
        }
    }
}

impl fmt::Display for StatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusPolicy::Success => write!(f, "200-299"),
            StatusPolicy::Any => write!(f, "any"),
            StatusPolicy::Range { min, max } => write!(f, "{}-{}", min.as_u16(), max.as_u16()),
            StatusPolicy::Specific(code) => write!(f, "{}", code.as_u16()),
        }
    }
}

/// A status given either as a [`StatusCode`] or as its raw integer
pub trait IntoStatusCode {
    fn into_status_code(self) -> Result<StatusCode>;
}

impl IntoStatusCode for StatusCode {
    fn into_status_code(self) -> Result<StatusCode> {
        Ok(self)
    }
}

impl IntoStatusCode for u16 {
    fn into_status_code(self) -> Result<StatusCode> {
        StatusCode::from_u16(self)
            .map_err(|_| Error::validation(format!("invalid status code: {}", self)))
    }
}

impl IntoStatusCode for i32 {
    fn into_status_code(self) -> Result<StatusCode> {
        u16::try_from(self)
            .map_err(|_| Error::validation(format!("invalid status code: {}", self)))?
            .into_status_code()
    }
}
