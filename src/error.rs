/*
 * This file is part of ilofan.
 *
 * Copyright (C) 2025 ilofan contributors
 *
 * ilofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * ilofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with ilofan. If not, see <https://www.gnu.org/licenses/>.
 */

//! Error types for talking to the fan controller API.

/// Result type alias for controller API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Everything that can go wrong between us and the controller.
///
/// The interactive state never propagates these; they end up as one line of
/// status text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid base URL {url}: {reason}")]
    InvalidUrl {
        url: String,
        reason: String,
    },

    #[error("connection failed: {0}")]
    Network(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP {code}: {message}")]
    Status {
        code: u16,
        message: String,
    },

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("API /api/fans did not return a non-empty 'fans' list")]
    EmptyFanList,
}

impl ApiError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedBody(msg.into())
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }
}
