// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Inline image encoding for offer pictures.
//!
//! Offers carry their picture as a `data:` URL stored directly in the offer
//! record; there is no separate blob store.

use base64ct::{Base64, Encoding};

/// Largest accepted upload, in bytes (2 MiB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("not an image content type: {0:?}")]
    NotAnImage(String),

    #[error("image too large: {size} bytes exceeds {max} bytes")]
    TooLarge { size: usize, max: usize },
}

/// Encode raw image bytes as `data:<content_type>;base64,<payload>`.
pub fn encode_data_url(content_type: &str, bytes: &[u8]) -> Result<String, ImageError> {
    let content_type = content_type.trim();
    if !content_type.starts_with("image/") || content_type.len() == "image/".len() {
        return Err(ImageError::NotAnImage(content_type.to_string()));
    }

    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge {
            size: bytes.len(),
            max: MAX_IMAGE_BYTES,
        });
    }

    Ok(format!(
        "data:{content_type};base64,{}",
        Base64::encode_string(bytes)
    ))
}
