// SPDX-License-Identifier: MPL-2.0

//! Inline image attachments.
//!
//! Posts carry their image as a `data:` URL so the whole record stays
//! self-contained in one storage blob.

use crate::store::StoreError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Upload ceiling (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Encode an uploaded image as a data URL using the default size limit
pub fn encode_image(bytes: &[u8]) -> Result<String, StoreError> {
    encode_image_with_limit(bytes, MAX_IMAGE_BYTES)
}

pub fn encode_image_with_limit(bytes: &[u8], limit: usize) -> Result<String, StoreError> {
    if bytes.len() > limit {
        return Err(StoreError::ImageTooLarge {
            size: bytes.len(),
            limit,
        });
    }

    let format = image::guess_format(bytes).map_err(|e| StoreError::Image(e.to_string()))?;
    let mime = format.to_mime_type();
    if !mime.starts_with("image/") {
        return Err(StoreError::Image(format!("{:?} has no image mime type", format)));
    }

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}
