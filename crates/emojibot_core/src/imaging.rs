//! Image payload validation.

use emojibot_error::{CommandError, CommandErrorKind};

pub use image::ImageFormat;

/// Check that `bytes` decode as a raster image and report the format.
///
/// # Errors
///
/// Returns `InvalidImage` if the format is unknown or decoding fails.
pub fn validate_image(bytes: &[u8]) -> Result<ImageFormat, CommandError> {
    let format = image::guess_format(bytes)
        .map_err(|e| CommandError::new(CommandErrorKind::InvalidImage(e.to_string())))?;
    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CommandError::new(CommandErrorKind::InvalidImage(e.to_string())))?;
    Ok(format)
}
