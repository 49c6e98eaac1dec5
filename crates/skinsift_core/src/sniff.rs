//! Byte-signature sniffing that decides whether a file is worth handing to
//! the content analyzer. Pure classification: no state, and I/O problems
//! resolve to "not eligible" rather than aborting file processing.

use tracing::debug;

use crate::settings::IngestSettings;
use crate::traits::IngestFile;
use crate::types::ImageFormat;

/// Number of prefix bytes read for signature matching.
pub const HEADER_LEN: usize = 6;

struct Signature {
    magic: &'static [u8],
    format: ImageFormat,
}

// Magic numbers per garykessler.net/library/file_sigs.html. The GIF entry
// covers both GIF87a and GIF89a; the PNG entry skips the trailing dot bytes.
const SIGNATURES: &[Signature] = &[
    Signature {
        magic: &[0xFF, 0xD8, 0xFF],
        format: ImageFormat::Jpeg,
    },
    Signature {
        magic: &[0x42, 0x4D],
        format: ImageFormat::Bmp,
    },
    Signature {
        magic: &[0x49, 0x20, 0x49],
        format: ImageFormat::Tiff,
    },
    Signature {
        magic: &[0x89, 0x50, 0x4E, 0x47],
        format: ImageFormat::Png,
    },
    Signature {
        magic: &[0x47, 0x49, 0x46, 0x38],
        format: ImageFormat::Gif,
    },
    Signature {
        magic: &[0x49, 0x49, 0x2A, 0x00],
        format: ImageFormat::Tiff,
    },
    Signature {
        magic: &[0x4D, 0x4D, 0x00, 0x2A],
        format: ImageFormat::Tiff,
    },
    Signature {
        magic: &[0x4D, 0x4D, 0x00, 0x2B],
        format: ImageFormat::BigTiff,
    },
    Signature {
        magic: &[0x00, 0x00, 0x00, 0x00, 0x6A, 0x50],
        format: ImageFormat::Jpeg2000,
    },
];

/// Matches a file prefix against the signature table. First match wins; the
/// signatures are disjoint so order does not affect the outcome.
#[must_use]
pub fn detect_format(header: &[u8]) -> Option<ImageFormat> {
    SIGNATURES
        .iter()
        .find(|sig| header.starts_with(sig.magic))
        .map(|sig| sig.format)
}

/// Decides whether `file` is a supported raster image worth deeper analysis.
///
/// Files below `settings.min_size_bytes` are rejected without any read. With
/// `settings.use_thumbnail` set, a file the host already classified as
/// thumbnail-renderable is accepted without reading bytes. Otherwise exactly
/// [`HEADER_LEN`] bytes are read from offset 0 and matched against the
/// signature table; a short read or read failure means "not eligible".
#[must_use]
pub fn is_eligible(file: &dyn IngestFile, settings: &IngestSettings) -> bool {
    if file.size() < settings.min_size_bytes {
        return false;
    }

    if settings.use_thumbnail && file.thumbnail_capable() {
        return true;
    }

    let mut header = [0u8; HEADER_LEN];
    let bytes_read = match file.read(&mut header, 0) {
        Ok(n) => n,
        Err(err) => {
            debug!(file_id = file.id(), %err, "header read failed, skipping file");
            return false;
        }
    };
    if bytes_read < HEADER_LEN {
        return false;
    }

    detect_format(&header).is_some()
}
