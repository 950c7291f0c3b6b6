//! Frame inspection
//!
//!Determines how much output a compressed buffer needs before anything is decoded.
//!
//!Besides regular zstd frames, buffers written by old versions of this format may start with
//!4 byte little-endian length of uncompressed data, followed by normal frame.
//!Such prefix is recognized and stripped, as long as it is consistent with the frame behind it.

use zstd_sys as sys;

use crate::error::Error;

//Values of ZSTD_CONTENTSIZE_UNKNOWN and ZSTD_CONTENTSIZE_ERROR
const CONTENTSIZE_UNKNOWN: u64 = u64::MAX;
const CONTENTSIZE_ERROR: u64 = u64::MAX - 1;

const LEGACY_PREFIX_LEN: usize = 4;
///Legacy prefix must be followed by at least 4 bytes of magic number.
const LEGACY_MIN_LEN: usize = LEGACY_PREFIX_LEN + 4;
///Largest length that legacy prefix may declare.
///
///Every zstd magic number has its high byte equal to `0xFD`, so prefix can never be confused with one.
pub const LEGACY_PREFIX_MAX: u64 = 0x8000_0000;

///Magic numbers of formats 0.1 to 0.3.
const EARLY_LEGACY_MAGICS: [u32; 3] = [0x1EB5_2FFD, 0xFD2F_B522, 0xFD2F_B523];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Decompressed size as declared by frame header.
pub enum DeclaredSize {
    ///Exact number of bytes the frame decompresses to.
    Known(u64),
    ///Encoder did not record content size (e.g. produced by streaming compression).
    Unknown,
    ///Not a recognizable frame.
    Invalid,
}

///Asks zstd for content size declared by the frame at the start of `bytes`.
///
///No attempt is made to recognize legacy prefix.
pub fn inspect(bytes: &[u8]) -> DeclaredSize {
    let size = unsafe {
        sys::ZSTD_getFrameContentSize(bytes.as_ptr() as _, bytes.len())
    };

    match size as u64 {
        CONTENTSIZE_UNKNOWN => DeclaredSize::Unknown,
        CONTENTSIZE_ERROR => DeclaredSize::Invalid,
        size => DeclaredSize::Known(size),
    }
}

///Checks whether `bytes` start with legacy length prefix.
///
///On success returns frame following the prefix, together with size declared by prefix (always
///`DeclaredSize::Known`)
pub fn strip_legacy_prefix(bytes: &[u8]) -> Option<(&[u8], DeclaredSize)> {
    if bytes.len() < LEGACY_MIN_LEN {
        return None;
    }

    let (prefix, payload) = bytes.split_at(LEGACY_PREFIX_LEN);
    let declared = u64::from(u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]));
    if declared > LEGACY_PREFIX_MAX {
        return None;
    }

    match inspect(payload) {
        DeclaredSize::Known(size) if size == declared => Some((payload, DeclaredSize::Known(declared))),
        DeclaredSize::Unknown => Some((payload, DeclaredSize::Known(declared))),
        _ => None,
    }
}

///Returns whether `bytes` start with frame of format 0.1 to 0.3.
///
///zstd decodes these only at once, never incrementally, and they never declare content size.
///Whether they can be decoded at all depends on [min_legacy_format](crate::min_legacy_format).
pub fn is_early_legacy(bytes: &[u8]) -> bool {
    match bytes {
        [a, b, c, d, ..] => EARLY_LEGACY_MAGICS.contains(&u32::from_le_bytes([*a, *b, *c, *d])),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Compressed buffer, validated and ready for decompression.
pub struct Frame<'a> {
    payload: &'a [u8],
    size: Option<u64>,
    legacy_prefix: bool,
}

impl<'a> Frame<'a> {
    ///Inspects `bytes`, falling back to legacy prefix detection when it is not a frame.
    ///
    ///Returns [Error::InvalidInput] if neither applies.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, Error> {
        let frame = match inspect(bytes) {
            DeclaredSize::Known(size) => Self {
                payload: bytes,
                size: Some(size),
                legacy_prefix: false,
            },
            DeclaredSize::Unknown => Self {
                payload: bytes,
                size: None,
                legacy_prefix: false,
            },
            DeclaredSize::Invalid => match strip_legacy_prefix(bytes) {
                Some((payload, DeclaredSize::Known(size))) => {
                    log::debug!("zstd: stripped legacy length prefix, declared size={}", size);
                    Self {
                        payload,
                        size: Some(size),
                        legacy_prefix: true,
                    }
                },
                _ => return Err(Error::InvalidInput),
            },
        };

        log::trace!("zstd: frame payload={} bytes, declared size={:?}", frame.payload.len(), frame.size);
        Ok(frame)
    }

    #[inline(always)]
    ///Compressed data, without legacy prefix.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    #[inline(always)]
    ///Declared size of decompressed data, if recorded.
    pub fn content_size(&self) -> Option<u64> {
        self.size
    }

    #[inline(always)]
    ///Returns whether legacy length prefix was stripped.
    pub fn has_legacy_prefix(&self) -> bool {
        self.legacy_prefix
    }
}
