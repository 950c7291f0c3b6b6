extern crate alloc;

use core::convert::TryFrom;
use alloc::vec::Vec;

use super::Options;
use crate::decoder::Decoder;
use crate::error::Error;

///Decompresses `payload` which is declared to contain exactly `size` bytes.
///
///Output is allocated once and never resized.
///
///## Errors
///
///- [Error::OutputTooLarge] if `size` is above output limit;
///- [Error::Codec] if zstd fails to decompress;
///- [Error::LengthMismatch] if `payload` decompresses to a different number of bytes.
pub fn fixed(payload: &[u8], size: u64, opts: &Options) -> Result<Vec<u8>, Error> {
    let limit = opts.limit();
    let expected = match usize::try_from(size) {
        Ok(expected) if expected <= limit => expected,
        _ => {
            log::debug!("zstd: declared size {} is above limit {}", size, limit);
            return Err(Error::OutputTooLarge {
                limit,
            });
        }
    };

    let mut decoder = Decoder::try_new(opts.decoder)?;
    let mut output = Vec::new();
    output.try_reserve_exact(expected)?;

    let written = decoder.decode_frame_uninit(payload, &mut output.spare_capacity_mut()[..expected])?;
    if written != expected {
        return Err(Error::LengthMismatch {
            expected,
            actual: written,
        });
    }

    unsafe {
        output.set_len(written);
    }
    Ok(output)
}
