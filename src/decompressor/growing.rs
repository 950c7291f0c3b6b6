extern crate alloc;

use core::cmp;
use alloc::vec::Vec;

use super::Options;
use crate::decoder::Decoder;
use crate::error::Error;

///Decompresses `payload` of unknown decompressed size at once.
///
///Output starts with [Decoder::output_size] bytes and is doubled every time zstd reports it is
///too small, after which whole `payload` is decoded again.
///Intended for frames that cannot be decoded incrementally (formats 0.1 to 0.3), prefer
///[streaming](super::streaming) otherwise.
///
///## Errors
///
///- [Error::OutputTooLarge] if output does not fit output limit;
///- [Error::Codec] if zstd fails to decompress.
pub fn growing(payload: &[u8], opts: &Options) -> Result<Vec<u8>, Error> {
    let limit = opts.limit();
    let mut decoder = Decoder::try_new(opts.decoder)?;
    let mut output = Vec::new();
    let mut size = cmp::min(Decoder::output_size(), limit);

    loop {
        output.try_reserve_exact(size)?;
        match decoder.decode_frame_uninit(payload, &mut output.spare_capacity_mut()[..size]) {
            Ok(written) => {
                unsafe {
                    output.set_len(written);
                }
                output.shrink_to_fit();
                break Ok(output);
            },
            Err(error) if error.is_dst_too_small() => {
                if size >= limit {
                    break Err(Error::OutputTooLarge {
                        limit,
                    });
                }
                size = cmp::min(size.saturating_mul(2), limit);
                log::debug!("zstd: output is too small, retrying with {} bytes", size);
            },
            Err(error) => break Err(error.into()),
        }
    }
}
