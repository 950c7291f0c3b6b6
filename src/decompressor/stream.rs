extern crate alloc;

use core::cmp;
use alloc::vec::Vec;

use super::Options;
use crate::decoder::{Decoder, DecodeStatus};
use crate::error::Error;

///Decompresses `payload` of unknown decompressed size.
///
///Output starts with [Decoder::output_size] bytes and its capacity doubles every time decoder
///runs out of space.
///Concatenated frames are decompressed one after another into the same output.
///Unused capacity is released once decoding is done.
///
///## Errors
///
///- [Error::OutputTooLarge] if output would need to grow above output limit;
///- [Error::Codec] if zstd fails to decompress;
///- [Error::IncompleteFrame] if `payload` ends in the middle of frame.
pub fn streaming(payload: &[u8], opts: &Options) -> Result<Vec<u8>, Error> {
    let limit = opts.limit();
    let mut decoder = Decoder::try_new(opts.decoder)?;
    let mut output = Vec::new();
    output.try_reserve_exact(cmp::min(Decoder::output_size(), limit))?;

    let mut input = payload;
    loop {
        let len = output.len();
        let spare_capacity = output.spare_capacity_mut();
        let window = cmp::min(spare_capacity.len(), limit - len);
        let result = decoder.decode_uninit(input, &mut spare_capacity[..window]);
        unsafe {
            output.set_len(len + window - result.output_remain);
        }
        input = &input[input.len() - result.input_remain..];

        match result.status? {
            DecodeStatus::Finished => if input.is_empty() {
                output.shrink_to_fit();
                break Ok(output);
            },
            DecodeStatus::NeedOutput => grow(&mut output, limit)?,
            DecodeStatus::NeedInput => if input.is_empty() {
                log::debug!("zstd: input ended after producing {} bytes", output.len());
                break Err(Error::IncompleteFrame);
            },
        }
    }
}

fn grow(output: &mut Vec<u8>, limit: usize) -> Result<(), Error> {
    let len = output.len();
    if len >= limit {
        return Err(Error::OutputTooLarge {
            limit,
        });
    }

    let additional = cmp::min(cmp::max(output.capacity(), Decoder::output_size()), limit - len);
    output.try_reserve_exact(additional)?;
    log::debug!("zstd: output capacity grown to {} bytes", output.capacity());
    Ok(())
}
