//! High level Compression API

extern crate alloc;

use alloc::vec::Vec;

use crate::encoder::{Encoder, ZstdOptions};
use crate::error::Error;
use crate::{CLEVEL_DEFAULT, CLEVEL_MAX, CLEVEL_MIN};

///Checks that `level` is within [CLEVEL_MIN]..=[CLEVEL_MAX], replacing 0 with [CLEVEL_DEFAULT].
pub const fn validate_level(level: i32) -> Result<i32, Error> {
    if level == 0 {
        Ok(CLEVEL_DEFAULT)
    } else if level < CLEVEL_MIN {
        Err(Error::LevelBelowMin {
            min: CLEVEL_MIN,
            level,
        })
    } else if level > CLEVEL_MAX {
        Err(Error::LevelAboveMax {
            max: CLEVEL_MAX,
            level,
        })
    } else {
        Ok(level)
    }
}

///Compresses `data` as single frame, recording its size.
///
///`level` of 0 means [CLEVEL_DEFAULT].
///
///Output is allocated with worst case size and then shrunk to the size of produced frame.
pub fn compress(data: &[u8], level: i32) -> Result<Vec<u8>, Error> {
    let level = validate_level(level)?;

    let mut encoder = Encoder::try_new(ZstdOptions::new())?;
    let mut output = Vec::new();
    output.try_reserve_exact(Encoder::compress_bound(data.len()))?;

    let written = encoder.compress_frame_uninit(data, output.spare_capacity_mut(), level)?;
    unsafe {
        output.set_len(written);
    }
    output.shrink_to_fit();

    log::trace!("zstd: compressed {} bytes into {} at level {}", data.len(), written, level);
    Ok(output)
}
