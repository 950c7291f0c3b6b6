//! Detection of legacy formats supported by linked zstd

use core::sync::atomic::{AtomicU8, Ordering};

use crate::frame::{inspect, DeclaredSize};

///Empty input compressed by zstd 0.1 through 0.8, last one being current format.
///
///zstd has no API to tell which legacy formats it was built with, so these are fed into
///frame inspection to see which ones it understands.
const FORMAT_SAMPLES: [[u8; 13]; 8] = [
    [0xfd, 0x2f, 0xb5, 0x1e, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x22, 0xb5, 0x2f, 0xfd, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x23, 0xb5, 0x2f, 0xfd, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x24, 0xb5, 0x2f, 0xfd, 0x08, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x25, 0xb5, 0x2f, 0xfd, 0x08, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x26, 0xb5, 0x2f, 0xfd, 0x07, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x27, 0xb5, 0x2f, 0xfd, 0x04, 0x50, 0xea, 0x3b, 0x1d, 0x00, 0x00, 0x00, 0x00],
    [0x28, 0xb5, 0x2f, 0xfd, 0x04, 0x50, 0x01, 0x00, 0x00, 0x99, 0xe9, 0xd8, 0x51],
];

//0 means not detected yet
static MIN_LEGACY_FORMAT: AtomicU8 = AtomicU8::new(0);

fn detect() -> u8 {
    for (idx, sample) in FORMAT_SAMPLES.iter().enumerate() {
        if inspect(sample) != DeclaredSize::Invalid {
            return idx as u8 + 1;
        }
    }

    panic!("zstd: linked library does not recognize any known frame format");
}

///Returns oldest format version (from 1 to 8) that linked zstd can decompress.
///
///Versions below 8 are legacy formats, available only when zstd is built with legacy support
///(`legacy` feature).
///
///## Panics
///
///If no format is recognized at all, which means linked zstd is unusable.
pub fn min_legacy_format() -> u8 {
    match MIN_LEGACY_FORMAT.load(Ordering::Relaxed) {
        0 => {
            let format = detect();
            log::debug!("zstd: oldest supported format version is {}", format);
            MIN_LEGACY_FORMAT.store(format, Ordering::Relaxed);
            format
        },
        format => format,
    }
}
