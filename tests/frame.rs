use zstd_frame::{decompress, min_legacy_format};
use zstd_frame::frame::{self, DeclaredSize, Frame, LEGACY_PREFIX_MAX};

const NAMES: [&str; 4] = ["empty", "pangram", "lion", "lipsum"];
const DATA: [&[u8]; 4] = [
    include_bytes!("data/empty"),
    include_bytes!("data/pangram"),
    include_bytes!("data/lion"),
    include_bytes!("data/lipsum"),
];
//Same data compressed by every format version, from 0.1 to current one
const DATA_ZSTD: [[&[u8]; 8]; 4] = [
    [
        include_bytes!("data/empty.v1.zst"),
        include_bytes!("data/empty.v2.zst"),
        include_bytes!("data/empty.v3.zst"),
        include_bytes!("data/empty.v4.zst"),
        include_bytes!("data/empty.v5.zst"),
        include_bytes!("data/empty.v6.zst"),
        include_bytes!("data/empty.v7.zst"),
        include_bytes!("data/empty.v8.zst"),
    ],
    [
        include_bytes!("data/pangram.v1.zst"),
        include_bytes!("data/pangram.v2.zst"),
        include_bytes!("data/pangram.v3.zst"),
        include_bytes!("data/pangram.v4.zst"),
        include_bytes!("data/pangram.v5.zst"),
        include_bytes!("data/pangram.v6.zst"),
        include_bytes!("data/pangram.v7.zst"),
        include_bytes!("data/pangram.v8.zst"),
    ],
    [
        include_bytes!("data/lion.v1.zst"),
        include_bytes!("data/lion.v2.zst"),
        include_bytes!("data/lion.v3.zst"),
        include_bytes!("data/lion.v4.zst"),
        include_bytes!("data/lion.v5.zst"),
        include_bytes!("data/lion.v6.zst"),
        include_bytes!("data/lion.v7.zst"),
        include_bytes!("data/lion.v8.zst"),
    ],
    [
        include_bytes!("data/lipsum.v1.zst"),
        include_bytes!("data/lipsum.v2.zst"),
        include_bytes!("data/lipsum.v3.zst"),
        include_bytes!("data/lipsum.v4.zst"),
        include_bytes!("data/lipsum.v5.zst"),
        include_bytes!("data/lipsum.v6.zst"),
        include_bytes!("data/lipsum.v7.zst"),
        include_bytes!("data/lipsum.v8.zst"),
    ],
];

//Frame without content size, holding single raw block "abc"
const UNKNOWN_SIZE_FRAME: [u8; 12] = [0x28, 0xb5, 0x2f, 0xfd, 0x00, 0x00, 0x19, 0x00, 0x00, b'a', b'b', b'c'];
const CURRENT_FORMAT: usize = 7;

fn with_legacy_prefix(len: u32, payload: &[u8]) -> Vec<u8> {
    let mut data = len.to_le_bytes().to_vec();
    data.extend_from_slice(payload);
    data
}

#[test]
fn should_inspect_frames() {
    assert_eq!(frame::inspect(DATA_ZSTD[0][CURRENT_FORMAT]), DeclaredSize::Unknown);
    for idx in 1..DATA.len() {
        assert_eq!(frame::inspect(DATA_ZSTD[idx][CURRENT_FORMAT]), DeclaredSize::Known(DATA[idx].len() as u64));
    }

    assert_eq!(frame::inspect(&UNKNOWN_SIZE_FRAME), DeclaredSize::Unknown);
    assert_eq!(frame::inspect(b"not a frame"), DeclaredSize::Invalid);
    assert_eq!(frame::inspect(b""), DeclaredSize::Invalid);
    assert_eq!(frame::inspect(&UNKNOWN_SIZE_FRAME[..4]), DeclaredSize::Invalid);
}

#[test]
fn should_strip_legacy_prefix() {
    let compressed = DATA_ZSTD[1][CURRENT_FORMAT];
    let data = with_legacy_prefix(DATA[1].len() as u32, compressed);
    let (payload, size) = frame::strip_legacy_prefix(&data).expect("to strip prefix");
    assert_eq!(payload, compressed);
    assert_eq!(size, DeclaredSize::Known(DATA[1].len() as u64));

    //Any size is accepted for frames that do not declare it
    let data = with_legacy_prefix(123, &UNKNOWN_SIZE_FRAME);
    let (payload, size) = frame::strip_legacy_prefix(&data).expect("to strip prefix");
    assert_eq!(payload, UNKNOWN_SIZE_FRAME);
    assert_eq!(size, DeclaredSize::Known(123));

    let data = with_legacy_prefix(LEGACY_PREFIX_MAX as u32, &UNKNOWN_SIZE_FRAME);
    let (_, size) = frame::strip_legacy_prefix(&data).expect("to strip prefix");
    assert_eq!(size, DeclaredSize::Known(LEGACY_PREFIX_MAX));
}

#[test]
fn should_not_strip_invalid_legacy_prefix() {
    let compressed = DATA_ZSTD[1][CURRENT_FORMAT];

    let data = with_legacy_prefix(DATA[1].len() as u32 + 1, compressed);
    assert_eq!(frame::strip_legacy_prefix(&data), None);

    let data = with_legacy_prefix(LEGACY_PREFIX_MAX as u32 + 1, &UNKNOWN_SIZE_FRAME);
    assert_eq!(frame::strip_legacy_prefix(&data), None);

    let data = with_legacy_prefix(3, b"not a frame");
    assert_eq!(frame::strip_legacy_prefix(&data), None);

    //Prefix must be followed by at least magic number
    let data = with_legacy_prefix(3, &UNKNOWN_SIZE_FRAME[..3]);
    assert_eq!(frame::strip_legacy_prefix(&data), None);
    assert_eq!(frame::strip_legacy_prefix(&[3, 0, 0, 0]), None);
}

#[test]
fn should_parse_frame() {
    let compressed = DATA_ZSTD[2][CURRENT_FORMAT];
    let parsed = Frame::parse(compressed).expect("to parse");
    assert_eq!(parsed.payload(), compressed);
    assert_eq!(parsed.content_size(), Some(DATA[2].len() as u64));
    assert!(!parsed.has_legacy_prefix());

    let parsed = Frame::parse(&UNKNOWN_SIZE_FRAME).expect("to parse");
    assert_eq!(parsed.payload(), UNKNOWN_SIZE_FRAME);
    assert_eq!(parsed.content_size(), None);
    assert!(!parsed.has_legacy_prefix());

    let data = with_legacy_prefix(3, &UNKNOWN_SIZE_FRAME);
    let parsed = Frame::parse(&data).expect("to parse");
    assert_eq!(parsed.payload(), UNKNOWN_SIZE_FRAME);
    assert_eq!(parsed.content_size(), Some(3));
    assert!(parsed.has_legacy_prefix());

    assert_eq!(Frame::parse(b"not a frame"), Err(zstd_frame::Error::InvalidInput));
}

#[test]
fn should_detect_min_legacy_format() {
    let format = min_legacy_format();
    println!("min_legacy_format={format}");
    assert!((1..=8).contains(&format));
    //Cached value must stay the same
    assert_eq!(min_legacy_format(), format);

    #[cfg(not(feature = "legacy"))]
    assert_eq!(format, 8);
    #[cfg(feature = "legacy")]
    assert!(format < 8);
}

#[test]
fn should_decompress_supported_formats() {
    let min_format = min_legacy_format() as usize;
    for format in min_format..=8 {
        for idx in 0..DATA.len() {
            println!("{}: v{}", NAMES[idx], format);
            let compressed = DATA_ZSTD[idx][format - 1];

            let decompressed = decompress(compressed).expect("to decompress");
            assert_eq!(DATA[idx], decompressed);

            let data = with_legacy_prefix(DATA[idx].len() as u32, compressed);
            let decompressed = decompress(&data).expect("to decompress with legacy prefix");
            assert_eq!(DATA[idx], decompressed);
        }
    }
}

#[test]
fn should_recognize_early_legacy_formats() {
    for format in 1..=3 {
        for idx in 0..DATA.len() {
            let compressed = DATA_ZSTD[idx][format - 1];
            assert!(frame::is_early_legacy(compressed), "{}: v{}", NAMES[idx], format);
        }
    }

    for format in 4..=8 {
        for idx in 0..DATA.len() {
            let compressed = DATA_ZSTD[idx][format - 1];
            assert!(!frame::is_early_legacy(compressed), "{}: v{}", NAMES[idx], format);
        }
    }

    assert!(!frame::is_early_legacy(&UNKNOWN_SIZE_FRAME));
    assert!(!frame::is_early_legacy(&DATA_ZSTD[1][0][..3]));
    assert!(!frame::is_early_legacy(b""));
}

#[cfg(feature = "legacy")]
#[test]
fn should_decompress_early_legacy_formats_at_once() {
    use zstd_frame::decompressor::{self, Options};

    assert_eq!(min_legacy_format(), 1);
    for format in 1..=3 {
        for idx in 0..DATA.len() {
            println!("{}: v{}", NAMES[idx], format);
            let compressed = DATA_ZSTD[idx][format - 1];
            assert_eq!(frame::inspect(compressed), DeclaredSize::Unknown);

            let decompressed = decompressor::growing(compressed, &Options::new()).expect("to decompress at once");
            assert_eq!(DATA[idx], decompressed);

            //Incremental decoding does not support these formats
            assert!(decompressor::streaming(compressed, &Options::new()).is_err());

            let decompressed = decompress(compressed).expect("to decompress");
            assert_eq!(DATA[idx], decompressed);
        }
    }
}
