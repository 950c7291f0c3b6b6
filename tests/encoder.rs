use zstd_frame::{encoder, decoder, frame};
use encoder::{Encoder, EncodeStatus, EncodeOp, ZstdOptions};
use decoder::{Decoder, DecodeStatus};
use frame::DeclaredSize;

const DATA: [&[u8]; 3] = [
    include_bytes!("data/pangram"),
    include_bytes!("data/lion"),
    include_bytes!("data/lipsum"),
];

//Frame header descriptor follows 4 bytes of magic number
const FRAME_HEADER_DESCRIPTOR: usize = 4;
const CHECKSUM_FLAG: u8 = 0b100;

fn test_case(idx: usize, encoder: &mut Encoder, decoder: &mut Decoder, data: &[u8]) -> Vec<u8> {
    println!("{idx}: DATA.len()={}", data.len());

    let mut compressed = vec![0; data.len()];
    let mut decompressed = vec![0; data.len()];
    let result = encoder.encode(data, compressed.as_mut(), EncodeOp::Finish);
    assert_eq!(result.input_remain, 0);

    if result.status == EncodeStatus::NeedOutput {
        //Small inputs do not compress below header size, so give it more room to finalize
        compressed.reserve(100);
        let spare_capacity = compressed.spare_capacity_mut();
        let spare_capacity_len = spare_capacity.len();
        let result = encoder.encode_uninit(&[], spare_capacity, EncodeOp::Finish);
        assert_eq!(result.status, EncodeStatus::Finished);
        unsafe {
            compressed.set_len(compressed.len() + spare_capacity_len - result.output_remain);
        }
    } else {
        assert_eq!(result.status, EncodeStatus::Finished);
        compressed.truncate(compressed.len() - result.output_remain);
    }

    let result = decoder.decode(&compressed, decompressed.as_mut());
    assert_eq!(result.status, Ok(DecodeStatus::Finished));
    assert_eq!(data, decompressed);

    assert!(encoder.reset());
    assert!(decoder.reset());
    compressed
}

fn test_case_empty_final(idx: usize, encoder: &mut Encoder, data: &[u8]) -> Vec<u8> {
    println!("{idx}: DATA.len()={}", data.len());

    let mut compressed = Vec::new();
    let (first, second) = data.split_at(data.len() / 2);

    let result = encoder.encode_vec_full(first, &mut compressed, EncodeOp::Process).expect("to allocate");
    assert_eq!(result.input_remain, 0);
    assert_eq!(result.status, EncodeStatus::Continue);

    let result = encoder.encode_vec_full(second, &mut compressed, EncodeOp::Flush).expect("to allocate");
    assert_eq!(result.input_remain, 0);
    assert_eq!(result.status, EncodeStatus::Continue);

    let result = encoder.encode_vec_full(&[], &mut compressed, EncodeOp::Finish).expect("to allocate");
    assert_eq!(result.status, EncodeStatus::Finished);
    assert!(encoder.reset());

    let decompressed = zstd_frame::decompress(&compressed).expect("to decompress");
    assert_eq!(data, decompressed);
    compressed
}

#[test]
fn should_encode_zstd() {
    let mut encoder = Encoder::new(ZstdOptions::new()).expect("create zstd encoder");
    let mut decoder = Decoder::new(decoder::ZstdOptions::new()).expect("create zstd decoder");
    for (idx, data) in DATA.iter().enumerate() {
        let compressed = test_case(idx, &mut encoder, &mut decoder, data);
        assert_eq!(frame::inspect(&compressed), DeclaredSize::Known(data.len() as u64));
        assert_eq!(compressed[FRAME_HEADER_DESCRIPTOR] & CHECKSUM_FLAG, 0);
    }
}

#[test]
fn should_encode_zstd_with_level_bounds() {
    for level in [zstd_frame::CLEVEL_MIN, 1, zstd_frame::CLEVEL_MAX] {
        println!("level={level}");
        let mut encoder = Encoder::new(ZstdOptions::new().level(level)).expect("create zstd encoder");
        let mut decoder = Decoder::new(decoder::ZstdOptions::new()).expect("create zstd decoder");
        for (idx, data) in DATA.iter().enumerate() {
            test_case(idx, &mut encoder, &mut decoder, data);
        }
    }
}

#[test]
fn should_encode_zstd_with_small_window() {
    let mut encoder = Encoder::new(ZstdOptions::new().window_log(10)).expect("create zstd encoder");
    let mut decoder = Decoder::new(decoder::ZstdOptions::new().window_log(10)).expect("create zstd decoder");
    for (idx, data) in DATA.iter().enumerate() {
        test_case(idx, &mut encoder, &mut decoder, data);
    }
}

#[test]
fn should_encode_zstd_with_checksum() {
    let mut encoder = Encoder::new(ZstdOptions::new().checksum(true)).expect("create zstd encoder");
    let mut decoder = Decoder::new(decoder::ZstdOptions::new()).expect("create zstd decoder");
    for (idx, data) in DATA.iter().enumerate() {
        let compressed = test_case(idx, &mut encoder, &mut decoder, data);
        assert_eq!(compressed[FRAME_HEADER_DESCRIPTOR] & CHECKSUM_FLAG, CHECKSUM_FLAG);
    }
}

#[test]
fn should_encode_zstd_without_content_size() {
    let mut encoder = Encoder::new(ZstdOptions::new().content_size(false)).expect("create zstd encoder");
    for (idx, data) in DATA.iter().enumerate() {
        let mut compressed = Vec::new();
        let result = encoder.encode_vec_full(data, &mut compressed, EncodeOp::Finish).expect("to allocate");
        assert_eq!(result.status, EncodeStatus::Finished);
        assert!(encoder.reset());

        println!("{idx}: COMPRESSED.len()={}", compressed.len());
        assert_eq!(frame::inspect(&compressed), DeclaredSize::Unknown);
        let decompressed = zstd_frame::decompress(&compressed).expect("to decompress");
        assert_eq!(*data, decompressed);
    }
}

#[test]
fn should_encode_zstd_in_chunks() {
    let mut encoder = Encoder::new(ZstdOptions::new()).expect("create zstd encoder");
    for (idx, data) in DATA.iter().enumerate() {
        let compressed = test_case_empty_final(idx, &mut encoder, data);
        //Size is not known upfront when frame is started without finishing it
        assert_eq!(frame::inspect(&compressed), DeclaredSize::Unknown);
    }
}

#[test]
fn should_compress_frame_with_content_size_regardless_of_options() {
    let mut encoder = Encoder::new(ZstdOptions::new().content_size(false)).expect("create zstd encoder");
    for data in DATA.iter() {
        let mut compressed = Vec::with_capacity(Encoder::compress_bound(data.len()));
        let written = encoder.compress_frame_uninit(data, compressed.spare_capacity_mut(), 1).expect("to compress");
        unsafe {
            compressed.set_len(written);
        }

        assert_eq!(frame::inspect(&compressed), DeclaredSize::Known(data.len() as u64));
        let decompressed = zstd_frame::decompress(&compressed).expect("to decompress");
        assert_eq!(*data, decompressed);
    }
}

#[test]
fn should_fail_compress_frame_into_small_buffer() {
    let mut encoder = Encoder::new(ZstdOptions::new()).expect("create zstd encoder");
    let mut compressed = Vec::with_capacity(4);
    let error = encoder.compress_frame_uninit(DATA[2], compressed.spare_capacity_mut(), 1).expect_err("to fail");
    println!("error={error}");
    assert_ne!(error.code(), 0);
    assert!(error.is_dst_too_small());
}

#[test]
fn should_create_encoder_with_level_bounds() {
    for level in [zstd_frame::CLEVEL_MIN, 0, zstd_frame::CLEVEL_MAX] {
        let encoder = Encoder::try_new(ZstdOptions::new().level(level).checksum(true));
        assert!(encoder.is_ok(), "level={level}");
    }
}
