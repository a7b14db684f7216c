//! Container decoding regression test
//!
//! Decodes hand-assembled PCX containers and checks header fields, run
//! expansion, palette substitution and every failure mode of the decoder.

use pcxkit_core::Channels;
use pcxkit_io::{DecodeOptions, IoError, decode_pcx, decode_pcx_indexed, decode_pcx_with};
use pcxkit_test::RegParams;
use pcxkit_test::synthetic::{PcxFixture, literal_body, ramp_palette};

#[test]
fn decode_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("decode");

    // --- Test 1: minimal 2x2 container maps indices to palette colors ---
    let palette = ramp_palette();
    let bytes = PcxFixture::new(2, 2, vec![0, 1, 2, 3])
        .with_palette(palette.clone())
        .to_bytes();
    let img = decode_pcx(&bytes).expect("decode 2x2");
    rp.compare_values(2.0, img.header.width() as f64, 0.0);
    rp.compare_values(2.0, img.header.height() as f64, 0.0);
    rp.compare_true(img.raster.channels() == Channels::Rgb, "decode_pcx yields RGB");
    for (i, (x, y)) in [(0, 0), (1, 0), (0, 1), (1, 1)].into_iter().enumerate() {
        let want = palette.get(i as u8).to_tuple();
        let got = img.raster.get_rgb(x, y).expect("pixel in range");
        rp.compare_true(got == want, &format!("pixel {i} is palette entry {i}"));
    }
    rp.write_raster(&img.raster, "minimal").expect("write");

    // --- Test 2: runs and literals mix ---
    let bytes = PcxFixture::new(4, 1, vec![0xC3, 0x05, 0x10]).to_bytes();
    let img = decode_pcx_indexed(&bytes).expect("decode runs");
    rp.compare_bytes(&[5, 5, 5, 0x10], img.raster.data());
    rp.compare_true(img.raster.is_indexed(), "indexed decode keeps palette");

    // --- Test 3: literal-only stream reproduces the indices exactly ---
    let indices: Vec<u8> = (0..48u32).map(|i| (i * 37 % 256) as u8).collect();
    let bytes = PcxFixture::new(8, 6, literal_body(&indices)).to_bytes();
    let img = decode_pcx_indexed(&bytes).expect("decode literals");
    rp.compare_bytes(&indices, img.raster.data());

    // --- Test 4: bounding box offset ---
    let mut fx = PcxFixture::new(1, 1, vec![0xC6, 0x01]);
    fx.xmin = 100;
    fx.xmax = 102;
    fx.ymin = 7;
    fx.ymax = 8;
    let img = decode_pcx(&fx.to_bytes()).expect("decode offset box");
    rp.compare_values(3.0, img.raster.width() as f64, 0.0);
    rp.compare_values(2.0, img.raster.height() as f64, 0.0);

    // --- Test 5: failure modes ---
    let short = vec![0x0Au8; 896];
    rp.compare_true(
        matches!(decode_pcx(&short), Err(IoError::TruncatedFile { .. })),
        "896-byte file is truncated",
    );

    let mut fx = PcxFixture::new(2, 2, vec![0, 1, 2, 3]);
    fx.bits_per_pixel = 1;
    rp.compare_true(
        matches!(decode_pcx(&fx.to_bytes()), Err(IoError::UnsupportedFormat(_))),
        "1 bpp is unsupported",
    );

    let mut fx = PcxFixture::new(2, 2, vec![0, 1, 2, 3]);
    fx.planes = 3;
    rp.compare_true(
        matches!(decode_pcx(&fx.to_bytes()), Err(IoError::UnsupportedFormat(_))),
        "3 planes is unsupported",
    );

    let fx = PcxFixture::new(3, 3, vec![0xC4, 0x02]);
    rp.compare_true(
        matches!(
            decode_pcx(&fx.to_bytes()),
            Err(IoError::InsufficientData { expected: 9, actual: 4 })
        ),
        "4 of 9 pixels is insufficient",
    );

    // --- Test 6: truncated trailing run ---
    let fx = PcxFixture::new(2, 1, vec![0x07, 0x08, 0xC5]);
    let img = decode_pcx_indexed(&fx.to_bytes()).expect("lenient decode");
    rp.compare_bytes(&[7, 8], img.raster.data());
    rp.compare_true(
        matches!(
            decode_pcx_with(&fx.to_bytes(), DecodeOptions { strict_runs: true }),
            Err(IoError::TruncatedFile { .. })
        ),
        "strict decode rejects a dangling run marker",
    );

    assert!(rp.cleanup(), "decode regression test failed");
}
