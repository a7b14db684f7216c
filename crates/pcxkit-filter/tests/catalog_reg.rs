//! Filter catalog regression test
//!
//! Runs every catalog entry on a decoded-style color image, checks the
//! parameter contract and JSON parameter parsing, and verifies point and
//! histogram filters against hand-computed values.

use pcxkit_core::{Channels, Histogram, Raster};
use pcxkit_filter::{FilterCatalog, FilterError, ParamSet, equalize, gamma, negative, threshold};
use pcxkit_test::RegParams;
use pcxkit_test::synthetic::{gradient_gray, ramp_palette, uniform_gray};

fn params(json: &str) -> ParamSet {
    serde_json::from_str(json).expect("parse params")
}

#[test]
fn catalog_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("catalog");
    let catalog = FilterCatalog::standard();

    // --- Test 1: every entry runs with its defaults on an indexed image ---
    let indices: Vec<u8> = (0..64u32).map(|i| (i * 4) as u8).collect();
    let indexed = Raster::from_indices(8, 8, indices, ramp_palette()).expect("indexed");
    for spec in catalog.iter() {
        let p = if spec.key == "threshold" {
            params(r#"{"threshold": 128}"#)
        } else {
            ParamSet::new()
        };
        let out = spec.apply(&indexed, &p).expect(spec.name);
        rp.compare_values(8.0, out.raster.width() as f64, 0.0);
        rp.compare_values(8.0, out.raster.height() as f64, 0.0);
        rp.compare_true(!out.raster.is_indexed(), &format!("{} drops the palette", spec.name));
        let expect_rgb = matches!(spec.key, "average" | "median");
        rp.compare_true(
            (out.raster.channels() == Channels::Rgb) == expect_rgb,
            &format!("{} output layout", spec.name),
        );
    }

    // --- Test 2: JSON parameters ---
    let median = catalog.lookup("median").expect("median");
    rp.compare_true(
        median.apply(&indexed, &params(r#"{"kernel_size": 5}"#)).is_ok(),
        "median accepts kernel_size 5",
    );
    rp.compare_true(
        matches!(
            median.apply(&indexed, &params(r#"{"kernel_size": 4}"#)),
            Err(FilterError::InvalidParameter(_))
        ),
        "median rejects kernel_size 4",
    );
    let highboost = catalog.lookup("Highboost").expect("highboost");
    let resolved = highboost
        .resolve(&params(r#"{"boost_factor": 3, "kernel_size": 7}"#))
        .expect("resolve");
    rp.compare_values(3.0, resolved.float("boost_factor").expect("boost"), 0.0);
    rp.compare_values(7.0, resolved.size("kernel_size").expect("size") as f64, 0.0);
    rp.compare_true(
        highboost.resolve(&params(r#"{"boost_factor": 0.5}"#)).is_err(),
        "boost 0.5 is rejected",
    );
    let thresh = catalog.lookup("threshold").expect("threshold");
    rp.compare_true(
        matches!(
            thresh.apply(&indexed, &params(r#"{"threshold": 300}"#)),
            Err(FilterError::InvalidParameter(_))
        ),
        "threshold 300 is rejected",
    );

    // --- Test 3: point transforms ---
    let grad = gradient_gray(256, 1).expect("gradient");
    let bin = threshold(&grad, 200).expect("threshold");
    rp.compare_values(56.0, bin.data().iter().filter(|&&v| v == 255).count() as f64, 0.0);
    let neg = negative(&grad).expect("negative");
    rp.compare_values(255.0, neg.get(0, 0, 0).expect("px") as f64, 0.0);
    rp.compare_values(0.0, neg.get(255, 0, 0).expect("px") as f64, 0.0);
    let g = gamma(&grad, 2.2).expect("gamma");
    rp.compare_values(0.0, g.get(0, 0, 0).expect("px") as f64, 0.0);
    rp.compare_values(255.0, g.get(255, 0, 0).expect("px") as f64, 0.0);
    // 255 * 0.5^2.2 = 55.5 -> mid-gray darkens
    rp.compare_values(55.0, g.get(128, 0, 0).expect("px") as f64, 1.0);

    // --- Test 4: equalization ---
    let flat = uniform_gray(5, 5, 42).expect("flat");
    let (eq, hist) = equalize(&flat).expect("equalize flat");
    rp.compare_raster(&flat, &eq);
    rp.compare_values(25.0, hist.get(42) as f64, 0.0);

    let dim = Raster::from_samples(4, 2, Channels::Gray, vec![60, 60, 61, 61, 62, 62, 63, 63])
        .expect("dim");
    let (eq, hist) = equalize(&dim).expect("equalize dim");
    rp.compare_bytes(&[0, 0, 85, 85, 170, 170, 255, 255], eq.data());
    rp.compare_true(hist == Histogram::of(&eq).expect("hist"), "returned histogram matches");

    assert!(rp.cleanup(), "catalog regression test failed");
}
