use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageDecoder};

use docviz::{ARCHITECTURE_FLOW_GIF, FEATURES_PNG, TECH_STACK_PNG, generate_all};

// One sequential test: generating the gallery renders 40+ full-size frames,
// so we do it once and check everything on the result.
#[test]
fn generates_the_full_gallery() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let tmp = tempfile::tempdir().unwrap();
    // Nested path that does not exist yet; generate_all must create it.
    let out_dir = tmp.path().join("docs").join("assets");
    assert!(!out_dir.exists());

    let written = generate_all(&out_dir).unwrap();

    assert_eq!(
        written,
        vec![
            out_dir.join(ARCHITECTURE_FLOW_GIF),
            out_dir.join(TECH_STACK_PNG),
            out_dir.join(FEATURES_PNG),
        ]
    );
    for path in &written {
        assert!(path.is_file(), "missing {}", path.display());
        assert!(std::fs::metadata(path).unwrap().len() > 0);
    }

    check_gif(&written[0]);
    assert_eq!(
        image::image_dimensions(&written[1]).unwrap(),
        (1800, 1500)
    );
    assert_eq!(
        image::image_dimensions(&written[2]).unwrap(),
        (2100, 1200)
    );

    // Rerunning overwrites in place rather than failing or appending.
    let rerun = generate_all(&out_dir).unwrap();
    assert_eq!(rerun, written);
    check_gif(&rerun[0]);
}

fn check_gif(path: &Path) {
    let decoder = GifDecoder::new(BufReader::new(File::open(path).unwrap())).unwrap();
    assert_eq!(decoder.dimensions(), (1400, 800));

    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 40);
    for frame in &frames {
        let (numer, denom) = frame.delay().numer_denom_ms();
        assert_eq!(numer / denom, 100);
    }
}
