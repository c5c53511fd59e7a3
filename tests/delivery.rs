mod common;

use common::synthetic::{PAPER, grid_canvas, grid_layout, template_with_cards};
use image::RgbImage;
use photocard::io::writers::manifest::{MANIFEST_FILE_NAME, read_manifest};
use photocard::{
    CompositeImage, DeliveryOutcome, Error, MemoryPort, OutputFormat, SegmentParams, Segmenter,
    deliver_photos, process_directory_to_dir, process_template_to_dir,
};

fn twenty_three_card_template() -> RgbImage {
    let (w, h) = grid_canvas(6, 4, 110, 170, 30, 30);
    let mut cards = grid_layout(6, 4, 110, 170, 30, 30);
    cards.truncate(23);
    template_with_cards(w, h, &cards)
}

#[test]
fn twenty_three_cards_go_out_as_nine_nine_five() {
    let composite = CompositeImage::from_rgb(twenty_three_card_template());
    let photos = Segmenter::new(SegmentParams::default())
        .unwrap()
        .segment(&composite);
    assert_eq!(photos.len(), 23);

    let mut port = MemoryPort::default();
    let outcome = deliver_photos(&photos, OutputFormat::Png, 9, &mut port).unwrap();
    assert_eq!(outcome, DeliveryOutcome::Delivered { photos: 23, batches: 3 });
    assert_eq!(
        port.batches.iter().map(|b| b.len()).collect::<Vec<_>>(),
        vec![9, 9, 5]
    );

    let names: Vec<&str> = port
        .batches
        .iter()
        .flat_map(|b| b.iter().map(|p| p.file_name.as_str()))
        .collect();
    assert_eq!(names.first(), Some(&"photocard_0.png"));
    assert_eq!(names.last(), Some(&"photocard_22.png"));

    // Encoded bytes decode back to the exact crop
    let first = &port.batches[0].items()[0];
    let decoded = image::load_from_memory(&first.bytes).unwrap().to_rgb8();
    assert_eq!(decoded, photos[0].image);
}

#[test]
fn template_to_dir_writes_files_and_manifest() {
    let work = tempfile::tempdir().unwrap();
    let input = work.path().join("template.png");
    twenty_three_card_template().save(&input).unwrap();
    let out = work.path().join("cards");

    let report =
        process_template_to_dir(&input, &out, &SegmentParams::default(), OutputFormat::Png, true)
            .unwrap();
    assert_eq!(report.outcome.photos(), 23);
    assert_eq!(report.candidates, 23);

    for i in 0..23 {
        assert!(out.join(format!("photocard_{i}.png")).is_file(), "missing photocard_{i}");
    }

    let manifest = read_manifest(&out.join(MANIFEST_FILE_NAME)).unwrap();
    assert_eq!(manifest.photocards.len(), 23);
    assert_eq!(manifest.threshold, report.threshold);
    let per_batch: Vec<usize> = (0..3)
        .map(|b| manifest.photocards.iter().filter(|e| e.batch == b).count())
        .collect();
    assert_eq!(per_batch, vec![9, 9, 5]);
}

#[test]
fn blank_template_reports_no_photocards() {
    let work = tempfile::tempdir().unwrap();
    let input = work.path().join("blank.png");
    RgbImage::from_pixel(200, 300, PAPER).save(&input).unwrap();
    let out = work.path().join("out");

    let report =
        process_template_to_dir(&input, &out, &SegmentParams::default(), OutputFormat::Png, false)
            .unwrap();
    assert_eq!(report.outcome, DeliveryOutcome::NoPhotocards);
    assert!(report.manifest.is_none());
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn corrupt_template_is_a_decode_error() {
    let work = tempfile::tempdir().unwrap();
    let input = work.path().join("broken.png");
    std::fs::write(&input, b"\x89PNG\r\n\x1a\nnot really").unwrap();

    let err = process_template_to_dir(
        &input,
        &work.path().join("out"),
        &SegmentParams::default(),
        OutputFormat::Png,
        false,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {err:?}");
}

#[test]
fn directory_run_counts_outcomes() {
    let work = tempfile::tempdir().unwrap();
    let input_dir = work.path().join("in");
    std::fs::create_dir_all(&input_dir).unwrap();

    let (w, h) = grid_canvas(2, 1, 110, 170, 40, 30);
    template_with_cards(w, h, &grid_layout(2, 1, 110, 170, 40, 30))
        .save(input_dir.join("a.png"))
        .unwrap();
    RgbImage::from_pixel(100, 100, PAPER)
        .save(input_dir.join("b.png"))
        .unwrap();
    std::fs::write(input_dir.join("c.png"), b"garbage").unwrap();
    std::fs::write(input_dir.join("notes.txt"), b"hello").unwrap();

    let out = work.path().join("out");
    let report = process_directory_to_dir(
        &input_dir,
        &out,
        &SegmentParams::default(),
        OutputFormat::Jpeg,
        false,
        true,
    )
    .unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.empty, 1);
    assert_eq!(report.errors, 1);
    assert_eq!(report.skipped, 1);
    assert!(out.join("a").join("photocard_0.jpg").is_file());
    assert!(out.join("a").join("photocard_1.jpg").is_file());

    let strict = process_directory_to_dir(
        &input_dir,
        &out,
        &SegmentParams::default(),
        OutputFormat::Png,
        false,
        false,
    );
    assert!(strict.is_err());
}

#[test]
fn templates_sharing_a_stem_get_separate_directories() {
    let work = tempfile::tempdir().unwrap();
    let input_dir = work.path().join("in");
    std::fs::create_dir_all(&input_dir).unwrap();

    let (w, h) = grid_canvas(3, 1, 110, 170, 40, 30);
    template_with_cards(w, h, &grid_layout(3, 1, 110, 170, 40, 30))
        .save(input_dir.join("a.bmp"))
        .unwrap();
    let (w, h) = grid_canvas(1, 1, 110, 170, 40, 30);
    template_with_cards(w, h, &grid_layout(1, 1, 110, 170, 40, 30))
        .save(input_dir.join("a.png"))
        .unwrap();

    let out = work.path().join("out");
    let report = process_directory_to_dir(
        &input_dir,
        &out,
        &SegmentParams::default(),
        OutputFormat::Png,
        true,
        false,
    )
    .unwrap();
    assert_eq!(report.processed, 2);
    assert!(!out.join("a").exists());

    let from_bmp = read_manifest(&out.join("a_bmp").join(MANIFEST_FILE_NAME)).unwrap();
    let from_png = read_manifest(&out.join("a_png").join(MANIFEST_FILE_NAME)).unwrap();
    assert_eq!(from_bmp.photocards.len(), 3);
    assert_eq!(from_png.photocards.len(), 1);
    assert!(out.join("a_bmp").join("photocard_2.png").is_file());
    assert!(!out.join("a_png").join("photocard_1.png").exists());
}
