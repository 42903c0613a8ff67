use striplog::config::ExtractionConfig;
use striplog::coordinate_mapping::{ClickPoint, CropRegion, DepthScale};
use striplog::extract::{find_collisions, plan_file_names};

/// The select -> config -> extract handoff, minus the rendering: clicks
/// become a region, the region lands in a config, and the depth scale
/// plans the output names.
#[test]
fn test_selection_to_extraction_plan() {
    // two corner clicks on a page rendered at zoom 2, in "wrong" order
    let region = CropRegion::from_clicks(ClickPoint::new(754, 5600), ClickPoint::new(242, 100), 2.0);
    assert_eq!(region.x_start, 121.0);
    assert_eq!(region.x_end, 377.0);
    assert_eq!(region.y_start, 50.0);
    assert_eq!(region.y_end, 2800.0);

    // the printed snippet round-trips through the config file
    let mut config = ExtractionConfig::default();
    config.crop = region;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("striplog.toml");
    config.save_to_file(&config_path).unwrap();
    let loaded = ExtractionConfig::load_from_file(&config_path).unwrap();
    assert_eq!(loaded.crop, region);

    // the batch step produces one name per data page, no collisions at
    // this depth scale
    let names = plan_file_names(&loaded.depth);
    assert_eq!(names.len(), 196);
    assert_eq!(names.first().unwrap(), "2990-3018.jpg");
    assert_eq!(names.last().unwrap(), "8477-8506.jpg");
    assert!(find_collisions(&names).is_empty());
}

/// Header-excepted pages use their own y bounds but share x bounds and
/// zoom with the configured crop.
#[test]
fn test_header_overrides_apply_per_page() {
    let config = ExtractionConfig::default();

    let first = config.crop_for_page(1);
    let middle = config.crop_for_page(98);
    let last = config.crop_for_page(196);

    assert!(first.height() < middle.height());
    assert!(last.height() < middle.height());
    assert_eq!(first.x_start, middle.x_start);
    assert_eq!(first.zoom, middle.zoom);
    assert_eq!(middle.y_start, config.crop.y_start);
    assert_eq!(middle.y_end, config.crop.y_end);
}

/// A degenerate depth scale where truncation collapses names must be
/// reported rather than silently planned.
#[test]
fn test_collision_flagging_for_sub_unit_spans() {
    let scale = DepthScale {
        start: 500.0,
        end: 502.0,
        pages: 8,
    };
    let names = plan_file_names(&scale);
    assert_eq!(names.len(), 8);
    let collisions = find_collisions(&names);
    assert!(!collisions.is_empty());
}
