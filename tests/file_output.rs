//! End-to-end generation into a temporary output directory.

use std::fs;
use std::path::Path;

use harwin_footprints::config::Config;
use harwin_footprints::connectors::{generate, select_families, FamilySelection};
use harwin_footprints::kicad::WriteOptions;
use tempfile::tempdir;

fn run(dir: &Path, selection: FamilySelection, options: WriteOptions) -> Vec<std::path::PathBuf> {
    generate(
        &select_families(selection, false),
        &Config::default(),
        dir,
        options,
    )
    .expect("Generation failed")
}

#[test]
fn writes_every_footprint_into_pretty_directory() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let paths = run(temp_dir.path(), FamilySelection::All, WriteOptions::default());

    // 11 standard M80 parts plus 40 LTek variants.
    assert_eq!(paths.len(), 51);

    let library = temp_dir.path().join("Connector_Harwin.pretty");
    let on_disk = fs::read_dir(&library)
        .expect("Library directory missing")
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "kicad_mod"))
        .count();
    assert_eq!(on_disk, 51);
}

#[test]
fn rerun_is_byte_identical() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let first = run(temp_dir.path(), FamilySelection::All, WriteOptions::default());
    let before: Vec<String> = first
        .iter()
        .map(|p| fs::read_to_string(p).expect("Failed to read"))
        .collect();

    let second = run(temp_dir.path(), FamilySelection::All, WriteOptions::default());
    assert_eq!(first, second);
    for (path, content) in second.iter().zip(&before) {
        assert_eq!(&fs::read_to_string(path).unwrap(), content, "{}", path.display());
    }
}

#[test]
fn m80_file_content() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    run(temp_dir.path(), FamilySelection::M80, WriteOptions::default());

    let path = temp_dir
        .path()
        .join("Connector_Harwin.pretty/Harwin_M80_54004xx_2x02_P2.00mm_Horizontal.kicad_mod");
    let content = fs::read_to_string(path).expect("Footprint file missing");

    assert!(content.starts_with("(module Harwin_M80_54004xx_2x02_P2.00mm_Horizontal (layer F.Cu)\n"));
    assert!(content.contains("  (attr smd)\n"));
    assert!(content.contains("(fp_text reference REF** (at 5.2 -7.5) (layer F.SilkS)"));
    assert!(content.contains(
        "(pad 1 thru_hole circle (at 0 0) (size 1.35 1.35) (drill 0.8) (layers *.Cu *.Mask))"
    ));
    assert!(content.contains(
        "(pad \"\" np_thru_hole circle (at 0.85 -3.5) (size 2.4 2.4) (drill 2.4) (layers *.Cu *.Mask))"
    ));
    assert!(content.contains(
        "(model ${KISYS3DMOD}/Connector_Harwin.3dshapes/Harwin_M80_54004xx_2x02_P2.00mm_Horizontal.wrl"
    ));
    assert!(content.contains("(offset (xyz 0 0 0))"));
    assert!(!content.contains("tedit"));
}

#[test]
fn ltek_file_content() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    run(temp_dir.path(), FamilySelection::Ltek, WriteOptions::default());

    let path = temp_dir
        .path()
        .join("Connector_Harwin.pretty/Harwin_LTek-Male_02_P2.00mm_Vertical.kicad_mod");
    let content = fs::read_to_string(path).expect("Footprint file missing");

    assert!(!content.contains("(attr"));
    assert!(content.contains("(tags \"connector harwin ltek M80\")"));
    assert!(content.contains("(fp_text user %R (at 1 0) (layer F.Fab)"));
    assert_eq!(content.matches("(pad ").count(), 2);
}

#[test]
fn kicad4_option_switches_model_keyword() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let paths = run(
        temp_dir.path(),
        FamilySelection::Ltek,
        WriteOptions {
            kicad4_compatible: true,
        },
    );
    let content = fs::read_to_string(&paths[0]).unwrap();
    assert!(content.contains("(at (xyz 0 0 0))"));
    assert!(!content.contains("(offset"));
}

#[test]
fn unwritable_output_is_an_error() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("file");
    fs::write(&blocker, "not a directory").unwrap();

    let result = generate(
        &select_families(FamilySelection::M80, false),
        &Config::default(),
        &blocker,
        WriteOptions::default(),
    );
    assert!(result.is_err());
}
