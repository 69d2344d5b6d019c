use super::*;

use std::fs::{self, File};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;

use iso360_xbox::xgd::{DiscLayout, MEDIA_SIGNATURE};
use iso360_xbox::Xbox360Analyzer;

use commands::analyze::{Outcome, analyze_file, is_executable_path};

/// A minimal XEX2 whose execution info carries media id 1A2B3C4D.
fn make_xex() -> Vec<u8> {
    let mut xex = vec![0u8; 0x200];
    xex[0..4].copy_from_slice(b"XEX2");
    xex[0x08..0x0C].copy_from_slice(&0x180u32.to_be_bytes());
    xex[0x10..0x14].copy_from_slice(&0x100u32.to_be_bytes());
    xex[0x14..0x18].copy_from_slice(&1u32.to_be_bytes());
    xex[0x18..0x1C].copy_from_slice(&0x0004_0006u32.to_be_bytes());
    xex[0x1C..0x20].copy_from_slice(&0x40u32.to_be_bytes());
    xex[0x40..0x54].copy_from_slice(&[
        0x1A, 0x2B, 0x3C, 0x4D, 0x20, 0x00, 0x00, 0x01, 0x20, 0x00, 0x00, 0x00, 0x41, 0x56,
        0x08, 0x2E, 0x00, 0x01, 0x01, 0x01,
    ]);
    xex
}

fn write_at(file: &mut File, offset: u64, bytes: &[u8]) {
    file.seek(SeekFrom::Start(offset)).unwrap();
    file.write_all(bytes).unwrap();
}

/// Write a sparse XGD3 image holding `xex` as default.xex.
fn write_image(path: &Path, xex: &[u8]) {
    let layout = DiscLayout::Xgd3;
    let root = layout.root_offset() as u64;
    let mut file = File::create(path).unwrap();
    file.set_len(root + 0x40 * 0x800).unwrap();

    let at = layout.descriptor_offset();
    write_at(&mut file, at, MEDIA_SIGNATURE);
    write_at(&mut file, at + 20, &0x24u32.to_le_bytes());
    write_at(&mut file, at + 24, &0x800u32.to_le_bytes());

    let mut dir = vec![0u8; 4];
    dir.extend_from_slice(&0x30u32.to_le_bytes());
    dir.extend_from_slice(&(xex.len() as u32).to_le_bytes());
    dir.push(0x20);
    dir.push(11);
    dir.extend_from_slice(b"default.xex");
    write_at(&mut file, root + 0x24 * 0x800, &dir);
    write_at(&mut file, root + 0x30 * 0x800, xex);
}

fn offline_lookup(dir: &Path) -> iso360_lookup::GameNameLookup {
    let table = dir.join("names.csv");
    fs::write(&table, "Test Game,4156082E-1A2B3C4D\n").unwrap();
    iso360_lookup::GameNameLookup::new(LookupSettings::default().with_local(table).offline())
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_analyze_with_globals() {
    let cli = Cli::try_parse_from([
        "iso360", "--offline", "analyze", "a.iso", "b.xex", "--json", "--lookup-csv", "t.csv",
    ])
    .unwrap();
    assert!(cli.offline);
    assert_eq!(cli.lookup_csv, Some(PathBuf::from("t.csv")));
    assert!(cli.json_output());
    match cli.command {
        Commands::Analyze {
            paths,
            json,
            no_lookup,
        } => {
            assert_eq!(paths, vec![PathBuf::from("a.iso"), PathBuf::from("b.xex")]);
            assert!(json);
            assert!(!no_lookup);
        }
        _ => panic!("expected analyze"),
    }
}

#[test]
fn test_analyze_requires_paths() {
    assert!(Cli::try_parse_from(["iso360", "analyze"]).is_err());
}

#[test]
fn test_parse_cache_and_extract() {
    let cli = Cli::try_parse_from(["iso360", "-v", "cache", "info"]).unwrap();
    assert!(cli.verbose);
    assert!(matches!(
        cli.command,
        Commands::Cache {
            action: CacheAction::Info
        }
    ));
    assert!(!cli.json_output());

    let cli = Cli::try_parse_from(["iso360", "extract", "game.iso", "-o", "out.xex"]).unwrap();
    match cli.command {
        Commands::Extract { iso, output } => {
            assert_eq!(iso, PathBuf::from("game.iso"));
            assert_eq!(output, Some(PathBuf::from("out.xex")));
        }
        _ => panic!("expected extract"),
    }
}

#[test]
fn test_normalize_media_id() {
    use commands::lookup::normalize_media_id;
    assert_eq!(normalize_media_id("1a2b3c4d").unwrap(), "1A2B3C4D");
    assert_eq!(normalize_media_id(" 0xdeadbeef ").unwrap(), "DEADBEEF");
    assert!(normalize_media_id("1A2B3C").is_err());
    assert!(normalize_media_id("1A2B3C4G").is_err());
}

#[test]
fn test_format_age() {
    use commands::cache::format_age;
    assert_eq!(format_age(5), "5s");
    assert_eq!(format_age(120), "2m");
    assert_eq!(format_age(7200), "2h");
    assert_eq!(format_age(3 * 86400 + 5), "3d");
}

#[test]
fn test_default_extract_output() {
    assert_eq!(
        commands::extract::default_output(Path::new("/games/halo.iso")),
        PathBuf::from("/games/halo.xex")
    );
}

#[test]
fn test_is_executable_path() {
    assert!(is_executable_path(Path::new("default.XEX")));
    assert!(!is_executable_path(Path::new("game.iso")));
    assert!(!is_executable_path(Path::new("xex")));
}

#[test]
fn test_analyze_bare_executable_with_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("default.xex");
    fs::write(&path, make_xex()).unwrap();
    let mut lookup = offline_lookup(dir.path());

    let outcome = analyze_file(&Xbox360Analyzer::new(), &path, Some(&mut lookup)).unwrap();
    match outcome {
        Outcome::Executable {
            executable,
            game_name,
        } => {
            assert_eq!(executable.media_id_hex(), "1A2B3C4D");
            assert_eq!(game_name.as_deref(), Some("Test Game"));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn test_analyze_disc_image_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.iso");
    write_image(&path, &make_xex());
    let mut lookup = offline_lookup(dir.path());

    let outcome = analyze_file(&Xbox360Analyzer::new(), &path, Some(&mut lookup)).unwrap();
    let Outcome::Disc(report) = outcome else {
        panic!("expected disc outcome");
    };
    assert_eq!(report.geometry.layout, DiscLayout::Xgd3);
    assert_eq!(report.game_name.as_deref(), Some("Test Game"));

    let lines = commands::analyze::format_disc("game.iso", &report);
    assert!(lines.iter().any(|(_, l)| l.contains("1A2B3C4D")));
    assert!(lines.iter().any(|(_, l)| l.contains("Disc 1 of 1")));
}

#[test]
fn test_analyze_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("junk.iso");
    fs::write(&bad, vec![0u8; 4096]).unwrap();

    let result = commands::analyze::run_analyze(&[bad], false, None);
    assert!(matches!(result, Err(CliError::PartialFailure(1, 1))));
}

#[test]
fn test_extract_writes_default_xex() {
    let dir = tempfile::tempdir().unwrap();
    let iso = dir.path().join("game.iso");
    let xex = make_xex();
    write_image(&iso, &xex);

    commands::extract::run_extract(&iso, None).unwrap();
    assert_eq!(fs::read(dir.path().join("game.xex")).unwrap(), xex);
}

#[test]
fn test_cache_fetch_refused_offline() {
    let settings = LookupSettings::default().offline();
    assert!(commands::cache::run_cache_fetch(&settings, true).is_err());
}
