use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit").join("sequence").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"x").unwrap();
}

#[test]
fn input_pattern_uses_four_digit_printf_index() {
    let seq = FrameSequence::new("frames", "out");
    assert_eq!(
        seq.input_pattern(),
        OsString::from(format!("frames{}out%04d.webp", std::path::MAIN_SEPARATOR))
    );

    let png = FrameSequence::new("frames", "f_").with_extension("png");
    assert!(png.input_pattern().to_string_lossy().ends_with("f_%04d.png"));
}

#[test]
fn frame_file_name_is_zero_padded() {
    let seq = FrameSequence::new("frames", "out");
    assert_eq!(seq.frame_file_name(1), "out0001.webp");
    assert_eq!(seq.frame_file_name(42), "out0042.webp");
    assert_eq!(seq.frame_file_name(12345), "out12345.webp");
    assert_eq!(seq.frame_path(7), Path::new("frames").join("out0007.webp"));
}

#[test]
fn parse_index_accepts_only_sequence_members() {
    let seq = FrameSequence::new("frames", "out");
    assert_eq!(seq.parse_index("out0001.webp"), Some(1));
    assert_eq!(seq.parse_index("out0000.webp"), Some(0));
    assert_eq!(seq.parse_index("out12345.webp"), Some(12345));

    assert_eq!(seq.parse_index("out001.webp"), None);
    assert_eq!(seq.parse_index("out00001.webp"), None);
    assert_eq!(seq.parse_index("out0001.png"), None);
    assert_eq!(seq.parse_index("other0001.webp"), None);
    assert_eq!(seq.parse_index("out00a1.webp"), None);
    assert_eq!(seq.parse_index("out0001webp"), None);
}

#[test]
fn lexical_order_matches_frame_order() {
    let seq = FrameSequence::new("frames", "out");
    let mut names: Vec<String> = [10, 2, 1, 9].iter().map(|&i| seq.frame_file_name(i)).collect();
    names.sort();
    let indices: Vec<u32> = names.iter().filter_map(|n| seq.parse_index(n)).collect();
    assert_eq!(indices, vec![1, 2, 9, 10]);
}

#[test]
fn scan_sorts_and_filters_frames() {
    let dir = scratch("scan_sorts");
    for name in ["out0003.webp", "out0001.webp", "out0002.webp", "notes.txt", "out0001.png"] {
        touch(&dir, name);
    }
    std::fs::create_dir_all(dir.join("out0004.webp")).unwrap();

    let scan = FrameSequence::new(&dir, "out").scan().unwrap();
    let indices: Vec<u32> = scan.frames.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(scan.first_index(), Some(1));
    assert_eq!(scan.last_index(), Some(3));
    assert_eq!(scan.contiguous_len(), 3);
    assert!(scan.gaps().is_empty());
    assert_eq!(scan.paths().count(), 3);
}

#[test]
fn scan_reports_gaps_and_readable_prefix() {
    let dir = scratch("scan_gaps");
    for name in ["out0001.webp", "out0002.webp", "out0005.webp", "out0007.webp"] {
        touch(&dir, name);
    }

    let scan = FrameSequence::new(&dir, "out").scan().unwrap();
    assert_eq!(scan.len(), 4);
    assert_eq!(scan.contiguous_len(), 2);
    assert_eq!(scan.gaps(), vec![(3, 4), (6, 6)]);
}

#[test]
fn scan_of_missing_folder_fails() {
    let dir = scratch("scan_missing").join("nope");
    assert!(FrameSequence::new(&dir, "out").scan().is_err());
}

#[test]
fn empty_scan_has_no_readable_frames() {
    let scan = SequenceScan::default();
    assert!(scan.is_empty());
    assert_eq!(scan.first_index(), None);
    assert_eq!(scan.contiguous_len(), 0);
    assert!(scan.gaps().is_empty());
}
