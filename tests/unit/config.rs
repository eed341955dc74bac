use std::time::Duration;

use super::*;

#[test]
fn defaults_match_plain_ffmpeg_on_path() {
    let s = ExportSettings::default();
    assert_eq!(s.ffmpeg, PathBuf::from("ffmpeg"));
    assert!(s.preflight);
    assert_eq!(s.settle, SettlePolicy::default());
    s.validate().unwrap();
}

#[test]
fn ffmpeg_override_ignores_empty_values() {
    let s = ExportSettings::default().with_ffmpeg_override(Some(OsString::from("/opt/ff/ffmpeg")));
    assert_eq!(s.ffmpeg, PathBuf::from("/opt/ff/ffmpeg"));

    let s = ExportSettings::default().with_ffmpeg_override(Some(OsString::new()));
    assert_eq!(s.ffmpeg, PathBuf::from("ffmpeg"));

    let s = ExportSettings::default().with_ffmpeg_override(None);
    assert_eq!(s.ffmpeg, PathBuf::from("ffmpeg"));
}

#[test]
fn validate_catches_bad_values() {
    assert!(
        ExportSettings {
            ffmpeg: PathBuf::new(),
            ..ExportSettings::default()
        }
        .validate()
        .is_err()
    );

    assert!(
        ExportSettings {
            settle: SettlePolicy::PollStable {
                interval: Duration::ZERO,
                timeout: Duration::from_secs(1),
            },
            ..ExportSettings::default()
        }
        .validate()
        .is_err()
    );
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let s: ExportSettings = serde_json::from_str(r#"{"ffmpeg":"/usr/local/bin/ffmpeg"}"#).unwrap();
    assert_eq!(s.ffmpeg, PathBuf::from("/usr/local/bin/ffmpeg"));
    assert!(s.preflight);
    assert_eq!(s.settle, SettlePolicy::default());

    let s: ExportSettings =
        serde_json::from_str(r#"{"preflight":false,"settle":{"mode":"fixed","delay":200}}"#)
            .unwrap();
    assert!(!s.preflight);
    assert_eq!(s.settle, SettlePolicy::legacy());
}
