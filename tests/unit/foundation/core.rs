use super::*;

#[test]
fn frame_rate_rejects_non_positive_and_non_finite() {
    assert!(FrameRate::new(0.0).is_err());
    assert!(FrameRate::new(-5.0).is_err());
    assert!(FrameRate::new(f64::NAN).is_err());
    assert!(FrameRate::new(f64::INFINITY).is_err());
    assert!(FrameRate::new(0.5).is_ok());
}

#[test]
fn frame_rate_formats_as_ffmpeg_argument() {
    assert_eq!(FrameRate::new(10.0).unwrap().to_string(), "10");
    assert_eq!(FrameRate::new(12.5).unwrap().to_string(), "12.5");
    assert_eq!(FrameRate::new(29.97).unwrap().to_string(), "29.97");
}

#[test]
fn frame_rate_converts_frames_to_seconds() {
    let fps = FrameRate::new(10.0).unwrap();
    assert!((fps.frames_to_secs(10) - 1.0).abs() < 1e-12);
}

#[test]
fn frame_rate_deserialize_validates() {
    let ok: FrameRate = serde_json::from_str("24").unwrap();
    assert_eq!(ok.as_f64(), 24.0);
    assert!(serde_json::from_str::<FrameRate>("0").is_err());
    assert!(serde_json::from_str::<FrameRate>("-1.5").is_err());
}

#[test]
fn loop_count_zero_is_not_forced() {
    assert!(!LoopCount::NONE.is_forced());
    assert!(!LoopCount::default().is_forced());
    assert!(LoopCount(3).is_forced());
}
