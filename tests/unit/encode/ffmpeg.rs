use super::*;

fn cfg(width: u32, height: u32, fps: Fps) -> SinkConfig {
    SinkConfig { width, height, fps }
}

#[test]
fn begin_rejects_bad_geometry_before_spawning() {
    let ten = Fps::integer(10).unwrap();
    let out = PathBuf::from("target").join("unit_ffmpeg").join("never.mp4");

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    assert!(matches!(
        sink.begin(cfg(0, 10, ten)),
        Err(ReelError::Validation(_))
    ));
    assert!(matches!(
        sink.begin(cfg(11, 10, ten)),
        Err(ReelError::Validation(_))
    ));
    assert!(matches!(
        sink.begin(cfg(10, 10, Fps { num: 0, den: 1 })),
        Err(ReelError::Precondition(_))
    ));
}

#[test]
fn push_and_end_require_begin() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit_ffmpeg/idle.mp4"));
    let frame = FrameBuffer::new(crate::foundation::core::Canvas::new(2, 2).unwrap());
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn codec_names_map_to_ffmpeg_encoders() {
    assert_eq!(VideoCodec::H264.ffmpeg_encoder(), "libx264");
    assert_eq!(VideoCodec::Mpeg4.ffmpeg_encoder(), "mpeg4");
    let c: VideoCodec = serde_json::from_str("\"mpeg4\"").unwrap();
    assert_eq!(c, VideoCodec::Mpeg4);
    assert_eq!(
        FfmpegSinkOpts::new("x.mp4").codec(VideoCodec::Mpeg4).codec,
        VideoCodec::Mpeg4
    );
}

#[test]
fn encodes_a_short_clip_when_ffmpeg_is_available() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let out = PathBuf::from("target").join("unit_ffmpeg").join("clip.mp4");
    let _ = std::fs::remove_file(&out);

    let canvas = crate::foundation::core::Canvas::new(16, 16).unwrap();
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16, Fps::integer(10).unwrap())).unwrap();
    for i in 0..5u64 {
        let f = FrameBuffer::filled(
            canvas,
            crate::foundation::color::Rgb8::new((i * 40) as u8, 0, 0),
        );
        sink.push_frame(FrameIndex(i), &f).unwrap();
    }
    sink.end().unwrap();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}
