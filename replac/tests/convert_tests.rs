use std::fs;
use std::path::Path;

use libplac_audio::{wav_header_bytes, WavHeader, PLAC_HEADER_SIZE};
use replac::{convert_file, direction_for_path, inspect_file, output_path_for, Direction};

fn wav_bytes(data: &[u8]) -> Vec<u8> {
    let header = WavHeader {
        riff_size: 36 + data.len() as u32,
        data_size: data.len() as u32,
        ..WavHeader::placeholder()
    };
    let mut bytes = wav_header_bytes(&header).to_vec();
    bytes.extend_from_slice(data);
    bytes
}

fn tone(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| {
            let t = i as f32 / 8000.0;
            (128.0 + (t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 40.0).round() as u8
        })
        .collect()
}

fn write_file(path: &Path, bytes: &[u8]) {
    fs::write(path, bytes).expect("Failed to write test input");
}

#[test]
fn test_direction_from_extension() {
    assert_eq!(
        direction_for_path(Path::new("a/b.wav")).unwrap(),
        Direction::Encode
    );
    assert_eq!(
        direction_for_path(Path::new("b.WAV")).unwrap(),
        Direction::Encode
    );
    assert_eq!(
        direction_for_path(Path::new("b.plac")).unwrap(),
        Direction::Decode
    );
    assert!(direction_for_path(Path::new("b.mp3")).is_err());
    assert!(direction_for_path(Path::new("noext")).is_err());
}

#[test]
fn test_output_path_collisions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("voice.wav");

    assert_eq!(
        output_path_for(&input, Direction::Encode),
        dir.path().join("voice.plac")
    );

    write_file(&dir.path().join("voice.plac"), b"");
    assert_eq!(
        output_path_for(&input, Direction::Encode),
        dir.path().join("voice(1).plac")
    );

    write_file(&dir.path().join("voice(1).plac"), b"");
    assert_eq!(
        output_path_for(&input, Direction::Encode),
        dir.path().join("voice(2).plac")
    );

    let plac = dir.path().join("voice.plac");
    write_file(&dir.path().join("voice.wav"), b"");
    assert_eq!(
        output_path_for(&plac, Direction::Decode),
        dir.path().join("voice(1).wav")
    );
}

#[test]
fn test_encode_then_decode_files() {
    let dir = tempfile::tempdir().unwrap();
    let data = tone(8000);
    let wav_path = dir.path().join("tone.wav");
    write_file(&wav_path, &wav_bytes(&data));

    let encoded = convert_file(&wav_path).expect("Encoding failed");
    assert_eq!(encoded.output, dir.path().join("tone.plac"));
    assert_eq!(encoded.session.direction, Direction::Encode);
    assert_eq!(encoded.session.original_bytes, 8000);
    assert!(encoded.ratio < 1.0);

    let plac_len = fs::metadata(&encoded.output).unwrap().len();
    assert_eq!(
        plac_len,
        PLAC_HEADER_SIZE as u64 + encoded.session.compressed_bytes
    );

    // tone.wav exists, so the decoded copy gets a suffix
    let decoded = convert_file(&encoded.output).expect("Decoding failed");
    assert_eq!(decoded.output, dir.path().join("tone(1).wav"));
    assert!(decoded.ratio > 1.0);
    assert_eq!(
        fs::read(&decoded.output).unwrap(),
        fs::read(&wav_path).unwrap()
    );
}

#[test]
fn test_decoded_wav_reads_with_hound() {
    let dir = tempfile::tempdir().unwrap();
    let data = tone(1234);
    let wav_path = dir.path().join("check.wav");
    write_file(&wav_path, &wav_bytes(&data));

    let encoded = convert_file(&wav_path).unwrap();
    fs::remove_file(&wav_path).unwrap();
    let decoded = convert_file(&encoded.output).unwrap();
    assert_eq!(decoded.output, wav_path);

    let mut reader = hound::WavReader::open(&decoded.output).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.bits_per_sample, 8);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    // hound reports 8-bit samples signed around zero
    let samples: Vec<u8> = reader
        .samples::<i8>()
        .map(|s| (s.unwrap() as i16 + 128) as u8)
        .collect();
    assert_eq!(samples, data);
}

#[test]
fn test_invalid_wav_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut wav = wav_bytes(&tone(100));
    // stereo
    wav[22..24].copy_from_slice(&2u16.to_le_bytes());
    let wav_path = dir.path().join("stereo.wav");
    write_file(&wav_path, &wav);

    let err = convert_file(&wav_path).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Invalid wav file"), "{}", message);
    assert!(message.contains("channel count"), "{}", message);
    assert!(!dir.path().join("stereo.plac").exists());
}

#[test]
fn test_invalid_plac_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let plac_path = dir.path().join("bad.plac");
    write_file(&plac_path, b"FLAC\0\0\0\0\0\0\0\0\0\0\0\0");

    let err = convert_file(&plac_path).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid plac file"), "{:#}", err);
    assert!(!dir.path().join("bad.wav").exists());
}

#[test]
fn test_failed_decode_removes_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let wav_path = dir.path().join("cut.wav");
    write_file(&wav_path, &wav_bytes(&tone(640)));
    let encoded = convert_file(&wav_path).unwrap();
    fs::remove_file(&wav_path).unwrap();

    // claim one more sample than the payload holds, the header still passes
    let mut plac = fs::read(&encoded.output).unwrap();
    plac[8..12].copy_from_slice(&641u32.to_le_bytes());
    fs::write(&encoded.output, &plac).unwrap();

    assert!(convert_file(&encoded.output).is_err());
    assert!(!wav_path.exists(), "partial output left behind");
}

#[test]
fn test_missing_and_unsupported_inputs() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.wav");
    let err = convert_file(&missing).unwrap_err();
    assert!(err.to_string().contains("File not found"));

    let text = dir.path().join("notes.txt");
    write_file(&text, b"hello");
    assert!(convert_file(&text).is_err());

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_inspect_file() {
    let dir = tempfile::tempdir().unwrap();
    let wav_path = dir.path().join("info.wav");
    write_file(&wav_path, &wav_bytes(&tone(100)));
    let encoded = convert_file(&wav_path).unwrap();

    let info = inspect_file(&encoded.output).unwrap();
    assert_eq!(info.original_data_size, 100);
    assert_eq!(info.frames, 3);
    assert_eq!(info.tail_len, 4);
    assert_eq!(info.compressed_data_size as u64, encoded.session.compressed_bytes);

    assert!(inspect_file(&wav_path).is_err());
}
