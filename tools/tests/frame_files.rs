use std::fs;

use pcc_tools::{
    frame_file_name, inspect_frame, list_frames, load_point_cloud, write_point_cloud, Profile,
    StreamDecoder, StreamEncoder,
};
use voxel::Point;

#[test]
fn encoded_directory_decodes_in_name_order() {
    let dir = std::env::temp_dir().join(format!("pcc-tools-stream-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let frames_dir = dir.join("frames");
    let clouds_dir = dir.join("clouds");
    fs::create_dir_all(&frames_dir).unwrap();
    fs::create_dir_all(&clouds_dir).unwrap();

    let clouds: Vec<Vec<Point>> = (0..12)
        .map(|i| {
            (0..4)
                .map(|j| Point::new(f64::from(i + j), f64::from(j), -1.0))
                .collect()
        })
        .collect();

    let profile = Profile::Pc30;
    let mut encoder = StreamEncoder::new(profile, profile.config()).unwrap();
    for (index, cloud) in clouds.iter().enumerate() {
        let input = clouds_dir.join(format!("{index}.json"));
        write_point_cloud(&input, cloud).unwrap();
        let frame = encoder.encode_cloud(&load_point_cloud(&input).unwrap()).unwrap();
        fs::write(frames_dir.join(frame_file_name(index)), frame).unwrap();
    }

    let entries = list_frames(&frames_dir, Some("*.pcc")).unwrap();
    assert_eq!(entries.len(), clouds.len());

    let mut decoder = StreamDecoder::new(profile, profile.config()).unwrap();
    for (index, entry) in entries.iter().enumerate() {
        let bytes = fs::read(&entry.path).unwrap();
        let report = inspect_frame(&bytes, profile, &profile.config().limits).unwrap();
        let expected_type = if index % 10 == 0 { "iframe" } else { "pframe" };
        assert_eq!(report.frame_type, expected_type, "frame {index}");

        let mut decoded = decoder.decode_cloud(&bytes).unwrap();
        let mut expected = clouds[index].clone();
        decoded.sort_by(|a, b| a.x.total_cmp(&b.x));
        expected.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert_eq!(decoded, expected, "frame {index}");
    }

    fs::remove_dir_all(dir).unwrap();
}
