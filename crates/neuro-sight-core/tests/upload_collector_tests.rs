//! Tests MIME filtering of uploaded media handles.

use neuro_sight_core::{MediaFile, UploadedFiles};

#[test]
fn upload_collector_tests_ignores_wrong_video_type() {
    let mut files = UploadedFiles::default();
    assert!(!files.attach_video(MediaFile::new("still.png", "image/png", 10)));
    assert!(!files.has_video());

    assert!(files.attach_video(MediaFile::new("lobby.mp4", "video/mp4", 2_048)));
    assert_eq!(files.video.as_ref().map(|file| file.name.as_str()), Some("lobby.mp4"));
}

#[test]
fn upload_collector_tests_keeps_previous_image_on_rejection() {
    let mut files = UploadedFiles::default();
    assert!(files.attach_reference_image(MediaFile::new("face.jpg", "image/jpeg", 512)));
    assert!(!files.attach_reference_image(MediaFile::new("face.webp", "image/webp", 512)));
    assert_eq!(
        files.reference_image.as_ref().map(|file| file.name.as_str()),
        Some("face.jpg")
    );

    files.clear();
    assert_eq!(files, UploadedFiles::default());
}
