// Media store tests: upload validation, persistence, and best-effort removal

use axum::body::Bytes;
use newsdesk_backend::services::media::{MediaConfig, MediaService, UploadedFile};
use uuid::Uuid;

fn test_service() -> MediaService {
    let dir = std::env::temp_dir().join(format!("newsdesk-media-it-{}", Uuid::new_v4()));
    MediaService::new(MediaConfig::for_test(dir))
}

fn sample_upload(name: &str, content_type: &str, size: usize) -> UploadedFile {
    UploadedFile {
        name: name.to_string(),
        content_type: Some(content_type.to_string()),
        data: Bytes::from(vec![0u8; size]),
    }
}

#[test]
fn test_image_validation_rules() {
    let service = test_service();

    // Acceptable image
    assert_eq!(service.validate_image(1024, Some("image/png")), None);
    assert_eq!(service.validate_image(1024, Some("image/webp")), None);

    // Over the configured maximum
    let message = service
        .validate_image(5 * 1024 * 1024, Some("image/png"))
        .expect("oversize image must be rejected");
    assert_eq!(message, "Image Size Must Be Less Than 2 MB");

    // Outside the allowed MIME set
    let message = service
        .validate_image(1024, Some("video/mp4"))
        .expect("non-image MIME must be rejected");
    assert!(message.starts_with("Image Must Be One Of"));

    // Missing content type is never acceptable
    assert!(service.validate_image(1024, None).is_some());
}

#[tokio::test]
async fn test_store_persists_bytes_under_generated_name() {
    let service = test_service();
    let upload = sample_upload("press-photo.jpeg", "image/jpeg", 512);

    let filename = service.store(&upload).await.expect("store failed");

    assert!(filename.ends_with(".jpeg"), "got {}", filename);
    let path = service.upload_dir().join(&filename);
    let stored = tokio::fs::read(&path).await.expect("stored file unreadable");
    assert_eq!(stored.len(), 512);
}

#[tokio::test]
async fn test_two_stores_never_collide() {
    let service = test_service();
    let upload = sample_upload("same-name.png", "image/png", 16);

    let first = service.store(&upload).await.unwrap();
    let second = service.store(&upload).await.unwrap();

    assert_ne!(first, second);
    assert!(service.upload_dir().join(&first).exists());
    assert!(service.upload_dir().join(&second).exists());
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let service = test_service();
    let upload = sample_upload("temp.gif", "image/gif", 8);

    let filename = service.store(&upload).await.unwrap();

    // First removal deletes the file
    assert!(service.remove(&filename).await);
    assert!(!service.upload_dir().join(&filename).exists());

    // Removing an already-missing file is a silent no-op, not an error
    assert!(!service.remove(&filename).await);
    assert!(!service.remove("never-existed.png").await);
}
