//! End-to-end tests through a file-backed region

mod common;

use common::ImageBuilder;
use gw2link::{
    layout::LINK_SIZE,
    memory::{BackingType, RegionConfig, SharedMemoryRegion},
    LinkError, LinkReader,
};
use std::io::Write;
use tempfile::TempDir;

fn file_config(dir: &TempDir, image: &[u8]) -> RegionConfig {
    let path = dir.path().join("MumbleLink");
    std::fs::write(&path, image).unwrap();
    RegionConfig::file(path)
}

#[test]
fn test_reads_producer_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let image = ImageBuilder::producer()
        .tick(42)
        .avatar_position([1.0, 2.0, 3.0]);
    let reader = LinkReader::open(&file_config(&temp_dir, image.bytes())).unwrap();

    let avatar = reader.read().unwrap().expect("marker matches");
    assert_eq!(avatar.tick(), 42);
    assert_eq!(avatar.avatar_position().to_array(), [1.0, 2.0, 3.0]);
    assert_eq!(avatar.identity().name(), "Foo");
    assert_eq!(avatar.context().port(), 24000);
    assert_eq!(avatar.version(), 2);
}

#[test]
fn test_other_producer_is_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let image = ImageBuilder::producer().name("Some Other App");
    let reader = LinkReader::open(&file_config(&temp_dir, image.bytes())).unwrap();

    assert!(reader.read().unwrap().is_none());
}

#[test]
fn test_zeroed_region_is_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let reader = LinkReader::open(&file_config(&temp_dir, &[0u8; LINK_SIZE])).unwrap();

    assert!(reader.read().unwrap().is_none());
}

#[test]
fn test_read_after_close_is_disposed() {
    let temp_dir = TempDir::new().unwrap();
    let image = ImageBuilder::producer();
    let mut reader = LinkReader::open(&file_config(&temp_dir, image.bytes())).unwrap();

    assert!(!reader.is_closed());
    reader.close();
    assert!(reader.is_closed());
    assert!(matches!(reader.read(), Err(LinkError::Disposed)));
    assert!(matches!(reader.read_image(), Err(LinkError::Disposed)));

    // second close is a no-op
    reader.close();
    assert!(reader.is_closed());
}

#[test]
fn test_missing_identity_name_is_malformed_payload() {
    let temp_dir = TempDir::new().unwrap();
    let identity = r#"{"profession":1,"race":0,"map_id":15,"world_id":1001,"team_color_id":0,"commander":false,"fov":1.222}"#;
    let image = ImageBuilder::producer().identity(identity);
    let reader = LinkReader::open(&file_config(&temp_dir, image.bytes())).unwrap();

    match reader.read() {
        Err(LinkError::MalformedPayload { payload, .. }) => assert_eq!(payload, "identity"),
        other => panic!("expected malformed payload, got {:?}", other),
    }
}

#[test]
fn test_reader_sees_producer_updates() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("MumbleLink");
    std::fs::write(&path, ImageBuilder::empty().bytes()).unwrap();
    let reader = LinkReader::open(&RegionConfig::file(&path)).unwrap();

    assert!(reader.read().unwrap().is_none());

    let mut file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
    file.write_all(ImageBuilder::producer().tick(7).bytes()).unwrap();
    file.flush().unwrap();
    let avatar = reader.read().unwrap().unwrap();
    assert_eq!(avatar.tick(), 7);
}

#[test]
fn test_snapshot_outlives_reader() {
    let temp_dir = TempDir::new().unwrap();
    let image = ImageBuilder::producer().tick(9);
    let mut reader = LinkReader::open(&file_config(&temp_dir, image.bytes())).unwrap();

    let avatar = reader.read().unwrap().unwrap();
    reader.close();
    drop(reader);

    assert_eq!(avatar.tick(), 9);
    assert_eq!(avatar.identity().name(), "Foo");
}

#[test]
fn test_reader_never_writes_region() {
    let temp_dir = TempDir::new().unwrap();
    let image = ImageBuilder::producer().tick(3);
    let config = file_config(&temp_dir, image.bytes());
    let path = config.file_path.clone().unwrap();

    let mut reader = LinkReader::open(&config).unwrap();
    for _ in 0..5 {
        reader.read().unwrap();
    }
    reader.close();

    assert_eq!(std::fs::read(&path).unwrap(), image.bytes());
}

#[test]
fn test_read_image_copies_region() {
    let temp_dir = TempDir::new().unwrap();
    let image = ImageBuilder::producer().tick(11);
    let reader = LinkReader::open(&file_config(&temp_dir, image.bytes())).unwrap();

    let copy = reader.read_image().unwrap();
    assert_eq!(&copy[..], image.bytes());
}

#[test]
fn test_create_grows_short_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("short");
    std::fs::write(&path, [0u8; 16]).unwrap();

    let region = SharedMemoryRegion::open_or_create(&RegionConfig::file(&path)).unwrap();
    assert_eq!(region.size(), LINK_SIZE);
    assert_eq!(region.create_view().len(), LINK_SIZE);
    assert!(region.is_file_backed());
    assert_eq!(std::fs::metadata(&path).unwrap().len(), LINK_SIZE as u64);
}

#[test]
fn test_open_without_create_rejects_short_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("short");
    std::fs::write(&path, [0u8; 16]).unwrap();

    let config = RegionConfig::file(&path).with_create(false);
    match SharedMemoryRegion::open_or_create(&config) {
        Err(LinkError::InsufficientSpace { requested, available }) => {
            assert_eq!(requested, LINK_SIZE);
            assert_eq!(available, 16);
        }
        other => panic!("expected insufficient space, got {:?}", other),
    }
}

#[test]
fn test_open_without_create_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = RegionConfig::file(temp_dir.path().join("absent")).with_create(false);

    assert!(matches!(
        LinkReader::open(&config),
        Err(LinkError::Io { .. })
    ));
}

#[test]
fn test_file_config_builder() {
    let config = RegionConfig::new("bridge")
        .with_backing_type(BackingType::FileBacked)
        .with_file_path("/tmp/bridge")
        .with_create(false)
        .with_permissions(0o644);

    assert_eq!(config.name, "bridge");
    assert_eq!(config.backing_type, BackingType::FileBacked);
    assert!(!config.create);
    assert_eq!(config.permissions, 0o644);
    assert!(config.validate().is_ok());
}

#[cfg(unix)]
mod permissions {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn set_mode(path: &std::path::Path, mode: u32) {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_read_only_region_opens_with_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let image = ImageBuilder::producer().tick(21);
        let config = file_config(&temp_dir, image.bytes());
        let path = config.file_path.clone().unwrap();
        set_mode(&path, 0o444);

        assert!(config.create);
        let reader = LinkReader::open(&config).unwrap();
        assert_eq!(reader.read().unwrap().unwrap().tick(), 21);
        drop(reader);

        let metadata = std::fs::metadata(&path).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o444);
        assert_eq!(std::fs::read(&path).unwrap(), image.bytes());
    }

    #[test]
    fn test_unreadable_region_is_access_denied() {
        if nix::unistd::geteuid().is_root() {
            // root bypasses permission bits
            return;
        }

        let temp_dir = TempDir::new().unwrap();
        let config = file_config(&temp_dir, ImageBuilder::producer().bytes());
        let path = config.file_path.clone().unwrap();
        set_mode(&path, 0o000);

        match SharedMemoryRegion::open_or_create(&config) {
            Err(LinkError::AccessDenied { name }) => assert_eq!(name, path.display().to_string()),
            other => panic!("expected access denied, got {:?}", other),
        }
        assert!(matches!(
            LinkReader::open(&config.with_create(false)),
            Err(LinkError::AccessDenied { .. })
        ));
    }
}

#[cfg(unix)]
mod shm {
    use super::*;

    struct Unlink(String);

    impl Drop for Unlink {
        fn drop(&mut self) {
            let _ = nix::sys::mman::shm_unlink(self.0.as_str());
        }
    }

    #[test]
    fn test_read_only_shm_object_attaches_with_default_config() {
        use nix::{
            fcntl::OFlag,
            sys::{mman::shm_open, stat::Mode},
        };

        let name = format!("/gw2link-ro-{}", std::process::id());
        let _cleanup = Unlink(name.clone());

        let fd = shm_open(
            name.as_str(),
            OFlag::O_RDWR | OFlag::O_CREAT | OFlag::O_EXCL,
            Mode::from_bits_truncate(0o444),
        )
        .unwrap();
        let mut producer = std::fs::File::from(fd);
        producer.set_len(LINK_SIZE as u64).unwrap();
        producer.write_all(ImageBuilder::producer().tick(4).bytes()).unwrap();

        let config = RegionConfig::new(&name);
        assert!(config.create);
        let reader = LinkReader::open(&config).unwrap();
        assert_eq!(reader.read().unwrap().unwrap().tick(), 4);
    }

    #[test]
    fn test_posix_shm_region_is_created_and_sized() {
        let name = format!("/gw2link-test-{}", std::process::id());
        let _cleanup = Unlink(name.clone());

        let config = RegionConfig::new(&name);
        assert_eq!(config.backing_type, BackingType::SharedMemory);

        let mut reader = LinkReader::open(&config).unwrap();
        assert_eq!(reader.region().unwrap().size(), LINK_SIZE);
        assert!(reader.read().unwrap().is_none());
        reader.close();

        // attaching again without create sees the existing object
        let reader = LinkReader::open(&config.with_create(false)).unwrap();
        assert!(reader.read().unwrap().is_none());
    }
}
