use mediasift_ops::{
    copy_file, link_file, link_file_with, make_dir, make_dir_ex, LinkMethod, Linker, OpsError,
    SystemLinker, DEFAULT_DIR_MODE,
};
use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_make_dir_idempotent() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("db/art_cache");

    assert!(make_dir(&target, DEFAULT_DIR_MODE).is_ok());
    assert!(make_dir(&target, DEFAULT_DIR_MODE).is_ok());
    assert!(target.is_dir());
}

#[test]
fn test_make_dir_through_symlinked_dir() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("real")).unwrap();
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("alias")).unwrap();
        make_dir(temp.path().join("alias/sub"), DEFAULT_DIR_MODE).unwrap();
        assert!(temp.path().join("real/sub").is_dir());
    }
}

#[test]
fn test_copy_then_link_artwork() {
    let temp = TempDir::new().unwrap();
    let original = temp.path().join("Music/Album/cover.jpg");
    make_dir_ex(&original, DEFAULT_DIR_MODE).unwrap();
    fs::write(&original, vec![0xffu8; 9000]).unwrap();

    let cached = temp.path().join("cache/art/Album/cover.jpg");
    assert_eq!(copy_file(&original, &cached).unwrap(), 9000);

    let linked = temp.path().join("cache/links/cover.jpg");
    assert_eq!(link_file(&cached, &linked).unwrap(), LinkMethod::HardLink);
    assert_eq!(fs::read(&linked).unwrap().len(), 9000);
}

#[test]
fn test_copy_overwrites_destination() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("new.txt");
    let dst = temp.path().join("old.txt");
    fs::write(&src, b"short").unwrap();
    fs::write(&dst, b"a much longer previous body").unwrap();

    copy_file(&src, &dst).unwrap();
    assert_eq!(fs::read(&dst).unwrap(), b"short");
}

#[test]
fn test_copy_into_blocked_parent() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("a.mp3");
    fs::write(&src, b"ID3").unwrap();
    fs::write(temp.path().join("blocker"), b"x").unwrap();

    let err = copy_file(&src, temp.path().join("blocker/a.mp3")).unwrap_err();
    assert!(matches!(err, OpsError::NotADirectory { .. }));
}

/// Simulates a destination on a different filesystem.
struct OtherFilesystem;

impl Linker for OtherFilesystem {
    fn hard_link(&self, _src: &Path, _dst: &Path) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::CrossesDevices))
    }

    fn symlink(&self, src: &Path, dst: &Path) -> io::Result<()> {
        SystemLinker.symlink(src, dst)
    }
}

#[cfg(unix)]
#[test]
fn test_link_falls_back_to_symlink_across_devices() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("movie.mkv");
    fs::write(&src, b"matroska").unwrap();
    let dst = temp.path().join("mnt/usb/movie.mkv");
    fs::create_dir_all(temp.path().join("mnt/usb")).unwrap();

    let method = link_file_with(&OtherFilesystem, &src, &dst).unwrap();
    assert_eq!(method, LinkMethod::Symlink);
    assert_eq!(fs::read_link(&dst).unwrap(), src);
}
