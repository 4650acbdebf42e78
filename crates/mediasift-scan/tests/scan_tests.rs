use mediasift_scan::{
    AlbumArtMatcher, ClassifierConfig, EntryHint, ExtensionClassifier, FileType, MediaTypes,
    MimeTable, OptionalFormats, PathEntry, PathTypeResolver,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_library() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir_all(root.join("Music/Artist/Album")).unwrap();
    fs::create_dir_all(root.join("Video")).unwrap();
    fs::create_dir_all(root.join("Pictures")).unwrap();

    fs::write(root.join("Music/Artist/Album/01 - Intro.FLAC"), b"fLaC").unwrap();
    fs::write(root.join("Music/Artist/Album/02 - Song.mp3"), b"ID3").unwrap();
    fs::write(root.join("Music/Artist/Album/cover.jpg"), b"\xff\xd8").unwrap();
    fs::write(root.join("Music/Artist/Album/album.m3u"), b"#EXTM3U").unwrap();
    fs::write(root.join("Video/clip.mkv"), b"matroska").unwrap();
    fs::write(root.join("Video/clip.nfo"), b"<movie/>").unwrap();
    fs::write(root.join("Pictures/beach.jpeg"), b"\xff\xd8").unwrap();
    fs::write(root.join("Pictures/readme.txt"), b"hello").unwrap();

    temp
}

fn walk(dir: &Path, out: &mut Vec<(std::path::PathBuf, EntryHint)>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let hint = EntryHint::from(entry.file_type().unwrap());
        let path = entry.path();
        if hint == EntryHint::Directory {
            walk(&path, out);
        }
        out.push((path, hint));
    }
}

#[test]
fn test_classify_library_with_hints() {
    let temp = create_library();
    let classifier = ExtensionClassifier::default();
    let resolver = PathTypeResolver::new(&classifier);

    let mut entries = Vec::new();
    walk(temp.path(), &mut entries);

    let mut files: Vec<String> = entries
        .iter()
        .filter(|(path, hint)| {
            let entry = PathEntry::new(path).with_hint(*hint);
            resolver.resolve_entry(&entry, MediaTypes::AUDIO) == FileType::File
        })
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    files.sort();

    assert_eq!(files, vec!["01 - Intro.FLAC", "02 - Song.mp3", "album.m3u"]);

    let dirs = entries
        .iter()
        .filter(|(path, hint)| resolver.resolve_file_type(Some(*hint), path, MediaTypes::NONE) == FileType::Dir)
        .count();
    assert_eq!(dirs, 5);
}

#[test]
fn test_hinted_and_probed_agree() {
    let temp = create_library();
    let classifier = ExtensionClassifier::default();
    let resolver = PathTypeResolver::new(&classifier);

    let mut entries = Vec::new();
    walk(temp.path(), &mut entries);

    for mask in [MediaTypes::AUDIO, MediaTypes::VIDEO, MediaTypes::IMAGES, MediaTypes::RESCAN] {
        for (path, hint) in &entries {
            assert_eq!(
                resolver.resolve_file_type(Some(*hint), path, mask),
                resolver.resolve_unknown_type(path, mask),
                "{} under {mask}",
                path.display()
            );
        }
    }
}

#[test]
fn test_mask_gating_end_to_end() {
    let temp = create_library();
    let classifier = ExtensionClassifier::default();
    let resolver = PathTypeResolver::new(&classifier);
    let movie = temp.path().join("Video/clip.mkv");
    let nfo = temp.path().join("Video/clip.nfo");
    let jpeg = temp.path().join("Pictures/beach.jpeg");

    assert_eq!(resolver.resolve_unknown_type(&movie, MediaTypes::VIDEO), FileType::File);
    assert_eq!(resolver.resolve_unknown_type(&movie, MediaTypes::AUDIO), FileType::Unknown);
    assert_eq!(resolver.resolve_unknown_type(&nfo, MediaTypes::ALL_MEDIA), FileType::Unknown);
    assert_eq!(resolver.resolve_unknown_type(&nfo, MediaTypes::RESCAN), FileType::File);
    assert_eq!(resolver.resolve_unknown_type(&jpeg, MediaTypes::IMAGES), FileType::File);
}

#[test]
fn test_shared_across_threads() {
    let temp = create_library();
    let config = ClassifierConfig::default();
    let classifier = ExtensionClassifier::from_config(&config);
    let mimes = MimeTable::from_config(&config);
    let art = AlbumArtMatcher::from_config(&config);
    let resolver = PathTypeResolver::new(&classifier);
    let album = temp.path().join("Music/Artist/Album");

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let song = album.join("02 - Song.mp3");
                assert_eq!(resolver.resolve_unknown_type(&song, MediaTypes::AUDIO), FileType::File);
                assert_eq!(mimes.ext_to_mime(&song).map(|m| m.mime), Some("audio/mpeg"));
                assert!(art.is_album_art_path(album.join("cover.jpg")));
            });
        }
    });
}

#[test]
fn test_config_drives_optional_formats() {
    let config = ClassifierConfig::builder()
        .formats(OptionalFormats {
            wavpack: true,
            tivo: false,
        })
        .album_art_names("folder.jpg/AlbumArt_*")
        .build()
        .unwrap();

    let classifier = ExtensionClassifier::from_config(&config);
    let mimes = MimeTable::from_config(&config);
    let art = AlbumArtMatcher::from_config(&config);

    assert!(classifier.is_audio("track.wv"));
    assert!(!classifier.is_video("show.TiVo"));
    assert_eq!(mimes.ext_to_mime("track.wv").map(|m| m.mime), Some("audio/x-wavpack"));
    assert!(art.is_album_art("AlbumArt_{ABC}_Small.jpg"));
    assert!(!art.is_album_art("cover.jpg"));
}

#[cfg(unix)]
#[test]
fn test_self_referencing_symlink_does_not_recurse() {
    use std::os::unix::fs::symlink;

    let temp = create_library();
    let music = temp.path().join("Music");
    let link = music.join("Artist/loop");
    symlink(&music, &link).unwrap();

    let classifier = ExtensionClassifier::default();
    let resolver = PathTypeResolver::new(&classifier);

    assert_eq!(resolver.resolve_unknown_type(&link, MediaTypes::ALL_MEDIA), FileType::Unknown);
}
