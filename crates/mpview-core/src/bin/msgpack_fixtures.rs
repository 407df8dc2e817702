use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    for (name, bytes) in fixtures() {
        write_fixture(&root.join(name).join("input.msgpack"), &bytes)?;
    }
    Ok(())
}

fn fixtures() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        // {"one": 1, "two": [true, nil]}
        (
            "map",
            vec![
                0x82, 0xa3, b'o', b'n', b'e', 0x01, 0xa3, b't', b'w', b'o', 0x92, 0xc3, 0xc0,
            ],
        ),
        // flat run of numeric leaves
        (
            "scalars",
            vec![
                0xcc, 0xff, 0xcd, 0x01, 0x00, 0xd0, 0xff, 0xca, 0x3f, 0x80, 0x00, 0x00, 0xe0,
                0x05,
            ],
        ),
        // array of one array of one integer (cascading close)
        ("nested", vec![0x91, 0x91, 0x01]),
        // empty fixmap/fixarray/fixstr collapse to leaves
        ("empty", vec![0x80, 0x90, 0xa0]),
        // uint16 tag with no payload
        ("truncated", vec![0xcd]),
        // array declares two values, input supplies one
        ("incomplete", vec![0x92, 0x01]),
    ]
}

fn write_fixture(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create {}: {}", parent.display(), err))?;
    }
    fs::write(path, bytes).map_err(|err| format!("failed to write {}: {}", path.display(), err))
}
