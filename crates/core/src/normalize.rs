use std::ffi::OsString;
use std::path::Path;

const SUITS: &[char] = &['c', 'd', 'h', 's'];

/// Normalize a card asset file name: `d1.png` -> `da.png`, `dt.png` -> `d10.png`.
///
/// The suit is the first character of the lowercased stem and the rest is the rank.
/// Ace `1` becomes `a` and ten (`t` or `10`) becomes `10`; other ranks pass through.
/// Names that do not look like `<suit><rank>` are returned lowercased.
pub fn normalize_basename(file_name: &str) -> String {
    let (stem, extension) = split_extension(file_name);
    let stem = stem.to_lowercase();

    let mut chars = stem.chars();
    let Some(suit) = chars.next() else {
        return file_name.to_lowercase();
    };
    let rank = chars.as_str();
    if rank.is_empty() || !SUITS.contains(&suit) {
        return file_name.to_lowercase();
    }

    let rank = match rank {
        "1" => "a",
        "t" | "10" => "10",
        other => other,
    };

    match extension {
        Some(extension) => format!("{suit}{rank}.{}", extension.to_lowercase()),
        None => format!("{suit}{rank}"),
    }
}

/// Normalized file name of `path`.
///
/// Names that are not valid UTF-8 are returned as-is so that distinct raw names
/// never collapse onto the same destination.
pub fn normalize_path_name(path: &Path) -> OsString {
    let Some(name) = path.file_name() else {
        return OsString::new();
    };
    match name.to_str() {
        Some(name) => OsString::from(normalize_basename(name)),
        None => name.to_os_string(),
    }
}

// Same split as `Path::extension`, except a trailing dot means no extension.
fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        Some(0) | None => (file_name, None),
        Some(index) if index + 1 == file_name.len() => (file_name, None),
        Some(index) => (&file_name[..index], Some(&file_name[index + 1..])),
    }
}
