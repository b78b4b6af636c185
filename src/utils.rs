use std::path::{Path, PathBuf};

pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{:.0} {}", size, UNITS[unit_idx])
    } else {
        format!("{:.1} {}", size, UNITS[unit_idx])
    }
}

/// Percentage of the input size shaved off by compression. Negative when
/// the archive grew (uncompressible input pays for the header).
pub fn saved_percentage(input_size: u64, output_size: u64) -> String {
    if input_size == 0 {
        "N/A".to_string()
    } else {
        let ratio = output_size as f64 / input_size as f64;
        format!("{:.1}%", (1.0 - ratio) * 100.0)
    }
}

/// Drop a trailing archive suffix from `path`, if present.
pub fn strip_archive_suffix(path: &Path, suffix: &str) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(suffix)?;
    if stem.is_empty() {
        return None;
    }
    Some(path.with_file_name(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
    }

    #[test]
    fn test_saved_percentage() {
        assert_eq!(saved_percentage(100, 40), "60.0%");
        assert_eq!(saved_percentage(100, 125), "-25.0%");
        assert_eq!(saved_percentage(0, 2056), "N/A");
    }

    #[test]
    fn test_strip_archive_suffix() {
        assert_eq!(
            strip_archive_suffix(Path::new("dir/notes.txt.hfz"), ".hfz"),
            Some(PathBuf::from("dir/notes.txt"))
        );
        assert_eq!(strip_archive_suffix(Path::new("notes.txt"), ".hfz"), None);
        assert_eq!(strip_archive_suffix(Path::new(".hfz"), ".hfz"), None);
    }
}
