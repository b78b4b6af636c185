//! File compression driver
//!
//! Owns everything around the core encoder: output naming, overwrite
//! protection, directory recursion, stats reporting, and cleanup of a
//! partial archive when encoding fails. The encoder itself never touches
//! the filesystem.

use std::fs::File;
use std::io::{stdin, stdout, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::archive::{self, EncodeStats};
use crate::cli::HuffzyArgs;
use crate::error::{HuffzyError, HuffzyResult};
use crate::utils::{format_size, saved_percentage};

/// Output buffer size for archive writing (256KB)
const STREAM_BUFFER_SIZE: usize = 256 * 1024;

pub fn compress_file(filename: &str, args: &HuffzyArgs) -> HuffzyResult<i32> {
    if filename == "-" {
        return compress_stdin(args);
    }

    let input_path = Path::new(filename);
    if !input_path.exists() {
        return Err(HuffzyError::FileNotFound(filename.to_string()));
    }

    if input_path.is_dir() {
        return if args.recursive {
            compress_directory(filename, args)
        } else {
            Err(HuffzyError::invalid_argument(format!(
                "{} is a directory",
                filename
            )))
        };
    }

    let output_path = if args.stdout {
        None
    } else {
        Some(archive_output_name(input_path, args))
    };

    if let Some(ref output_path) = output_path {
        if output_path.exists() && !args.force {
            return Err(HuffzyError::invalid_argument(format!(
                "output file {} already exists",
                output_path.display()
            )));
        }
    }

    let input_file = File::open(input_path)?;
    let file_size = input_file.metadata()?.len();

    // The encoder walks the input twice; mapping the file keeps both passes
    // zero-copy. Zero-length files cannot be mapped, so they encode from an
    // empty slice.
    let mmap;
    let data: &[u8] = if file_size == 0 {
        &[]
    } else {
        mmap = unsafe { Mmap::map(&input_file)? };
        &mmap
    };

    let result = if args.stdout {
        let stdout = stdout();
        let mut writer = BufWriter::with_capacity(STREAM_BUFFER_SIZE, stdout.lock());
        let stats = archive::encode(data, &mut writer)?;
        writer.flush()?;
        Ok(stats)
    } else {
        let output_path = output_path.clone().unwrap();
        write_archive(data, &output_path)
    };

    match result {
        Ok(stats) => {
            if args.verbosity > 0 && !args.quiet && !args.stdout {
                print_compression_stats(&stats, input_path);
            }

            if !args.keep && !args.stdout {
                std::fs::remove_file(input_path)?;
            }

            Ok(0)
        }
        Err(e) => {
            // The core leaves partial output alone; removing it is this
            // layer's job
            if let Some(output_path) = output_path {
                if output_path.exists() {
                    let _ = std::fs::remove_file(&output_path);
                }
            }
            Err(e)
        }
    }
}

pub fn compress_stdin(args: &HuffzyArgs) -> HuffzyResult<i32> {
    let mut data = Vec::new();
    stdin().read_to_end(&mut data)?;

    let stdout = stdout();
    let mut writer = BufWriter::with_capacity(STREAM_BUFFER_SIZE, stdout.lock());
    let stats = archive::encode(&data, &mut writer)?;
    writer.flush()?;

    if args.verbosity >= 2 {
        eprintln!(
            "huffzy: stdin: {} -> {} ({} saved)",
            format_size(stats.symbols_in),
            format_size(stats.bytes_out),
            saved_percentage(stats.symbols_in, stats.bytes_out)
        );
    }

    Ok(0)
}

fn compress_directory(dirname: &str, args: &HuffzyArgs) -> HuffzyResult<i32> {
    use walkdir::WalkDir;

    let mut exit_code = 0;

    for entry in WalkDir::new(dirname) {
        let entry = entry?;
        let path = entry.path();

        // Skip anything already carrying the archive suffix so a second
        // run over the same tree doesn't re-compress its own output
        if path.is_file() && !crate::format::has_archive_suffix(path, &args.suffix) {
            let path_str = path.to_string_lossy();
            match compress_file(&path_str, args) {
                Ok(code) => {
                    if code != 0 {
                        exit_code = code;
                    }
                }
                Err(e) => {
                    eprintln!("huffzy: {}: {}", path_str, e);
                    exit_code = 1;
                }
            }
        }
    }

    Ok(exit_code)
}

fn write_archive(data: &[u8], output_path: &Path) -> HuffzyResult<EncodeStats> {
    let output_file = File::create(output_path)?;
    let mut writer = BufWriter::with_capacity(STREAM_BUFFER_SIZE, output_file);
    let stats = archive::encode(data, &mut writer)?;
    writer.flush()?;
    Ok(stats)
}

/// `notes.txt` compresses to `notes.txt.hfz`. The suffix is appended, not
/// substituted, so decompression can restore the original name exactly.
fn archive_output_name(input_path: &Path, args: &HuffzyArgs) -> PathBuf {
    let mut name = input_path.as_os_str().to_os_string();
    name.push(&args.suffix);
    PathBuf::from(name)
}

fn print_compression_stats(stats: &EncodeStats, path: &Path) {
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_str()
        .unwrap_or("<unknown>");

    eprintln!(
        "{}: {} -> {} ({} saved)",
        filename,
        format_size(stats.symbols_in),
        format_size(stats.bytes_out),
        saved_percentage(stats.symbols_in, stats.bytes_out)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_appends_suffix() {
        let args = HuffzyArgs::default();
        assert_eq!(
            archive_output_name(Path::new("dir/notes.txt"), &args),
            PathBuf::from("dir/notes.txt.hfz")
        );
        assert_eq!(
            archive_output_name(Path::new("archive.tar"), &args),
            PathBuf::from("archive.tar.hfz")
        );
    }
}
