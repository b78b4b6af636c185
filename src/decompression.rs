//! Archive extraction driver
//!
//! Mirrors the compression driver for the other direction, and also hosts
//! the two inspection modes: `-t` decodes an archive into a sink to verify
//! integrity, `-l` reads only the header to report sizes without expanding
//! anything.

use std::fs::File;
use std::io::{self, stdin, stdout, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::archive::{self, DecodeStats};
use crate::cli::HuffzyArgs;
use crate::error::{HuffzyError, HuffzyResult};
use crate::format::has_archive_suffix;
use crate::utils::{format_size, saved_percentage, strip_archive_suffix};

const STREAM_BUFFER_SIZE: usize = 256 * 1024;

pub fn decompress_file(filename: &str, args: &HuffzyArgs) -> HuffzyResult<i32> {
    if filename == "-" {
        return decompress_stdin(args);
    }

    let input_path = Path::new(filename);
    if !input_path.exists() {
        return Err(HuffzyError::FileNotFound(filename.to_string()));
    }

    if input_path.is_dir() {
        return Err(HuffzyError::invalid_argument(format!(
            "{} is a directory",
            filename
        )));
    }

    let output_path = if args.stdout {
        None
    } else {
        Some(restored_output_name(input_path, args)?)
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
    let compressed_size = input_file.metadata()?.len();
    let reader = BufReader::with_capacity(STREAM_BUFFER_SIZE, input_file);

    let result = if args.stdout {
        let stdout = stdout();
        let mut writer = BufWriter::with_capacity(STREAM_BUFFER_SIZE, stdout.lock());
        let stats = archive::decode(reader, &mut writer)?;
        writer.flush()?;
        Ok(stats)
    } else {
        let output_path = output_path.clone().unwrap();
        let output_file = File::create(&output_path)?;
        let mut writer = BufWriter::with_capacity(STREAM_BUFFER_SIZE, output_file);
        archive::decode(reader, &mut writer)
            .and_then(|stats| writer.flush().map(|_| stats).map_err(HuffzyError::Io))
    };

    match result {
        Ok(stats) => {
            if args.verbosity > 0 && !args.quiet && !args.stdout {
                print_decompression_stats(&stats, compressed_size, input_path);
            }

            if !args.keep && !args.stdout {
                std::fs::remove_file(input_path)?;
            }

            Ok(0)
        }
        Err(e) => {
            if let Some(output_path) = output_path {
                if output_path.exists() {
                    let _ = std::fs::remove_file(&output_path);
                }
            }
            Err(e)
        }
    }
}

pub fn decompress_stdin(_args: &HuffzyArgs) -> HuffzyResult<i32> {
    let stdin = stdin();
    let reader = BufReader::with_capacity(STREAM_BUFFER_SIZE, stdin.lock());
    let stdout = stdout();
    let mut writer = BufWriter::with_capacity(STREAM_BUFFER_SIZE, stdout.lock());

    archive::decode(reader, &mut writer)?;
    writer.flush()?;

    Ok(0)
}

/// Decode the archive into a sink, verifying it expands cleanly.
pub fn test_file(filename: &str, args: &HuffzyArgs) -> HuffzyResult<i32> {
    let input_path = Path::new(filename);
    if !input_path.exists() {
        return Err(HuffzyError::FileNotFound(filename.to_string()));
    }

    let input_file = File::open(input_path)?;
    let reader = BufReader::with_capacity(STREAM_BUFFER_SIZE, input_file);
    let stats = archive::decode(reader, io::sink())?;

    if args.verbosity > 0 && !args.quiet {
        eprintln!(
            "{}: OK ({} symbols)",
            filename,
            stats.bytes_out
        );
    }

    Ok(0)
}

/// Report archive sizes from the header alone.
pub fn list_file(filename: &str, _args: &HuffzyArgs) -> HuffzyResult<i32> {
    let input_path = Path::new(filename);
    if !input_path.exists() {
        return Err(HuffzyError::FileNotFound(filename.to_string()));
    }

    let input_file = File::open(input_path)?;
    let compressed_size = input_file.metadata()?.len();
    let original_size = archive::read_symbol_count(BufReader::new(input_file))?;

    println!(
        "{:>12} {:>12} {:>7} {}",
        compressed_size,
        original_size,
        saved_percentage(original_size, compressed_size),
        filename
    );

    Ok(0)
}

pub fn print_list_header() {
    println!(
        "{:>12} {:>12} {:>7} name",
        "compressed", "original", "saved"
    );
}

/// Undo the compressor's name mapping: `notes.txt.hfz` restores to
/// `notes.txt`. A file without the expected suffix is refused unless -f
/// forces a `.out` name.
fn restored_output_name(input_path: &Path, args: &HuffzyArgs) -> HuffzyResult<PathBuf> {
    if has_archive_suffix(input_path, &args.suffix) {
        if let Some(stripped) = strip_archive_suffix(input_path, &args.suffix) {
            return Ok(stripped);
        }
    }

    if args.force {
        let mut name = input_path.as_os_str().to_os_string();
        name.push(".out");
        return Ok(PathBuf::from(name));
    }

    Err(HuffzyError::invalid_argument(format!(
        "{}: unknown suffix, expected {} (use -f to decompress anyway)",
        input_path.display(),
        args.suffix
    )))
}

fn print_decompression_stats(stats: &DecodeStats, compressed_size: u64, path: &Path) {
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_str()
        .unwrap_or("<unknown>");

    eprintln!(
        "{}: {} -> {}",
        filename,
        format_size(compressed_size),
        format_size(stats.bytes_out)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restored_name_strips_suffix() {
        let args = HuffzyArgs::default();
        assert_eq!(
            restored_output_name(Path::new("dir/notes.txt.hfz"), &args).unwrap(),
            PathBuf::from("dir/notes.txt")
        );
    }

    #[test]
    fn unknown_suffix_requires_force() {
        let args = HuffzyArgs::default();
        assert!(matches!(
            restored_output_name(Path::new("notes.txt"), &args),
            Err(HuffzyError::InvalidArgument(_))
        ));

        let forced = HuffzyArgs {
            force: true,
            ..HuffzyArgs::default()
        };
        assert_eq!(
            restored_output_name(Path::new("notes.txt"), &forced).unwrap(),
            PathBuf::from("notes.txt.out")
        );
    }
}
