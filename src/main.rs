//! huffzy - static Huffman file archiver
//!
//! Compresses byte streams with a per-file optimal prefix code: count the
//! input's byte frequencies, build the Huffman tree, write the frequency
//! table as a fixed header, then repack the input as bit-packed codewords.
//! The decoder rebuilds the identical tree from the header alone.

use std::process;

mod archive;
mod bitio;
mod cli;
mod codes;
mod compression;
mod decompression;
mod error;
mod format;
mod freq;
mod tree;
mod utils;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod roundtrip_tests;

use cli::HuffzyArgs;
use error::HuffzyError;

const VERSION: &str = concat!("huffzy ", env!("CARGO_PKG_VERSION"));

fn main() {
    let result = run();

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("huffzy: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<i32, HuffzyError> {
    let args = HuffzyArgs::parse()?;

    if args.version {
        println!("{}", VERSION);
        return Ok(0);
    }

    if args.help {
        print_help();
        return Ok(0);
    }

    if args.license {
        print_license();
        return Ok(0);
    }

    let mut exit_code = 0;

    if args.files.is_empty() {
        // Process stdin
        if args.list {
            return Err(HuffzyError::invalid_argument("--list needs file arguments"));
        }
        if args.test {
            return Err(HuffzyError::invalid_argument("--test needs file arguments"));
        }
        if args.decompress {
            exit_code = decompression::decompress_stdin(&args)?;
        } else {
            exit_code = compression::compress_stdin(&args)?;
        }
    } else {
        if args.list {
            decompression::print_list_header();
        }

        for file in &args.files {
            let result = if args.list {
                decompression::list_file(file, &args)
            } else if args.test {
                decompression::test_file(file, &args)
            } else if args.decompress {
                decompression::decompress_file(file, &args)
            } else {
                compression::compress_file(file, &args)
            };

            match result {
                Ok(code) => {
                    if code != 0 {
                        exit_code = code;
                    }
                }
                Err(e) => {
                    eprintln!("huffzy: {}: {}", file, e);
                    exit_code = 1;
                }
            }
        }
    }

    Ok(exit_code)
}

fn print_help() {
    println!("Usage: huffzy [OPTION]... [FILE]...");
    println!();
    println!("Compress or decompress FILEs with static Huffman coding");
    println!("(by default, compress in place).");
    println!();
    println!("Options:");
    println!("  -d, --decompress Decompress");
    println!("  -t, --test       Test archive integrity");
    println!("  -l, --list       List archive contents");
    println!("  -c, --stdout     Write to stdout, keep original files");
    println!("  -k, --keep       Keep original file");
    println!("  -f, --force      Force overwrite of output file");
    println!("  -r, --recursive  Recurse into directories");
    println!("  -S, --suffix SUF Use suffix SUF instead of .hfz");
    println!("  -q, --quiet      Suppress output");
    println!("  -v, --verbose    Verbose output");
    println!("  -h, --help       Show this help");
    println!("  -V, --version    Show version");
    println!("  -L, --license    Show license");
    println!();
    println!("Examples:");
    println!("  huffzy file.txt          Compress file.txt -> file.txt.hfz");
    println!("  huffzy -d file.txt.hfz   Decompress file.txt.hfz -> file.txt");
    println!("  huffzy -l file.txt.hfz   Show sizes without extracting");
    println!("  cat file | huffzy > out  Compress stdin to stdout");
}

fn print_license() {
    println!("huffzy - static Huffman file archiver");
    println!();
    println!("MIT License - see LICENSE file for details.");
}
