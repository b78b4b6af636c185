use std::env;

use crate::error::{HuffzyError, HuffzyResult};
use crate::format::DEFAULT_SUFFIX;

#[derive(Debug, Clone)]
pub struct HuffzyArgs {
    pub files: Vec<String>,
    pub decompress: bool,
    pub test: bool,
    pub list: bool,
    pub stdout: bool,
    pub keep: bool,
    pub force: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub verbosity: u8,
    pub recursive: bool,
    pub suffix: String,
    pub help: bool,
    pub version: bool,
    pub license: bool,
}

impl Default for HuffzyArgs {
    fn default() -> Self {
        HuffzyArgs {
            files: Vec::new(),
            decompress: false,
            test: false,
            list: false,
            stdout: false,
            keep: false,
            force: false,
            quiet: false,
            verbose: false,
            verbosity: 1,
            recursive: false,
            suffix: DEFAULT_SUFFIX.to_string(),
            help: false,
            version: false,
            license: false,
        }
    }
}

impl HuffzyArgs {
    pub fn parse() -> HuffzyResult<Self> {
        let mut argv: Vec<String> = env::args().collect();
        argv.remove(0); // program name

        // HUFFZY environment variable supplies default options, like GZIP
        // does for gzip
        if let Ok(env_opts) = env::var("HUFFZY") {
            argv.splice(0..0, split_env_args(&env_opts));
        }

        Self::parse_from(argv)
    }

    fn parse_from(argv: Vec<String>) -> HuffzyResult<Self> {
        let mut args = HuffzyArgs::default();
        let mut i = 0;
        let mut in_options = true;

        while i < argv.len() {
            let arg = &argv[i];

            if !in_options || !arg.starts_with('-') || arg == "-" {
                args.files.push(arg.clone());
                i += 1;
                continue;
            }

            if arg == "--" {
                in_options = false;
                i += 1;
                continue;
            }

            if arg.starts_with("--") {
                match arg.as_str() {
                    "--help" => args.help = true,
                    "--version" => args.version = true,
                    "--license" => args.license = true,
                    "--decompress" | "--uncompress" => args.decompress = true,
                    "--test" => args.test = true,
                    "--list" => args.list = true,
                    "--stdout" | "--to-stdout" => args.stdout = true,
                    "--keep" => args.keep = true,
                    "--force" => args.force = true,
                    "--quiet" | "--silent" => {
                        args.quiet = true;
                        args.verbosity = 0;
                    }
                    "--verbose" => {
                        args.verbose = true;
                        args.verbosity = 2;
                    }
                    "--recursive" => args.recursive = true,
                    _ => {
                        if let Some(value) = arg.strip_prefix("--suffix=") {
                            args.suffix = value.to_string();
                        } else if arg == "--suffix" {
                            if i + 1 >= argv.len() {
                                return Err(HuffzyError::invalid_argument(
                                    "--suffix requires an argument",
                                ));
                            }
                            i += 1;
                            args.suffix = argv[i].clone();
                        } else {
                            return Err(HuffzyError::invalid_argument(format!(
                                "unknown option: {}",
                                arg
                            )));
                        }
                    }
                }
            } else {
                let chars: Vec<char> = arg.chars().collect();
                let mut j = 1; // skip the '-'

                while j < chars.len() {
                    match chars[j] {
                        'h' => args.help = true,
                        'V' => args.version = true,
                        'L' => args.license = true,
                        'd' => args.decompress = true,
                        't' => args.test = true,
                        'l' => args.list = true,
                        'c' => args.stdout = true,
                        'k' => args.keep = true,
                        'f' => args.force = true,
                        'q' => {
                            args.quiet = true;
                            args.verbosity = 0;
                        }
                        'v' => {
                            args.verbose = true;
                            args.verbosity += 1;
                        }
                        'r' => args.recursive = true,
                        'S' => {
                            // Suffix value may be attached (-S.suf) or the
                            // next argument
                            let value = if j + 1 < chars.len() {
                                let attached: String = chars[j + 1..].iter().collect();
                                j = chars.len();
                                attached
                            } else {
                                if i + 1 >= argv.len() {
                                    return Err(HuffzyError::invalid_argument(
                                        "-S requires an argument",
                                    ));
                                }
                                i += 1;
                                argv[i].clone()
                            };
                            args.suffix = value;
                        }
                        _ => {
                            return Err(HuffzyError::invalid_argument(format!(
                                "unknown option: -{}",
                                chars[j]
                            )))
                        }
                    }
                    j += 1;
                }
            }

            i += 1;
        }

        if args.suffix.is_empty() {
            return Err(HuffzyError::invalid_argument(
                "suffix must not be empty",
            ));
        }

        Ok(args)
    }
}

fn split_env_args(env_str: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in env_str.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}
