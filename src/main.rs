mod debug_report;

use slugline::{SlugError, SlugGenerator, SlugOptions};
use std::ffi::OsString;
use std::io::{self, BufRead, IsTerminal};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match parse_args(std::env::args_os().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    inputs: Vec<OsString>,
    config_path: Option<String>,
    options: SlugOptions,
    trace: bool,
    color: bool,
}

fn run(config: &CliConfig) -> Result<(), SlugError> {
    let base = match &config.config_path {
        Some(path) => load_config(path)?,
        None => SlugOptions::default(),
    };
    let generator = SlugGenerator::new(base);

    let inputs: Vec<Vec<u8>> = match config.inputs.is_empty() {
        false => config.inputs.iter().map(|input| input.as_encoded_bytes().to_vec()).collect(),
        true => read_lines(io::stdin().lock())?,
    };

    for input in &inputs {
        if config.trace {
            let details = generator.generate_verbose(decode(input)?, &config.options)?;
            debug_report::print_run(&details, config.color);
        } else {
            println!("{}", generator.generate_bytes(input, Some(&config.options))?);
        }
    }
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = OsString>) -> Result<CliConfig, String> {
    let mut inputs: Vec<OsString> = Vec::new();
    let mut config_path: Option<String> = None;
    let mut options = SlugOptions::new();
    let mut trace = false;
    let mut color = io::stdout().is_terminal();
    let mut args = args.into_iter();

    while let Some(raw) = args.next() {
        // Non-UTF-8 arguments can only be inputs.
        let Some(arg) = raw.to_str() else {
            inputs.push(raw);
            continue;
        };
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.to_string(), None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            match inline.clone() {
                Some(value) => Ok(value),
                None => args
                    .next()
                    .ok_or_else(|| format!("error: {name} expects a value"))?
                    .into_string()
                    .map_err(|_| format!("error: {name} expects a UTF-8 value")),
            }
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("slugline {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--trace" => trace = true,
            "--locale" => options = options.locale(value("--locale")?),
            "--valid" => options = options.valid(value("--valid")?),
            "--ignore" => options = options.ignore(value("--ignore")?),
            "--delimiter" => options = options.delimiter(value("--delimiter")?),
            "--transform" => options = options.transform(value("--transform")?),
            "--pre" => options = options.pre_transform(value("--pre")?),
            "--post" => options = options.post_transform(value("--post")?),
            "--config" => config_path = Some(value("--config")?),
            "--" => {
                inputs.extend(args.by_ref());
                break;
            }
            _ if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("error: unknown option '{flag}'"));
            }
            _ => inputs.push(raw),
        }
    }

    Ok(CliConfig { inputs, config_path, options, trace, color })
}

fn load_config(path: &str) -> Result<SlugOptions, SlugError> {
    let source = std::fs::read_to_string(path)
        .map_err(|err| SlugError::InvalidOptions { reason: format!("failed to read '{path}': {err}") })?;
    SlugOptions::from_toml_str(&source)
}

/// Split `reader` into lines without decoding them; `\n` and `\r\n` both end a line.
fn read_lines(reader: impl BufRead) -> Result<Vec<Vec<u8>>, SlugError> {
    reader
        .split(b'\n')
        .map(|line| -> io::Result<Vec<u8>> {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            Ok(line)
        })
        .collect::<Result<Vec<_>, io::Error>>()
        .map_err(|err| SlugError::InvalidOptions { reason: format!("failed to read stdin: {err}") })
}

fn decode(input: &[u8]) -> Result<&str, SlugError> {
    std::str::from_utf8(input).map_err(|err| SlugError::InvalidEncoding { expected: "UTF-8", offset: err.valid_up_to() })
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "slugline {version}

Turn text into URL and filename friendly slugs.

Usage:
  slugline [OPTIONS] [--] <input...>
  echo <text> | slugline [OPTIONS]

Each input argument (or each stdin line) is slugged separately.

Options:
  --locale <tag>             Locale for transliteration, e.g. de, tr, de_AT.
  --valid <class>            Allowed characters. Default: {valid}
  --ignore <class>           Characters removed without a delimiter.
  --delimiter <text>         Replacement for invalid runs. Default: {delimiter}
  --transform <step>         Main-chain step (name or rule). Repeatable;
                             replaces the default chain.
  --pre <rule>               Rule applied before the main chain. Repeatable.
  --post <rule>              Rule applied after the main chain. Repeatable.
  --config <file.toml>       Base options; command-line options override it.
  --trace                    Print every pipeline step with timings.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG=slugline=trace    Log pipeline construction and every step.

Exit codes:
  0  Success.
  1  Slug generation failed (bad rule, class, option file or non-UTF-8 input).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        valid = slugline::DEFAULT_VALID,
        delimiter = slugline::DEFAULT_DELIMITER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<OsString> {
        items.iter().map(OsString::from).collect()
    }

    #[test]
    fn parses_flags_and_inputs() {
        let config = parse_args(args(&["--locale=de", "--delimiter", "_", "Öl", "--", "--trace"])).unwrap();
        assert_eq!(config.options.locale.as_deref(), Some("de"));
        assert_eq!(config.options.delimiter.as_deref(), Some("_"));
        assert_eq!(config.inputs, args(&["Öl", "--trace"]));
        assert!(!config.trace);

        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["--valid"])).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_arguments_are_inputs() {
        use std::os::unix::ffi::OsStringExt;

        let config = parse_args(vec![OsString::from_vec(b"caf\xff".to_vec())]).unwrap();
        assert_eq!(config.inputs.len(), 1);

        let err = decode(config.inputs[0].as_encoded_bytes()).unwrap_err();
        assert_eq!(err, SlugError::InvalidEncoding { expected: "UTF-8", offset: 3 });
    }

    #[test]
    fn stdin_lines_keep_raw_bytes() {
        let lines = read_lines(io::Cursor::new(b"caf\xc3\xa9\xff\nok\r\n".to_vec())).unwrap();
        assert_eq!(lines, vec![b"caf\xc3\xa9\xff".to_vec(), b"ok".to_vec()]);

        let generator = SlugGenerator::default();
        let err = generator.generate_bytes(&lines[0], None).unwrap_err();
        assert_eq!(err, SlugError::InvalidEncoding { expected: "UTF-8", offset: 5 });
        assert_eq!(generator.generate_bytes(&lines[1], None).unwrap(), "ok");
    }
}
