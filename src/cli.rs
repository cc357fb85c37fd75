use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context as _, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use log::info;

use crate::shader;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 360;

#[derive(Parser, Debug)]
#[command(
    name = "fragview",
    version,
    about = "Minimal Shadertoy-style fragment shader viewer",
    disable_help_flag = true
)]
struct Cli {
    /// Run in fullscreen mode on the primary monitor.
    #[arg(short, long)]
    fullscreen: bool,

    /// Window width in pixels; non-numeric or non-positive values fall back
    /// to the default.
    #[arg(short, long, value_name = "N", value_parser = parse_dimension,
          allow_negative_numbers = true, default_value = "640")]
    width: i32,

    /// Window height in pixels; same fallback rule as --width.
    #[arg(short = 'h', long, value_name = "N", value_parser = parse_dimension,
          allow_negative_numbers = true, default_value = "360")]
    height: i32,

    /// Path to a file containing the fragment shader body.
    #[arg(short, long, value_name = "PATH")]
    source: Option<PathBuf>,

    /// Show this help and exit.
    #[arg(short = '?', long, action = ArgAction::Help)]
    help: Option<bool>,
}

/// Never fails: unparseable input maps to 0, which the non-positive fallback
/// then absorbs.
fn parse_dimension(raw: &str) -> Result<i32, std::convert::Infallible> {
    Ok(raw.parse().unwrap_or(0))
}

fn dimension_or(value: i32, default: u32) -> u32 {
    if value > 0 {
        value as u32
    } else {
        default
    }
}

/// Resolved startup configuration. The shader body, when loaded from a file,
/// is held here verbatim for the process lifetime.
#[derive(Debug)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub source: Option<String>,
}

impl Config {
    pub fn fragment_body(&self) -> &str {
        self.source
            .as_deref()
            .unwrap_or(shader::DEFAULT_FRAGMENT_BODY)
    }

    fn from_cli(cli: Cli) -> Result<Self> {
        let source = match &cli.source {
            Some(path) => {
                info!("Loading shader program: {}", path.display());
                let body = fs::read_to_string(path).with_context(|| {
                    format!("could not read shader program {}", path.display())
                })?;
                Some(body)
            }
            None => None,
        };

        Ok(Self {
            width: dimension_or(cli.width, DEFAULT_WIDTH),
            height: dimension_or(cli.height, DEFAULT_HEIGHT),
            fullscreen: cli.fullscreen,
            source,
        })
    }
}

/// Parses the command line. An unrecognized option is treated as a request
/// for guidance: help text, exit 0. Help and version requests exit here too.
pub fn parse() -> Result<Config> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::UnknownArgument => {
            let _ = Cli::command().print_help();
            process::exit(0);
        }
        Err(err) => err.exit(),
    };

    Config::from_cli(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse_from(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn defaults_apply_without_flags() {
        let cli = parse_from(&["fragview"]);
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert!(!config.fullscreen);
        assert!(config.source.is_none());
        assert_eq!(config.fragment_body(), shader::DEFAULT_FRAGMENT_BODY);
    }

    #[test]
    fn explicit_dimensions_are_honored() {
        let cli = parse_from(&["fragview", "--width", "1280", "--height", "720"]);
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
    }

    #[test]
    fn negative_width_falls_back_to_default() {
        let cli = parse_from(&["fragview", "--width", "-5"]);
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.width, DEFAULT_WIDTH);
    }

    #[test]
    fn non_numeric_height_falls_back_to_default() {
        let cli = parse_from(&["fragview", "-h", "tall"]);
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn short_flags_parse() {
        let cli = parse_from(&["fragview", "-f", "-w", "800", "-h", "600"]);
        assert!(cli.fullscreen);
        assert_eq!(cli.width, 800);
        assert_eq!(cli.height, 600);
    }

    #[test]
    fn source_file_round_trips_verbatim() {
        let body = "void mainImage(out vec4 c, in vec2 p) { c = vec4(0.5); }\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();

        let path = file.path().to_str().unwrap().to_owned();
        let cli = parse_from(&["fragview", "--source", &path]);
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.fragment_body(), body);
    }

    #[test]
    fn missing_source_file_errors_with_path() {
        let cli = parse_from(&["fragview", "--source", "missing.glsl"]);
        let err = Config::from_cli(cli).unwrap_err();
        assert!(err.to_string().contains("missing.glsl"));
    }
}
