//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use skyview_catalog::Lang;
use skyview_view::ProjectionMode;

use crate::Config;

/// Sky viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skyview", about = "Headless celestial sky engine")]
pub struct CliArgs {
    /// Observer latitude in degrees, north positive.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Observer longitude in degrees, east positive.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Projection: `stereographic` (wide sky) or `orthographic` (globe).
    #[arg(long, value_parser = parse_projection)]
    pub projection: Option<ProjectionMode>,

    /// Viewport width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Star name language: `primary` or `localized`.
    #[arg(long, value_parser = parse_lang)]
    pub lang: Option<Lang>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_projection(s: &str) -> Result<ProjectionMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "stereographic" | "wide" => Ok(ProjectionMode::Stereographic),
        "orthographic" | "globe" => Ok(ProjectionMode::Orthographic),
        other => Err(format!("unknown projection `{other}`")),
    }
}

fn parse_lang(s: &str) -> Result<Lang, String> {
    match s.to_ascii_lowercase().as_str() {
        "primary" => Ok(Lang::Primary),
        "localized" => Ok(Lang::Localized),
        other => Err(format!("unknown lang `{other}`")),
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(lat) = args.lat {
            self.observer.latitude_deg = lat;
        }
        if let Some(lon) = args.lon {
            self.observer.longitude_deg = lon;
        }
        if let Some(projection) = args.projection {
            self.view.projection = projection;
        }
        if let Some(w) = args.width {
            self.display.width = w;
        }
        if let Some(h) = args.height {
            self.display.height = h;
        }
        if let Some(lang) = args.lang {
            self.display.lang = lang;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            lat: Some(-33.87),
            projection: Some(ProjectionMode::Orthographic),
            width: Some(1920),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.observer.latitude_deg, -33.87);
        assert_eq!(config.view.projection, ProjectionMode::Orthographic);
        assert_eq!(config.display.width, 1920);
        // Non-overridden fields retain defaults
        assert_eq!(config.observer.longitude_deg, 139.0);
        assert_eq!(config.display.height, 720);
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_command_line() {
        let args = CliArgs::try_parse_from([
            "skyview",
            "--lat",
            "-12.5",
            "--projection",
            "Globe",
            "--lang",
            "localized",
        ])
        .unwrap();
        assert_eq!(args.lat, Some(-12.5));
        assert_eq!(args.projection, Some(ProjectionMode::Orthographic));
        assert_eq!(args.lang, Some(Lang::Localized));

        assert!(CliArgs::try_parse_from(["skyview", "--projection", "mercator"]).is_err());
    }
}
