//! Command-line interface for the umlify utility
//!
//! Provides a CLI to turn Java-style class source into UMLet diagrams and
//! relationship reports.

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::colorizer::colorize_output;
use umlify::core::logging::init_logging;
use umlify::render::SummaryRenderer;
use umlify::{AnalyzerConfig, ConvertError, Converter, LayoutOptions, RenderOptions, Renderer};

/// Umlify - Turn Java-style class source into UMLet diagrams
#[derive(Parser)]
#[command(name = "umlify")]
#[command(about = "Extract classes and UML relationships from Java-style source")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert source to a UMLet document or another output format
    Convert {
        /// Input file containing source text (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// What to write
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Uxf)]
        format: OutputFormat,

        /// Report plain field references as associations
        #[arg(long)]
        field_associations: bool,

        #[command(flatten)]
        layout: LayoutArgs,

        /// When to use colors in the relationships format
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Print a detailed JSON digest of every type and relationship
    Analyze {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Report plain field references as associations
        #[arg(long)]
        field_associations: bool,
    },

    /// Print the relationship report
    Relationships {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Report plain field references as associations
        #[arg(long)]
        field_associations: bool,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Check that the source contains at least one type declaration
    Check {
        /// Input file to check (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Output formats of the convert command
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// UMLet `.uxf` XML document
    #[default]
    Uxf,
    /// UMLet panel text for copy-paste
    Panel,
    /// Readable relationship report
    Relationships,
    /// Extracted model as JSON
    Json,
}

/// Grid placement of class boxes
#[derive(Args, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutArgs {
    /// X coordinate of the first box
    #[arg(long, default_value_t = 100)]
    pub base_x: i32,

    /// Y coordinate of the first box
    #[arg(long, default_value_t = 100)]
    pub base_y: i32,

    /// Boxes per row
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub columns: u16,

    /// Horizontal distance between box origins
    #[arg(long, default_value_t = 300)]
    pub column_spacing: i32,

    /// Vertical distance between box origins
    #[arg(long, default_value_t = 200)]
    pub row_spacing: i32,

    /// Width of every box
    #[arg(long, default_value_t = 200)]
    pub class_width: i32,
}

impl From<LayoutArgs> for LayoutOptions {
    fn from(value: LayoutArgs) -> Self {
        LayoutOptions {
            base_x: value.base_x,
            base_y: value.base_y,
            columns: usize::from(value.columns),
            column_spacing: value.column_spacing,
            row_spacing: value.row_spacing,
            class_width: value.class_width,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Main CLI application
pub struct UmlifyApp {
    converter: Converter,
}

impl UmlifyApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create a new application instance with an analyzer config
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            converter: Converter::with_config(config),
        }
    }

    fn configure(&mut self, field_associations: bool) {
        let config = AnalyzerConfig::new().with_field_associations(field_associations);
        if *self.converter.config() != config {
            self.converter = Converter::with_config(config);
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("UMLIFY_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("UMLIFY_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Umlify v{}", env!("CARGO_PKG_VERSION"));
        }
        debug!(
            log_level = log_level_str.as_deref().unwrap_or_default(),
            "CLI started"
        );

        match cli.command {
            Commands::Convert {
                input,
                output,
                format,
                field_associations,
                layout,
                color,
            } => {
                self.configure(field_associations);
                self.convert_command(input, output, format, layout, color, cli.verbose)
            }
            Commands::Analyze {
                input,
                field_associations,
            } => {
                self.configure(field_associations);
                self.analyze_command(input, cli.verbose)
            }
            Commands::Relationships {
                input,
                field_associations,
                color,
            } => {
                self.configure(field_associations);
                self.relationships_command(input, color, cli.verbose)
            }
            Commands::Check { input } => self.check_command(input, cli.verbose),
        }
    }

    /// Handle the convert command
    fn convert_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        format: OutputFormat,
        layout: LayoutArgs,
        color: ColorChoice,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let options = RenderOptions::new(layout.into());
        let conversion = self.converter.convert(&content, &options)?;

        if verbose {
            eprintln!(
                "Found {} types and {} relationships",
                conversion.summary.class_count, conversion.summary.relationship_count
            );
        }

        let text = match format {
            OutputFormat::Uxf => conversion.uml_text,
            OutputFormat::Panel => conversion.panel_text,
            OutputFormat::Relationships => {
                if Self::should_colorize(&output, color) {
                    colorize_output(&conversion.relationship_text)
                } else {
                    conversion.relationship_text
                }
            }
            OutputFormat::Json => serde_json::to_string_pretty(&conversion.model)?,
        };

        self.write_output(output, &text)
    }

    /// Handle the analyze command
    fn analyze_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let detailed = self.converter.analyze_detailed(&content)?;
        println!("{}", serde_json::to_string_pretty(&detailed)?);
        Ok(())
    }

    /// Handle the relationships command
    fn relationships_command(
        &self,
        input: Option<PathBuf>,
        color: ColorChoice,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let report = self.relationship_report(&content)?;
        let report = if Self::should_colorize(&None, color) {
            colorize_output(&report)
        } else {
            report
        };
        self.write_output(None, &report)
    }

    fn relationship_report(&self, content: &str) -> Result<String> {
        let model = self.converter.analyze(content)?;
        SummaryRenderer::new().render(&model)
    }

    /// Handle the check command
    fn check_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.check_line(&content) {
            Ok(line) => {
                println!("{}", line);
                Ok(())
            }
            Err(e) => {
                if let Some(convert_err) = e.downcast_ref::<ConvertError>() {
                    println!("✗ {}", convert_err);
                }
                Err(e)
            }
        }
    }

    /// One-line verdict for the check command
    pub fn check_line(&self, content: &str) -> Result<String> {
        let model = self.converter.analyze(content)?;
        Ok(format!(
            "✓ {} types, {} relationships",
            model.class_count(),
            model.relationship_count()
        ))
    }

    /// Determine if we should colorize the output based on color choice and output destination
    fn should_colorize(output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                match output {
                    None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                    Some(p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&std::io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", content);
                if !content.is_empty() && !content.ends_with('\n') {
                    println!();
                }
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for UmlifyApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const GARAGE: &str = r#"
        package com.example;

        public class Car extends Vehicle {
            private Engine engine;

            public Car() {
                engine = new Engine();
            }

            public void park(Garage garage) { }
        }

        public class Engine { }
    "#;

    fn default_layout() -> LayoutArgs {
        match Cli::try_parse_from(vec!["umlify", "convert"]).unwrap().command {
            Commands::Convert { layout, .. } => layout,
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_cli_parsing_convert_command() {
        let args = vec![
            "umlify",
            "convert",
            "--input",
            "Car.java",
            "--output",
            "car.uxf",
            "--format",
            "panel",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Convert {
                input,
                output,
                format,
                field_associations,
                layout,
                color,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "Car.java");
                assert_eq!(output.unwrap().to_string_lossy(), "car.uxf");
                assert_eq!(format, OutputFormat::Panel);
                assert!(!field_associations);
                assert_eq!(LayoutOptions::from(layout), LayoutOptions::default());
                assert_eq!(color, ColorChoice::Auto);
            }
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_cli_parsing_layout_flags() {
        let args = vec!["umlify", "convert", "--columns", "2", "--base-x", "0", "--class-width", "250"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Convert { layout, .. } => {
                let options = LayoutOptions::from(layout);
                assert_eq!(options.columns, 2);
                assert_eq!(options.base_x, 0);
                assert_eq!(options.class_width, 250);
                assert_eq!(options.row_spacing, 200);
            }
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_columns() {
        let args = vec!["umlify", "convert", "--columns", "0"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_relationships_command() {
        let args = vec!["umlify", "relationships", "--field-associations", "--color", "never"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Relationships {
                input,
                field_associations,
                color,
            } => {
                assert!(input.is_none());
                assert!(field_associations);
                assert_eq!(color, ColorChoice::Never);
            }
            _ => panic!("Expected Relationships command"),
        }
    }

    #[test]
    fn test_cli_parsing_check_command() {
        let args = vec!["umlify", "check", "-i", "-"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Check { input } => {
                assert_eq!(input.unwrap().to_string_lossy(), "-");
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = vec!["umlify", "analyze", "--verbose", "--log-level", "debug", "--log-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Analyze { .. }));
    }

    #[test]
    fn test_default_log_level_is_warn() {
        let cli = Cli::try_parse_from(vec!["umlify", "check"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_umlify_app_default() {
        let app = UmlifyApp::default();
        assert!(!app.converter.config().field_associations);
    }

    #[test]
    fn test_configure_switches_field_associations() {
        let mut app = UmlifyApp::new();
        app.configure(true);
        assert!(app.converter.config().field_associations);
    }

    #[test]
    fn test_read_input_from_file() {
        let app = UmlifyApp::new();

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Car.java");
        fs::write(&file_path, GARAGE).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, GARAGE);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = UmlifyApp::new();
        let dir = tempdir().unwrap();

        let err = app.read_input(Some(dir.path().join("Missing.java"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_write_output_to_file() {
        let app = UmlifyApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("car.uxf");

        app.write_output(Some(file_path.clone()), "<diagram/>").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "<diagram/>");
    }

    #[test]
    fn test_convert_command_writes_uxf_file() {
        let app = UmlifyApp::new();
        let dir = tempdir().unwrap();
        let input_path = dir.path().join("Garage.java");
        let output_path = dir.path().join("garage.uxf");
        fs::write(&input_path, GARAGE).unwrap();

        app.convert_command(
            Some(input_path),
            Some(output_path.clone()),
            OutputFormat::Uxf,
            default_layout(),
            ColorChoice::Never,
            false,
        )
        .unwrap();

        let uxf = fs::read_to_string(&output_path).unwrap();
        assert!(uxf.contains("<diagram program=\"umlet\""));
        assert_eq!(uxf.matches("<id>UMLClass</id>").count(), 2);
    }

    #[test]
    fn test_convert_command_json_format() {
        let app = UmlifyApp::new();
        let dir = tempdir().unwrap();
        let input_path = dir.path().join("Garage.java");
        let output_path = dir.path().join("garage.json");
        fs::write(&input_path, GARAGE).unwrap();

        app.convert_command(
            Some(input_path),
            Some(output_path.clone()),
            OutputFormat::Json,
            default_layout(),
            ColorChoice::Never,
            false,
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(json["package_name"], "com.example");
        assert_eq!(json["classes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_convert_command_rejects_empty_file() {
        let app = UmlifyApp::new();
        let dir = tempdir().unwrap();
        let input_path = dir.path().join("Empty.java");
        fs::write(&input_path, "  \n").unwrap();

        let err = app
            .convert_command(Some(input_path), None, OutputFormat::Uxf, default_layout(), ColorChoice::Never, false)
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ConvertError>(), Some(&ConvertError::EmptyInput));
    }

    #[test]
    fn test_relationship_report() {
        let app = UmlifyApp::new();
        let report = app.relationship_report(GARAGE).unwrap();

        assert!(report.contains("Car ───▷ Vehicle"));
        assert!(report.contains("Car ───◆ Engine"));
        assert!(report.contains("Car ┈┈┈→ Garage"));
    }

    #[test]
    fn test_check_line() {
        let app = UmlifyApp::new();
        assert_eq!(app.check_line(GARAGE).unwrap(), "✓ 2 types, 3 relationships");

        let err = app.check_line("package a.b; import x.Y;").unwrap_err();
        assert!(err.to_string().contains("(package: a.b, imports: 1)"));
    }
}
