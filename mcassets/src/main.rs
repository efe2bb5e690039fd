mod config;
mod output;
mod prompt;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use config::Settings;
use mcassets_core::{AssetStore, Extractor, find_version};
use output::{ExtractOutput, OutputWriter, RESULT_FAILURE, VersionsOutput};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// mcassets - unpack the Minecraft launcher's asset store
#[derive(Parser, Debug)]
#[command(name = "mcassets")]
#[command(
    about = "Copy hashed launcher assets into a directory tree named by their logical paths",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Version to unpack (prompts with a numbered list if omitted)
    #[arg(id = "version_name", value_name = "VERSION")]
    version: Option<String>,

    /// Launcher data directory (defaults to MCASSETS_ROOT env var or the platform location)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Output directory (defaults to MCASSETS_OUTPUT env var or ./unpacked_minecraft_assets)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List available versions and exit
    #[arg(long)]
    list: bool,

    /// Write results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut out = OutputWriter::new(cli.json);

    let result = Settings::resolve(cli.root.clone(), cli.output.clone()).and_then(|settings| {
        let interactive = atty::is(atty::Stream::Stdin);
        run(&cli, &settings, &mut out, io::stdin().lock(), interactive)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            out.write_error(&err, RESULT_FAILURE);
            ExitCode::from(RESULT_FAILURE)
        }
    }
}

/// Locate the store, pick a version and unpack it.
fn run<R: BufRead, O: Write, E: Write>(
    cli: &Cli,
    settings: &Settings,
    out: &mut OutputWriter<O, E>,
    input: R,
    interactive: bool,
) -> Result<()> {
    info!(
        store_root = %settings.store_root.display(),
        output_root = %settings.output_root.display(),
        "resolved settings"
    );

    let store = AssetStore::open(&settings.store_root)?;
    let versions = store.versions()?;

    if cli.list {
        return cmd_list(out, versions);
    }

    let version = match &cli.version {
        Some(name) => find_version(name, &versions)?.to_string(),
        None => prompt::choose_version(&versions, input, out.prompt_stream(), interactive)?,
    };

    cmd_unpack(&store, &version, settings, out)
}

fn cmd_list<O: Write, E: Write>(
    out: &mut OutputWriter<O, E>,
    versions: Vec<String>,
) -> Result<()> {
    let text = prompt::format_versions(&versions);
    out.write(
        &VersionsOutput {
            success: true,
            result_code: 0,
            versions,
        },
        || text,
    )
}

fn cmd_unpack<O: Write, E: Write>(
    store: &AssetStore,
    version: &str,
    settings: &Settings,
    out: &mut OutputWriter<O, E>,
) -> Result<()> {
    let objects = store.load_index(version)?.object_index();
    let destination = settings.output_root.join(version);
    info!(version, objects = objects.len(), "unpacking");

    let extractor = Extractor::new(store, &destination);
    let stats = extractor.extract(&objects, &mut out.progress())?;

    let destination = std::path::absolute(&destination)
        .with_context(|| format!("Failed to resolve {}", destination.display()))?;

    let output = ExtractOutput {
        success: true,
        result_code: 0,
        version: version.to_string(),
        files: stats.files,
        bytes: stats.bytes,
        destination: destination.display().to_string(),
        finished_at: Utc::now(),
    };
    out.write(&output, || output.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcassets_core::{Error, SelectionFault};
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    const HASH: &str = "abc1230000000000000000000000000000000000";

    struct Scenario {
        temp_dir: TempDir,
        settings: Settings,
    }

    impl Scenario {
        /// A launcher root with no asset indexes yet.
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let store_root = temp_dir.path().join(".minecraft");
            fs::create_dir_all(store_root.join("assets/indexes")).unwrap();
            fs::create_dir_all(store_root.join("assets/objects")).unwrap();
            let settings = Settings {
                store_root,
                output_root: temp_dir.path().join("unpacked"),
            };
            Self { temp_dir, settings }
        }

        /// `1.19` with a single click sound.
        fn with_click_sound() -> Self {
            let scenario = Self::new();
            let assets = scenario.settings.store_root.join("assets");
            fs::write(
                assets.join("indexes/1.19.json"),
                format!(
                    r#"{{"objects": {{"sound/click.ogg": {{"hash": "{HASH}", "size": 5}}}}}}"#
                ),
            )
            .unwrap();
            fs::create_dir_all(assets.join("objects/ab")).unwrap();
            fs::write(assets.join("objects/ab").join(HASH), b"click").unwrap();
            scenario
        }

        fn run(&self, args: &[&str], input: &str) -> Result<()> {
            self.run_captured(args, input).0
        }

        /// Run with stdout and stderr captured.
        fn run_captured(&self, args: &[&str], input: &str) -> (Result<()>, String, String) {
            let cli = Cli::parse_from(std::iter::once("mcassets").chain(args.iter().copied()));
            let mut out = OutputWriter::with_streams(cli.json, Vec::new(), Vec::new());
            let input = Cursor::new(input.to_string());
            let result = run(&cli, &self.settings, &mut out, input, true);

            let (stdout, stderr) = out.into_streams();
            (
                result,
                String::from_utf8(stdout).unwrap(),
                String::from_utf8(stderr).unwrap(),
            )
        }

        fn destination(&self, version: &str) -> String {
            std::path::absolute(self.settings.output_root.join(version))
                .unwrap()
                .display()
                .to_string()
        }

        fn core_error(err: &anyhow::Error) -> &Error {
            err.downcast_ref::<Error>().expect("core error")
        }
    }

    #[test]
    fn test_unpack_selected_by_prompt() {
        let scenario = Scenario::with_click_sound();
        scenario.run(&[], "0\n").unwrap();

        let extracted = scenario.settings.output_root.join("1.19/sound/click.ogg");
        assert_eq!(fs::read(extracted).unwrap(), b"click");
    }

    #[test]
    fn test_unpack_selected_by_argument() {
        let scenario = Scenario::with_click_sound();
        scenario.run(&["1.19", "--json"], "").unwrap();

        assert!(scenario.settings.output_root.join("1.19/sound/click.ogg").is_file());
    }

    #[test]
    fn test_text_mode_stdout() {
        let scenario = Scenario::with_click_sound();
        let (result, stdout, stderr) = scenario.run_captured(&[], "0\n");
        result.unwrap();

        assert_eq!(
            stdout,
            format!(
                "Available versions:\n0:\t1.19\nChoose version to unpack: \
                 {HASH}: sound/click.ogg\n\n1 files extracted to {}\n",
                scenario.destination("1.19")
            )
        );
        assert!(stderr.is_empty());
    }

    #[test]
    fn test_json_mode_stdout_is_one_document() {
        let scenario = Scenario::with_click_sound();
        let destination = scenario.destination("1.19");

        for (args, input) in [(&["--json"][..], "0\n"), (&["1.19", "--json"][..], "")] {
            let (result, stdout, stderr) = scenario.run_captured(args, input);
            result.unwrap();

            let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
            assert_eq!(value["success"], true);
            assert_eq!(value["result_code"], 0);
            assert_eq!(value["version"], "1.19");
            assert_eq!(value["files"], 1);
            assert_eq!(value["bytes"], 5);
            assert_eq!(value["destination"], destination.as_str());
            assert!(!stdout.contains(HASH));

            if input.is_empty() {
                assert!(stderr.is_empty());
            } else {
                assert_eq!(stderr, "Available versions:\n0:\t1.19\nChoose version to unpack: ");
            }
        }
    }

    #[test]
    fn test_list_stdout() {
        let scenario = Scenario::with_click_sound();

        let (result, stdout, _) = scenario.run_captured(&["--list"], "");
        result.unwrap();
        assert_eq!(stdout, "Available versions:\n0:\t1.19\n");

        let (result, stdout, _) = scenario.run_captured(&["--list", "--json"], "");
        result.unwrap();
        let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(value["versions"], serde_json::json!(["1.19"]));
    }

    #[test]
    fn test_unknown_version_argument() {
        let scenario = Scenario::with_click_sound();
        let err = scenario.run(&["1.7"], "").unwrap_err();

        assert!(matches!(
            Scenario::core_error(&err),
            Error::InvalidSelection {
                fault: SelectionFault::UnknownVersion,
                ..
            }
        ));
        assert!(!scenario.settings.output_root.exists());
    }

    #[test]
    fn test_invalid_selection_writes_nothing() {
        let scenario = Scenario::with_click_sound();
        for input in ["-1\n", "99\n", "abc\n"] {
            let err = scenario.run(&[], input).unwrap_err();
            assert!(matches!(
                Scenario::core_error(&err),
                Error::InvalidSelection { .. }
            ));
        }
        assert!(!scenario.settings.output_root.exists());
    }

    #[test]
    fn test_no_versions_writes_nothing() {
        let scenario = Scenario::new();
        let err = scenario.run(&[], "0\n").unwrap_err();

        assert!(matches!(
            Scenario::core_error(&err),
            Error::NoVersionsAvailable { .. }
        ));
        assert!(!scenario.settings.output_root.exists());
    }

    #[test]
    fn test_missing_store_root() {
        let mut scenario = Scenario::new();
        scenario.settings.store_root = scenario.temp_dir.path().join("no-launcher-here");
        let err = scenario.run(&[], "0\n").unwrap_err();

        assert!(matches!(
            Scenario::core_error(&err),
            Error::StoreRootNotFound { .. }
        ));
    }

    #[test]
    fn test_list_does_not_unpack() {
        let scenario = Scenario::with_click_sound();
        scenario.run(&["--list"], "").unwrap();
        assert!(!scenario.settings.output_root.exists());
    }

    #[test]
    fn test_missing_object_fails() {
        let scenario = Scenario::with_click_sound();
        let object = scenario
            .settings
            .store_root
            .join("assets/objects/ab")
            .join(HASH);
        fs::remove_file(object).unwrap();

        let err = scenario.run(&["1.19"], "").unwrap_err();
        assert!(matches!(
            Scenario::core_error(&err),
            Error::ObjectMissing { .. }
        ));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["mcassets", "1.19", "-r", "/mc", "-o", "/out", "--json"]);
        assert_eq!(cli.version.as_deref(), Some("1.19"));
        assert_eq!(cli.root, Some(PathBuf::from("/mc")));
        assert_eq!(cli.output, Some(PathBuf::from("/out")));
        assert!(cli.json);
        assert!(!cli.list);
    }
}
