//! Mesh node name command-line interface
//!
//! This CLI provides tools for:
//! - Validating node names with an itemized report
//! - Generating names from field values
//! - Listing the region and type+role tables
//! - Inspecting public key ids and building contact links
//!
//! Extra regions and type+role codes can be loaded from a JSON registry with
//! `--registry` or `MESHNAME_REGISTRY`.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use meshname::{
    CodeRegistry, ContactUrl, GenerationFailure, NodeName, NodeNameGrammar, PublicKeyId,
    ValidationIssue, ValidationResult, advert_type,
};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meshname")]
#[command(author, version, about = "Mesh node name validator and generator", long_about = None)]
struct Cli {
    /// Enable verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON registry with extra regions and type+role codes
    #[arg(long, env = "MESHNAME_REGISTRY", global = true)]
    registry: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more node names
    Validate {
        /// Names to validate
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Generate a node name from field values
    Generate {
        /// State or region code
        #[arg(long)]
        state: String,

        /// City code
        #[arg(long)]
        city: String,

        /// Landmark code
        #[arg(long)]
        landmark: String,

        /// Type+role code (T, TM, TR, RC, RD, RE, RM)
        #[arg(long)]
        role: String,

        /// Node counter (1-99)
        #[arg(long, default_value = "1")]
        counter: u32,
    },

    /// List type+role codes with their metadata
    Roles,

    /// List region codes
    Regions,

    /// Show the short and long ids of a public key
    Key {
        /// Public key or key prefix in hex
        hex: String,
    },

    /// Build a contact link for a node
    Contact {
        /// Node name
        #[arg(long)]
        name: String,

        /// Full public key in hex (64 digits)
        #[arg(long)]
        public_key: String,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let grammar = load_grammar(cli.registry.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Validate { names } => cmd_validate(&grammar, &names, format),
        Commands::Generate {
            state,
            city,
            landmark,
            role,
            counter,
        } => cmd_generate(
            &grammar,
            [state.as_str(), city.as_str(), landmark.as_str(), role.as_str()],
            counter,
            format,
        ),
        Commands::Roles => {
            print!("{}", render_roles(grammar.registry(), format)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Regions => {
            print!("{}", render_regions(grammar.registry(), format)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Key { hex } => cmd_key(&hex, format),
        Commands::Contact { name, public_key } => cmd_contact(&grammar, &name, &public_key, format),
    }
}

fn load_grammar(path: Option<&Path>) -> Result<NodeNameGrammar> {
    let registry = match path {
        Some(path) => {
            let input = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read registry {}", path.display()))?;
            let registry = CodeRegistry::from_json(&input)
                .with_context(|| format!("failed to load registry {}", path.display()))?;
            info!(path = %path.display(), "using registry file");
            registry
        }
        None => CodeRegistry::builtin(),
    };
    NodeNameGrammar::from_registry(registry).context("registry codes do not fit the name grammar")
}

fn cmd_validate(grammar: &NodeNameGrammar, names: &[String], format: Format) -> Result<ExitCode> {
    let (report, all_valid) = validation_report(grammar, names, format)?;
    print!("{report}");
    Ok(exit_code(all_valid))
}

/// Renders the report for every name and whether all of them are valid.
fn validation_report(
    grammar: &NodeNameGrammar,
    names: &[String],
    format: Format,
) -> Result<(String, bool)> {
    let mut all_valid = true;
    let mut reports = Vec::with_capacity(names.len());

    for name in names {
        let result = grammar.validate(name);
        debug!(name = %name, valid = result.is_valid(), "checked name");
        all_valid &= result.is_valid();
        reports.push((name.as_str(), result));
    }

    let report = match format {
        Format::Text => {
            let mut out = String::new();
            for (name, result) in &reports {
                out.push_str(&render_validation(name, result)?);
            }
            out
        }
        Format::Json => {
            let value: Vec<_> = reports
                .iter()
                .map(|(name, result)| json!({ "candidate": name, "result": result }))
                .collect();
            let mut out = serde_json::to_string_pretty(&value)?;
            out.push('\n');
            out
        }
    };

    Ok((report, all_valid))
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_generate(
    grammar: &NodeNameGrammar,
    [state, city, landmark, role]: [&str; 4],
    counter: u32,
    format: Format,
) -> Result<ExitCode> {
    let result = grammar.generate(state, city, landmark, role, counter);

    match format {
        Format::Text => match &result {
            Ok(name) => println!("{name}"),
            Err(failure) => print!("{}", render_failure(failure)?),
        },
        Format::Json => {
            let value = match &result {
                Ok(name) => json!({ "valid": true, "name": name }),
                Err(failure) => json!({
                    "valid": false,
                    "candidate": failure.candidate,
                    "issues": failure.issues,
                }),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(exit_code(result.is_ok()))
}

fn cmd_key(hex: &str, format: Format) -> Result<ExitCode> {
    let key = PublicKeyId::parse(hex).context("invalid public key")?;

    match format {
        Format::Text => {
            println!("key:      {key}");
            println!("short id: {}", key.short_id());
            println!("long id:  {}", key.long_id().unwrap_or("-"));
            println!("reserved: {}", if key.is_reserved() { "yes" } else { "no" });
        }
        Format::Json => {
            let value = json!({
                "key": key,
                "short_id": key.short_id(),
                "long_id": key.long_id(),
                "reserved": key.is_reserved(),
                "full_key": key.is_full_key(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_contact(
    grammar: &NodeNameGrammar,
    name: &str,
    public_key: &str,
    format: Format,
) -> Result<ExitCode> {
    let name = NodeName::parse_with(name, grammar).context("invalid node name")?;
    let key = PublicKeyId::parse(public_key).context("invalid public key")?;
    let url = ContactUrl::new(&name, &key).context("cannot build contact link")?;

    match format {
        Format::Text => println!("{url}"),
        Format::Json => {
            let value = json!({
                "name": name,
                "public_key": key,
                "type": advert_type(name.type_role().server_kind()),
                "url": url.as_str(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn render_validation(name: &str, result: &ValidationResult) -> Result<String> {
    match result {
        ValidationResult::Valid(name) => Ok(format!("VALID    {name}\n")),
        ValidationResult::Invalid(issues) => {
            let mut out = format!("INVALID  {name}\n");
            push_issues(&mut out, issues)?;
            Ok(out)
        }
    }
}

fn render_failure(failure: &GenerationFailure) -> Result<String> {
    let mut out = format!("INVALID  {}\n", failure.candidate);
    push_issues(&mut out, &failure.issues)?;
    Ok(out)
}

fn push_issues(out: &mut String, issues: &[ValidationIssue]) -> fmt::Result {
    for issue in issues {
        writeln!(out, "  - {issue}")?;
    }
    Ok(())
}

fn render_roles(registry: &CodeRegistry, format: Format) -> Result<String> {
    let mut out = String::new();
    match format {
        Format::Text => {
            writeln!(out, "{:<5} {:<9} {:<8} TIER", "CODE", "SERVER", "MOBILITY")?;
            for role in registry.roles() {
                writeln!(
                    out,
                    "{:<5} {:<9} {:<8} {}",
                    role.as_str(),
                    role.server_kind(),
                    role.mobility(),
                    role.tier()
                )?;
            }
        }
        Format::Json => {
            let value: Vec<_> = registry
                .roles()
                .iter()
                .map(|role| {
                    json!({
                        "code": role,
                        "server": role.server_kind(),
                        "mobility": role.mobility(),
                        "tier": role.tier(),
                        "core": role.is_core(),
                    })
                })
                .collect();
            out = serde_json::to_string_pretty(&value)?;
            out.push('\n');
        }
    }
    Ok(out)
}

fn render_regions(registry: &CodeRegistry, format: Format) -> Result<String> {
    let mut out = String::new();
    match format {
        Format::Text => {
            for region in registry.regions() {
                writeln!(out, "{:<4} {}", region.code(), region.name())?;
            }
        }
        Format::Json => {
            out = serde_json::to_string_pretty(registry.regions())?;
            out.push('\n');
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    const REGISTRY_JSON: &str = r#"{
        "regions": [{ "code": "DEN", "name": "Denver metro" }],
        "roles": [{ "code": "RS", "server": "repeater", "mobility": "static", "tier": "edge" }]
    }"#;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parse_validate_command() {
        let cli = Cli::try_parse_from(["meshname", "validate", "CO-DENVER-CHSPARK-RC01"]).unwrap();
        assert_eq!(cli.format, Format::Text);
        assert!(matches!(cli.command, Commands::Validate { ref names } if names.len() == 1));
    }

    #[test]
    fn validate_requires_a_name() {
        assert!(Cli::try_parse_from(["meshname", "validate"]).is_err());
    }

    #[test]
    fn parse_generate_with_global_flags() {
        let cli = Cli::try_parse_from([
            "meshname", "generate", "--state", "CO", "--city", "DENVER", "--landmark", "CHSPARK",
            "--role", "RC", "--format", "json", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Generate { counter: 1, .. }));
    }

    #[test]
    fn render_valid_and_invalid() {
        let grammar = NodeNameGrammar::canonical();

        let candidate = "CO-DENVER-CHSPARK-RC01";
        let out = render_validation(candidate, &grammar.validate(candidate)).unwrap();
        assert_eq!(out, "VALID    CO-DENVER-CHSPARK-RC01\n");

        let candidate = "COLORADO-DENVER-CHEESMANPARK-RC01";
        let out = render_validation(candidate, &grammar.validate(candidate)).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], format!("INVALID  {candidate}"));
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "  - state: length 8 exceeds maximum 3");
    }

    #[test]
    fn render_generation_failure() {
        let grammar = NodeNameGrammar::canonical();
        let failure = grammar.generate("CO", "DENVER", "CHSPARK", "XX", 1).unwrap_err();
        let out = render_failure(&failure).unwrap();
        assert!(out.starts_with("INVALID  CO-DENVER-CHSPARK-XX01\n"));
        assert!(out.contains("type_role: 'XX' is not a known code"));
    }

    #[test]
    fn roles_table_lists_core_codes() {
        let out = render_roles(&CodeRegistry::builtin(), Format::Text).unwrap();
        assert_eq!(out.lines().count(), 8);
        assert!(out.contains("TR    room      static   edge"));

        let out = render_roles(&CodeRegistry::builtin(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[3]["code"], "RC");
        assert_eq!(value[3]["tier"], "core");
    }

    #[test]
    fn regions_json_is_an_array() {
        let out = render_regions(&CodeRegistry::builtin(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value.as_array().is_some_and(|a| !a.is_empty()));
        assert_eq!(value[0]["code"], "AL");
    }

    #[test]
    fn mixed_names_fail_validation() {
        let grammar = NodeNameGrammar::canonical();
        let input = names(&["CO-DENVER-CHSPARK-RC01", "CO-DENVER-CHSPARK-XX01"]);

        let (report, all_valid) = validation_report(grammar, &input, Format::Text).unwrap();
        assert!(!all_valid);
        assert!(report.starts_with("VALID    CO-DENVER-CHSPARK-RC01\n"));
        assert!(report.contains("INVALID  CO-DENVER-CHSPARK-XX01\n"));

        assert_eq!(
            cmd_validate(grammar, &input, Format::Text).unwrap(),
            ExitCode::FAILURE
        );
    }

    #[test]
    fn valid_names_pass_validation() {
        let grammar = NodeNameGrammar::canonical();
        let input = names(&["CO-DENVER-CHSPARK-RC01", "TX-AUSTIN-CAPITOL-TR03"]);

        let (report, all_valid) = validation_report(grammar, &input, Format::Json).unwrap();
        assert!(all_valid);
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value[1]["candidate"], "TX-AUSTIN-CAPITOL-TR03");
        assert_eq!(value[1]["result"]["valid"], true);

        assert_eq!(
            cmd_validate(grammar, &input, Format::Json).unwrap(),
            ExitCode::SUCCESS
        );
    }

    #[test]
    fn parse_registry_flag() {
        let cli =
            Cli::try_parse_from(["meshname", "roles", "--registry", "codes.json"]).unwrap();
        assert_eq!(cli.registry.as_deref(), Some(Path::new("codes.json")));
    }

    #[test]
    fn load_grammar_without_registry_uses_builtin() {
        let grammar = load_grammar(None).unwrap();
        assert!(grammar.validate("CO-DENVER-CHSPARK-RC01").is_valid());
        assert!(!grammar.validate("DEN-AURORA-LOWRY-RS01").is_valid());
    }

    #[test]
    fn load_grammar_from_registry_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.json");
        fs::write(&path, REGISTRY_JSON).unwrap();

        let grammar = load_grammar(Some(&path)).unwrap();
        assert!(grammar.validate("DEN-AURORA-LOWRY-RS01").is_valid());
        assert!(grammar.validate("CO-DENVER-CHSPARK-RC01").is_valid());
    }

    #[test]
    fn load_grammar_reports_malformed_registry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json }").unwrap();

        let err = load_grammar(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("failed to load registry"));
        assert!(format!("{err:#}").contains("malformed registry"));
    }

    #[test]
    fn load_grammar_reports_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = load_grammar(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("failed to read registry"));
    }
}
