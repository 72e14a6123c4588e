use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use themed_styles_helper::config::{DEFAULT_TARGET, HelperConfig};
use themed_styles_helper::rule::{self, Rule, RuleRegistry};
use themed_styles_helper::utils::file_io::read_file;
use themed_styles_helper::utils::glob_expand::expand_globs;

#[derive(Parser)]
#[command(name = "themed-styles-helper")]
#[command(about = "Merge a screen's StyleSheet table into its themed style factory")]
#[command(version)]
struct Cli {
    /// TOML file overriding anchors, filters, and factory naming
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files for styles that still need merging
    Check {
        /// Input files (can be multiple files or glob patterns like "src/screens/*.tsx")
        #[arg(default_values_t = vec![DEFAULT_TARGET.to_string()])]
        files: Vec<String>,

        /// Rules to check (defaults to "all")
        #[arg(short = 'r', long = "rule", default_values_t = vec!["all".to_string()])]
        rule: Vec<String>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Output results as JSONL
        #[arg(long)]
        json: bool,

        /// Save detailed results to file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite files
    Convert {
        /// Input files (can be multiple files or glob patterns like "src/screens/*.tsx")
        #[arg(default_values_t = vec![DEFAULT_TARGET.to_string()])]
        files: Vec<String>,

        /// Rules to apply (defaults to "all")
        #[arg(short = 'r', long = "rule", default_values_t = vec!["all".to_string()])]
        rule: Vec<String>,

        /// Edit files in place
        #[arg(short, long)]
        in_place: bool,

        /// Check mode: show what would be changed without modifying files
        #[arg(short, long)]
        check: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List all available rules
    ListRules,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "themed_styles_helper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = HelperConfig::load(cli.config.as_deref())?;
    let registry = RuleRegistry::with_config(&config)?;

    match cli.command {
        Commands::Check {
            files,
            rule: rule_names,
            verbose,
            json,
            output,
        } => {
            let file_paths = expand_globs(&files)?;
            let rules = resolve_rules(&registry, &rule_names)?;

            let mut all_results = Vec::new();

            for file_path in file_paths {
                if verbose && !json {
                    println!("Checking: {}", file_path.display());
                }

                for rule in &rules {
                    match rule.check(&file_path, verbose && !json) {
                        Ok(results) => {
                            for result in results {
                                if !json && result.has_issue {
                                    println!(
                                        "  {} {}",
                                        "✗".red(),
                                        result.message.clone().unwrap_or_default()
                                    );
                                }
                                all_results.push(result);
                            }
                        }
                        Err(e) => {
                            if !json {
                                eprintln!("  {} Error checking {}: {:#}", "✗".red(), rule.name(), e);
                            }
                        }
                    }
                }
            }

            if !json && !all_results.is_empty() {
                print_check_summary(&all_results);
            }

            if json {
                for result in &all_results {
                    println!("{}", serde_json::to_string(result)?);
                }
            }

            if let Some(output_path) = output {
                let mut output_str = String::new();
                for result in &all_results {
                    output_str.push_str(&serde_json::to_string(result)?);
                    output_str.push('\n');
                }
                std::fs::write(output_path, output_str)?;
            }

            Ok(())
        }

        Commands::Convert {
            files,
            rule: rule_names,
            in_place,
            check: check_mode,
            verbose,
        } => {
            let file_paths = expand_globs(&files)?;
            let rules = resolve_rules(&registry, &rule_names)?;

            // With the rewrite going to stdout, status lines go to stderr
            let to_stdout = !in_place && !check_mode;
            let status = |line: String| {
                if to_stdout {
                    eprintln!("{line}");
                } else {
                    println!("{line}");
                }
            };

            for file_path in file_paths {
                if verbose {
                    status(format!("Processing: {}", file_path.display()));
                }

                // Printing to stdout: run the rules in place on a scratch copy
                // so each one sees the previous rule's output
                let scratch = if to_stdout {
                    let scratch = tempfile::NamedTempFile::new()?;
                    std::fs::copy(&file_path, scratch.path())?;
                    Some(scratch)
                } else {
                    None
                };
                let work_path = scratch
                    .as_ref()
                    .map(|s| s.path().to_path_buf())
                    .unwrap_or_else(|| file_path.clone());

                for rule in &rules {
                    match rule.convert(&work_path, !check_mode, check_mode, verbose) {
                        Ok(result) => {
                            if result.fixes_applied > 0 {
                                if verbose || check_mode || in_place {
                                    status(format!(
                                        "  {} {} - {}",
                                        if check_mode { "Would fix" } else { "Fixed" },
                                        rule.name(),
                                        result.message.unwrap_or_default()
                                    ));
                                }
                            } else if verbose {
                                status(format!(
                                    "  {} {} - {}",
                                    "✓".green(),
                                    rule.name(),
                                    result.message.unwrap_or_else(|| "nothing to do".to_string())
                                ));
                            }
                        }
                        Err(e) => {
                            eprintln!("  {} Error converting {}: {:#}", "✗".red(), rule.name(), e);
                            // Stop on first error
                            return Err(e);
                        }
                    }
                }

                if let Some(scratch) = scratch {
                    print!("{}", read_file(scratch.path())?);
                }
            }

            Ok(())
        }

        Commands::ListRules => {
            println!("{}", "Available rules:".bold());
            for name in registry.list_names() {
                let rule = registry.get(&name)?;
                println!("  {} - {}", name.cyan(), rule.description());
            }
            Ok(())
        }
    }
}

fn resolve_rules(registry: &RuleRegistry, names: &[String]) -> Result<Vec<Arc<dyn Rule + Send + Sync>>> {
    if names.len() == 1 && names[0] == "all" {
        Ok(registry.all())
    } else {
        names.iter().map(|name| registry.get(name)).collect()
    }
}

fn print_check_summary(results: &[rule::CheckResult]) {
    use std::collections::{BTreeMap, HashSet};

    let unique_files: HashSet<&str> = results.iter().map(|r| r.file_path.as_str()).collect();
    let mut issues_by_rule: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total_issues = 0;

    for result in results.iter().filter(|r| r.has_issue) {
        total_issues += result.issue_count;
        *issues_by_rule.entry(result.rule_name.as_str()).or_insert(0) += result.issue_count;
    }

    println!("\n{}", "=== Summary ===".bold());
    println!("Files with issues:   {}", unique_files.len());

    if !issues_by_rule.is_empty() {
        println!("\n{}", "Issues by rule:".bold());
        for (rule_name, count) in &issues_by_rule {
            println!("  {}: {} issue(s)", rule_name.cyan(), count);
        }
    }

    println!("\nTotal issues found:  {}", total_issues);
}
