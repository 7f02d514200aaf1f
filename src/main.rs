use anyhow::Context;
use clap::{Arg, Command};
use log::LevelFilter;
use std::process;
use url_checker::{ClassifierConfig, UrlClassifier};

const USAGE_ERROR: i32 = 3;

#[tokio::main]
async fn main() {
    let matches = Command::new("url-checker")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic URL safety checker")
        .long_about(
            "Classifies a URL as Safe, Risky or Unsafe using a blacklist, typo-squatting\n\
             similarity, SQL injection and XSS patterns in the query string, and finally\n\
             a live reachability probe.\n\n\
             Exit status: 0 Safe, 1 Risky, 2 Unsafe, 3 usage or configuration error.",
        )
        .arg(
            Arg::new("url")
                .value_name("URL")
                .help("URL to classify (http:// is assumed when no scheme is given)")
                .required_unless_present_any(["generate-config", "test-config"]),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/url-checker.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Skip the live reachability probe")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .help("Override the reachability probe timeout")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the verdict as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        if let Err(e) = ClassifierConfig::default().to_file(generate_path) {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(USAGE_ERROR);
        }
        println!("Default classifier lists and probe settings written to: {generate_path}");
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("/etc/url-checker.yaml");

    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(USAGE_ERROR);
        }
    };

    if let Some(timeout) = matches.get_one::<f64>("timeout") {
        config.probe.timeout_seconds = *timeout;
    }

    let summary = format!(
        "{} known domains, {} blacklisted domains, {} SQL injection patterns, {} XSS patterns",
        config.known_domains.len(),
        config.blacklisted_domains.len(),
        config.sqli_patterns.len(),
        config.xss_patterns.len()
    );

    let classifier = match UrlClassifier::new(config) {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {e:#}");
            process::exit(USAGE_ERROR);
        }
    };

    if matches.get_flag("test-config") {
        println!("✅ Configuration is valid: {summary}");
        return;
    }

    let Some(url) = matches.get_one::<String>("url") else {
        eprintln!("No URL given");
        process::exit(USAGE_ERROR);
    };

    log::debug!("Loaded {summary}");

    let verdict = if matches.get_flag("offline") {
        classifier.classify(url, None).await
    } else {
        classifier.check(url).await
    };

    if matches.get_flag("json") {
        match serde_json::to_string(&verdict) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing verdict: {e}");
                process::exit(USAGE_ERROR);
            }
        }
    } else {
        println!("URL:    {url}");
        println!("Status: {}", verdict.status);
        println!("Reason: {}", verdict.reason);
        println!("Score:  {}/100", verdict.score);
    }

    process::exit(verdict.status.exit_code());
}

/// An absent file means the built-in lists; an unreadable or invalid one is an error
fn load_config(path: &str) -> anyhow::Result<ClassifierConfig> {
    if !std::path::Path::new(path).exists() {
        log::debug!("No classifier config at '{path}', using built-in domain lists and patterns");
        return Ok(ClassifierConfig::default());
    }
    ClassifierConfig::from_file(path).with_context(|| format!("Invalid classifier config '{path}'"))
}
