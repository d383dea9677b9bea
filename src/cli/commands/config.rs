//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{OstrivError, OstrivResult};
use crate::ui::{self, UiContext};

/// Keys accepted by `config set`
const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "cms.url",
    "cms.default_url",
    "cms.graphql_path",
    "cms.timeout_secs",
    "cms.page_limit",
    "site.url",
    "cache.ttl_secs",
    "cache.degraded_ttl_secs",
    "search.quiet_period_ms",
    "search.max_suggestions",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> OstrivResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> OstrivResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> OstrivResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok_detail(&ctx, "Configuration initialized", &path.display().to_string());

    Ok(())
}

/// Set a key in the file's own configuration, leaving CLI overrides out
async fn set_value(manager: &ConfigManager, key: &str, value: &str) -> OstrivResult<()> {
    let ctx = UiContext::detect();
    let mut config = manager.load().await?;

    if let Err(e) = apply(&mut config, key, value) {
        if !VALID_KEYS.contains(&key) {
            ui::step_error_detail(&ctx, "Unknown config key", key);
            ui::remark(&ctx, "Valid keys:");
            VALID_KEYS.iter().for_each(|k| eprintln!("  {}", k));
        }
        return Err(e);
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply one dot-separated `key = value` to `config`
pub(crate) fn apply(config: &mut Config, key: &str, value: &str) -> OstrivResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => config.general.log_format = parse_log_format(value)?,

        ["cms", "url"] => config.cms.url = Some(value.to_string()).filter(|v| !v.trim().is_empty()),
        ["cms", "default_url"] => config.cms.default_url = value.to_string(),
        ["cms", "graphql_path"] => config.cms.graphql_path = value.to_string(),
        ["cms", "timeout_secs"] => config.cms.timeout_secs = parse_number(value)?,
        ["cms", "page_limit"] => config.cms.page_limit = parse_number(value)?,

        ["site", "url"] => config.site.url = value.to_string(),

        ["cache", "ttl_secs"] => config.cache.ttl_secs = parse_number(value)?,
        ["cache", "degraded_ttl_secs"] => config.cache.degraded_ttl_secs = parse_number(value)?,

        ["search", "quiet_period_ms"] => config.search.quiet_period_ms = parse_number(value)?,
        ["search", "max_suggestions"] => config.search.max_suggestions = parse_number(value)?,

        _ => return Err(OstrivError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}

fn parse_log_format(value: &str) -> OstrivResult<String> {
    match value {
        "text" | "json" => Ok(value.to_string()),
        _ => Err(OstrivError::User(format!(
            "Invalid log format: {}. Use text or json",
            value
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> OstrivResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| OstrivError::User(format!("Invalid number: {}", value)))
}
