//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{RelscoutError, RelscoutResult};
use crate::ui::{self, Status, UiContext};
use toml_edit::{value, DocumentMut, Item, Table};

/// Value type a settable key expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    Bool,
    Integer,
    String,
}

const KEYS: &[(&str, KeyKind)] = &[
    ("general.verbose", KeyKind::Bool),
    ("general.log_format", KeyKind::String),
    ("source.host", KeyKind::String),
    ("source.product", KeyKind::String),
    ("source.probe_platform", KeyKind::String),
    ("source.probe_timeout_secs", KeyKind::Integer),
    ("cache.dir", KeyKind::String),
    ("scan.max_major", KeyKind::Integer),
    ("scan.max_minor", KeyKind::Integer),
    ("scan.max_patch", KeyKind::Integer),
    ("scan.flush_every", KeyKind::Integer),
    ("scan.walk_start", KeyKind::String),
    ("scan.walk_max_steps", KeyKind::Integer),
    ("scan.walk_minor_ceiling", KeyKind::Integer),
    ("scan.walk_patch_ceiling", KeyKind::Integer),
    ("download.output_dir", KeyKind::String),
    ("download.timeout_secs", KeyKind::Integer),
    ("release.repo", KeyKind::String),
    ("release.tag_prefix", KeyKind::String),
];

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    manager: &ConfigManager,
) -> RelscoutResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> RelscoutResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> RelscoutResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step(
            &ctx,
            Status::Warn,
            &format!("Config already exists at {}", path.display()),
        );
        ui::remark(&ctx, "Use --force to overwrite");
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step(
        &ctx,
        Status::Ok,
        &format!("Configuration initialized at {}", path.display()),
    );
    Ok(())
}

async fn set_value(manager: &ConfigManager, key: &str, raw: &str) -> RelscoutResult<()> {
    let ctx = UiContext::detect();

    let existing = manager.read_raw().await?.unwrap_or_default();
    let updated = apply_setting(&existing, key, raw)?;
    manager.write_raw(&updated).await?;

    ui::step(&ctx, Status::Ok, &format!("Set {} = {}", key, raw));
    Ok(())
}

/// Set `key` in the TOML text, keeping comments and layout of everything else
fn apply_setting(document: &str, key: &str, raw: &str) -> RelscoutResult<String> {
    let kind = KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| RelscoutError::ConfigKey {
            key: key.to_string(),
            reason: format!(
                "unknown key. Valid keys: {}",
                KEYS.iter().map(|(k, _)| *k).collect::<Vec<_>>().join(", ")
            ),
        })?;

    let item = parse_item(key, kind, raw)?;
    let (section, field) = key.split_once('.').ok_or_else(|| RelscoutError::ConfigKey {
        key: key.to_string(),
        reason: "expected section.field".to_string(),
    })?;

    let mut doc: DocumentMut = document.parse()?;
    let table = doc
        .entry(section)
        .or_insert_with(|| Item::Table(Table::new()))
        .as_table_mut()
        .ok_or_else(|| RelscoutError::ConfigKey {
            key: key.to_string(),
            reason: format!("[{}] is not a table", section),
        })?;
    table[field] = item;

    Ok(doc.to_string())
}

fn parse_item(key: &str, kind: KeyKind, raw: &str) -> RelscoutResult<Item> {
    let invalid = |expected: &str| RelscoutError::ConfigKey {
        key: key.to_string(),
        reason: format!("expected {}, got '{}'", expected, raw),
    };

    match kind {
        KeyKind::Bool => match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(value(true)),
            "false" | "0" | "no" => Ok(value(false)),
            _ => Err(invalid("true/false")),
        },
        KeyKind::Integer => raw
            .parse::<u64>()
            .ok()
            .and_then(|n| i64::try_from(n).ok())
            .map(value)
            .ok_or_else(|| invalid("a non-negative integer up to i64::MAX")),
        KeyKind::String => Ok(value(raw)),
    }
}
