//! One-shot CLI commands.
//!
//! Each command loads the registry, routes a single call through the
//! [`QueryRouter`] exactly as an MCP client would, and prints the text
//! blocks to stdout.

use anyhow::{Context, Result};
use origin_ui_core::MatchStrategy;
use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::router::QueryRouter;
use crate::sources::{CatalogSource, RegistryFileSource};
use crate::traits::{ContentBlock, ToolOutput};

/// A ready router over the configured registry file.
pub fn load_router(config: &Config) -> Result<QueryRouter> {
    let source = RegistryFileSource::new(config.registry.candidates());
    let router = QueryRouter::new(config.clone());
    router
        .initialize(&source)
        .with_context(|| "failed to load the component registry")?;
    Ok(router)
}

fn object(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn print_output(output: &ToolOutput) {
    for block in &output.content {
        match block {
            ContentBlock::Text { text } => println!("{}", text),
            ContentBlock::Image { url } => println!("Image: {}", url),
        }
    }
}

fn call_and_print(router: &QueryRouter, tool: &str, args: Value) -> Result<()> {
    let output = router.call(tool, object(args))?;
    print_output(&output);
    Ok(())
}

pub fn run_search(
    config: &Config,
    query: &str,
    category: Option<&str>,
    limit: Option<i64>,
    explain: bool,
) -> Result<()> {
    let router = load_router(config)?;

    if !explain {
        let mut args = json!({ "query": query });
        if let Some(cat) = category {
            args["category"] = json!(cat);
        }
        if let Some(limit) = limit {
            args["limit"] = json!(limit);
        }
        return call_and_print(&router, "search_components", args);
    }

    let snapshot = router.catalog().snapshot();
    let limit = limit.unwrap_or(config.tools.search_default_limit);
    let hits = snapshot.search(query, category, limit)?;

    if hits.is_empty() {
        println!("No components found matching \"{}\"", query);
        return Ok(());
    }
    if hits.iter().any(|h| h.strategy == MatchStrategy::Category) {
        if let Some(resolved) = snapshot.resolve_category(query) {
            println!("query resolves to category: {}", resolved);
        }
    }
    for (i, hit) in hits.iter().enumerate() {
        println!(
            "{:>3}. [{:<11}] {} ({}) - {}",
            i + 1,
            hit.strategy.as_str(),
            hit.record.name,
            hit.record.id,
            hit.record.category
        );
    }
    Ok(())
}

pub fn run_get(config: &Config, id: &str) -> Result<()> {
    let router = load_router(config)?;
    call_and_print(&router, "get_component_details", json!({ "componentId": id }))
}

pub fn run_list(config: &Config, category: Option<&str>, limit: Option<i64>) -> Result<()> {
    let router = load_router(config)?;
    let mut args = json!({});
    if let Some(cat) = category {
        args["category"] = json!(cat);
    }
    if let Some(limit) = limit {
        args["limit"] = json!(limit);
    }
    call_and_print(&router, "list_components", args)
}

pub fn run_install(config: &Config, id: &str) -> Result<()> {
    let router = load_router(config)?;
    call_and_print(&router, "get_install_command", json!({ "componentId": id }))
}

pub fn run_stats(config: &Config) -> Result<()> {
    let router = load_router(config)?;
    let output = router.call("get_registry_stats", None)?;
    print_output(&output);
    Ok(())
}

/// Load the registry and report what was found, without serving.
pub fn run_check(config: &Config) -> Result<()> {
    let source = RegistryFileSource::new(config.registry.candidates());
    println!("Source:      {}", source.describe());

    let router = QueryRouter::new(config.clone());
    let summary = router
        .initialize(&source)
        .with_context(|| "registry check failed")?;

    let snapshot = router.catalog().snapshot();
    println!("Components:  {}", summary.components);
    println!("Categories:  {}", summary.categories);
    println!("Tags:        {}", summary.tags);
    if let Some(version) = &snapshot.info().version {
        println!("Version:     {}", version);
    }
    if let Some(updated) = &snapshot.info().last_updated {
        println!("Updated:     {}", updated);
    }
    println!("OK");
    Ok(())
}

/// List registered tools. Needs no registry.
pub fn run_tools(config: &Config) -> Result<()> {
    let router = QueryRouter::new(config.clone());
    let tools = router.describe_tools();
    println!("{} tools:", tools.len());
    for t in tools {
        println!("  {:<26} {}", t.name, t.description);
    }
    Ok(())
}
