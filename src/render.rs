//! Human-readable rendering of catalog results.
//!
//! Every tool answers with markdown-flavoured text so that an assistant can
//! relay it verbatim. The same renderers back the CLI output.

use origin_ui_core::{CatalogStats, ComponentRecord, SearchHit, SnapshotInfo};

/// Shell command that installs `record` with the configured installer.
pub fn install_command(prefix: &str, record: &ComponentRecord) -> String {
    format!("{} {}", prefix.trim_end(), record.install_reference)
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Styling flags on one line, e.g. `tailwind · Dark Mode · Responsive`.
fn styling_line(record: &ComponentRecord) -> String {
    let mut line = record.styling.framework.clone();
    if record.styling.dark_mode {
        line.push_str(" · Dark Mode");
    }
    if record.styling.responsive {
        line.push_str(" · Responsive");
    }
    line
}

pub fn not_found(id: &str) -> String {
    format!(
        "Component \"{}\" not found in registry. Use search_components to find available components.",
        id
    )
}

pub fn search_results(
    hits: &[SearchHit<'_>],
    query: &str,
    category: Option<&str>,
    install_prefix: &str,
) -> String {
    if hits.is_empty() {
        return match category {
            Some(cat) => format!(
                "No components found matching \"{}\" in category \"{}\"",
                query, cat
            ),
            None => format!("No components found matching \"{}\"", query),
        };
    }

    let entries: Vec<String> = hits
        .iter()
        .map(|hit| {
            let rec = hit.record;
            format!(
                "**{}** ({})\nCategory: {}\nTags: {}\nDescription: {}\nStyling: {}\nInstall: `{}`\n",
                rec.name,
                rec.id,
                rec.category,
                rec.tags.join(", "),
                rec.description,
                styling_line(rec),
                install_command(install_prefix, rec),
            )
        })
        .collect();

    format!(
        "Found {} component(s):\n\n{}\nTip: use get_component_screenshot with any component ID to see a visual preview.",
        hits.len(),
        entries.join("\n")
    )
}

pub fn component_details(record: &ComponentRecord, install_prefix: &str) -> String {
    let meta = &record.metadata;
    format!(
        "# {name}\n\n\
         **ID:** {id}\n\
         **Category:** {category}\n\
         **Tags:** {tags}\n\n\
         ## Styling Information\n\
         **Framework:** {framework}\n\
         **Dark Mode Support:** {dark}\n\
         **Responsive Design:** {responsive}\n\
         **Customizable:** {customizable}\n\n\
         ## Dependencies\n\
         **External:** {deps}\n\
         **Registry:** {registry_deps}\n\n\
         ## Installation\n\
         ```bash\n{install}\n```\n\n\
         ## Description\n\
         {description}\n\n\
         ## Metadata\n\
         **Type:** {kind}\n\
         **Last Updated:** {updated}\n\
         **Verified:** {verified}\n\
         **Discovered From:** {from}",
        name = record.name,
        id = record.id,
        category = record.category,
        tags = record.tags.join(", "),
        framework = record.styling.framework,
        dark = yes_no(record.styling.dark_mode),
        responsive = yes_no(record.styling.responsive),
        customizable = yes_no(record.styling.customizable),
        deps = join_or_none(&record.dependencies),
        registry_deps = join_or_none(&record.registry_dependencies),
        install = install_command(install_prefix, record),
        description = record.description,
        kind = record.kind,
        updated = meta.last_updated,
        verified = yes_no(meta.verified),
        from = meta.discovered_from,
    )
}

pub fn component_list(records: &[&ComponentRecord], category: Option<&str>, limit: i64) -> String {
    let heading = match category {
        Some(cat) => format!("Available Components in \"{}\":", cat),
        None => "Available Components:".to_string(),
    };
    let lines: Vec<String> = records
        .iter()
        .enumerate()
        .map(|(i, rec)| format!("{}. **{}** ({}) - {}", i + 1, rec.name, rec.id, rec.category))
        .collect();

    format!(
        "{}\n\n{}\n\nTotal: {} components (showing first {})",
        heading,
        lines.join("\n"),
        records.len(),
        limit
    )
}

pub fn install_instructions(record: &ComponentRecord, install_prefix: &str) -> String {
    format!(
        "Installation command for **{}**:\n\n```bash\n{}\n```\n\nThis will install the component and its dependencies into your project.",
        record.name,
        install_command(install_prefix, record)
    )
}

/// `2025-03-01T00:00:00.000Z` → `2025-03-01`; anything unparseable is shown as-is.
fn format_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn registry_stats(
    stats: &CatalogStats,
    info: &SnapshotInfo,
    categories: &[String],
    tags: &[String],
) -> String {
    let top: Vec<String> = stats
        .top_categories
        .iter()
        .map(|(cat, count)| format!("  {}: {} components", cat, count))
        .collect();

    format!(
        "# OriginUI Component Registry Stats\n\n\
         **Total Components:** {}\n\
         **Categories:** {}\n\
         **Tags:** {}\n\
         **Last Updated:** {}\n\
         **Registry Version:** {}\n\n\
         ## Top Categories:\n{}\n\n\
         ## Available Categories:\n{}\n\n\
         ## All Tags:\n{}",
        stats.total,
        stats.category_count,
        stats.tag_count,
        info.last_updated
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| "unknown".to_string()),
        info.version.as_deref().unwrap_or("unknown"),
        top.join("\n"),
        categories.join(", "),
        tags.join(", "),
    )
}

/// PascalCase import name derived from the display name.
fn import_name(record: &ComponentRecord) -> String {
    let name: String = record
        .name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    if name.chars().next().is_some_and(|c| c.is_alphabetic()) {
        name
    } else {
        format!("Component{}", name)
    }
}

pub fn component_preview(record: &ComponentRecord, install_prefix: &str) -> String {
    let import = import_name(record);
    let mut styling = vec![format!("- Built with **{}**", record.styling.framework)];
    if record.styling.dark_mode {
        styling.push("- Supports **dark/light mode**".to_string());
    }
    if record.styling.responsive {
        styling.push("- Responsive design".to_string());
    }
    if record.styling.customizable {
        styling.push("- Customizable through props and class names".to_string());
    }

    format!(
        "# {name} Preview\n\n\
         {description}\n\n\
         ## Styling\n{styling}\n\n\
         ## Dependencies\n\
         **External:** {deps}\n\
         **Registry:** {registry_deps}\n\n\
         ## Usage Example\n\
         ```tsx\n\
         import {{ {import} }} from \"@/components/ui/{id}\";\n\n\
         export default function Example() {{\n  return <{import} />;\n}}\n\
         ```\n\n\
         ## Installation\n\
         ```bash\n{install}\n```",
        name = record.name,
        description = record.description,
        styling = styling.join("\n"),
        deps = join_or_none(&record.dependencies),
        registry_deps = join_or_none(&record.registry_dependencies),
        import = import,
        id = record.id,
        install = install_command(install_prefix, record),
    )
}

pub fn screenshot_summary(record: &ComponentRecord, theme: &str, site_url: &str) -> String {
    match &record.preview_url {
        Some(url) => format!(
            "Preview of **{}** ({}), theme: {}\n\nImage: {}",
            record.name, record.id, theme, url
        ),
        None => format!(
            "No screenshot is stored for **{}** ({}). Visit {} to see the component live, or use get_component_details for its full description.",
            record.name, record.id, site_url
        ),
    }
}
