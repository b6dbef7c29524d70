//! Built-in catalog tools.
//!
//! | Tool | Arguments | Store operation |
//! |------|-----------|-----------------|
//! | `search_components` | `query`, `category?`, `limit?` | [`CatalogStore::search`] |
//! | `get_component_details` | `componentId` | [`CatalogStore::get_by_id`] |
//! | `list_components` | `category?`, `limit?` | [`CatalogStore::list_by_category`] |
//! | `get_install_command` | `componentId` | [`CatalogStore::get_by_id`] |
//! | `get_registry_stats` | none | [`CatalogStore::stats`] |
//! | `get_component_preview` | `componentId` | [`CatalogStore::get_by_id`] |
//! | `get_component_screenshot` | `componentId`, `theme?` | [`CatalogStore::get_by_id`] |
//!
//! An unknown `componentId` is answered with a successful "not found" text,
//! never an error.

use serde_json::{json, Value};

use origin_ui_core::CatalogStore;

use crate::error::RouterError;
use crate::render;
use crate::traits::{Arguments, Tool, ToolContext, ToolOutput};

/// Every built-in tool, in listing order.
pub fn builtins() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(SearchComponents),
        Box::new(GetComponentDetails),
        Box::new(ListComponents),
        Box::new(GetInstallCommand),
        Box::new(GetComponentPreview),
        Box::new(GetComponentScreenshot),
        Box::new(GetRegistryStats),
    ]
}

const THEMES: [&str; 3] = ["light", "dark", "both"];

fn component_id_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "componentId": {
                "type": "string",
                "description": "Component ID (e.g., 'comp-163')"
            }
        },
        "required": ["componentId"]
    })
}

/// `category` property; lists the loaded categories once there are any.
fn category_property(description: &str, catalog: &CatalogStore) -> Value {
    let mut prop = json!({ "type": "string", "description": description });
    if !catalog.categories().is_empty() {
        prop["enum"] = json!(catalog.categories());
    }
    prop
}

pub struct SearchComponents;

impl Tool for SearchComponents {
    fn name(&self) -> &str {
        "search_components"
    }

    fn description(&self) -> &str {
        "Search OriginUI components by name, category, or tags"
    }

    fn parameters_schema(&self, catalog: &CatalogStore) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query for component name, category, or tags"
                },
                "category": category_property(
                    "Filter by specific category (e.g., 'button', 'input', 'navbar')",
                    catalog,
                ),
                "limit": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Maximum number of results to return (default: 10)"
                }
            },
            "required": ["query"]
        })
    }

    fn execute(&self, args: &Arguments, ctx: &ToolContext) -> Result<ToolOutput, RouterError> {
        let query = args.required_str("query")?;
        let category = args.optional_str("category")?;
        let limit = args.optional_int("limit", ctx.config().tools.search_default_limit)?;

        let hits = ctx
            .catalog()
            .search(query, category, limit)
            .map_err(|e| RouterError::from_catalog(self.name(), e))?;

        Ok(ToolOutput::text(render::search_results(
            &hits,
            query,
            category,
            &ctx.config().tools.install_command,
        )))
    }
}

pub struct GetComponentDetails;

impl Tool for GetComponentDetails {
    fn name(&self) -> &str {
        "get_component_details"
    }

    fn description(&self) -> &str {
        "Get detailed information about a specific OriginUI component"
    }

    fn parameters_schema(&self, _catalog: &CatalogStore) -> Value {
        component_id_schema()
    }

    fn execute(&self, args: &Arguments, ctx: &ToolContext) -> Result<ToolOutput, RouterError> {
        let id = args.required_str("componentId")?;
        let text = match ctx.catalog().get_by_id(id) {
            Some(rec) => render::component_details(rec, &ctx.config().tools.install_command),
            None => render::not_found(id),
        };
        Ok(ToolOutput::text(text))
    }
}

pub struct ListComponents;

impl Tool for ListComponents {
    fn name(&self) -> &str {
        "list_components"
    }

    fn description(&self) -> &str {
        "List all available OriginUI components with basic information"
    }

    fn parameters_schema(&self, catalog: &CatalogStore) -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": category_property("Filter by category", catalog),
                "limit": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Maximum number of results to return (default: 50)"
                }
            }
        })
    }

    fn execute(&self, args: &Arguments, ctx: &ToolContext) -> Result<ToolOutput, RouterError> {
        let category = args.optional_str("category")?;
        let limit = args.optional_int("limit", ctx.config().tools.list_default_limit)?;

        let records = ctx
            .catalog()
            .list_by_category(category, limit)
            .map_err(|e| RouterError::from_catalog(self.name(), e))?;

        Ok(ToolOutput::text(render::component_list(
            &records, category, limit,
        )))
    }
}

pub struct GetInstallCommand;

impl Tool for GetInstallCommand {
    fn name(&self) -> &str {
        "get_install_command"
    }

    fn description(&self) -> &str {
        "Get the installation command for a specific component"
    }

    fn parameters_schema(&self, _catalog: &CatalogStore) -> Value {
        component_id_schema()
    }

    fn execute(&self, args: &Arguments, ctx: &ToolContext) -> Result<ToolOutput, RouterError> {
        let id = args.required_str("componentId")?;
        let text = match ctx.catalog().get_by_id(id) {
            Some(rec) => render::install_instructions(rec, &ctx.config().tools.install_command),
            None => render::not_found(id),
        };
        Ok(ToolOutput::text(text))
    }
}

pub struct GetRegistryStats;

impl Tool for GetRegistryStats {
    fn name(&self) -> &str {
        "get_registry_stats"
    }

    fn description(&self) -> &str {
        "Get comprehensive statistics about the OriginUI component registry"
    }

    fn takes_arguments(&self) -> bool {
        false
    }

    fn parameters_schema(&self, _catalog: &CatalogStore) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    fn execute(&self, _args: &Arguments, ctx: &ToolContext) -> Result<ToolOutput, RouterError> {
        let catalog = ctx.catalog();
        let stats = catalog.stats(ctx.config().tools.stats_top_categories);
        Ok(ToolOutput::text(render::registry_stats(
            &stats,
            catalog.info(),
            catalog.categories(),
            catalog.tags(),
        )))
    }
}

pub struct GetComponentPreview;

impl Tool for GetComponentPreview {
    fn name(&self) -> &str {
        "get_component_preview"
    }

    fn description(&self) -> &str {
        "Get component preview information including styling and usage"
    }

    fn parameters_schema(&self, _catalog: &CatalogStore) -> Value {
        component_id_schema()
    }

    fn execute(&self, args: &Arguments, ctx: &ToolContext) -> Result<ToolOutput, RouterError> {
        let id = args.required_str("componentId")?;
        let text = match ctx.catalog().get_by_id(id) {
            Some(rec) => render::component_preview(rec, &ctx.config().tools.install_command),
            None => render::not_found(id),
        };
        Ok(ToolOutput::text(text))
    }
}

pub struct GetComponentScreenshot;

impl Tool for GetComponentScreenshot {
    fn name(&self) -> &str {
        "get_component_screenshot"
    }

    fn description(&self) -> &str {
        "Get component screenshot/visual preview to help assess if it fits the project"
    }

    fn parameters_schema(&self, _catalog: &CatalogStore) -> Value {
        json!({
            "type": "object",
            "properties": {
                "componentId": {
                    "type": "string",
                    "description": "Component ID (e.g., 'comp-163')"
                },
                "theme": {
                    "type": "string",
                    "description": "Theme preference for screenshot",
                    "enum": THEMES,
                    "default": "both"
                }
            },
            "required": ["componentId"]
        })
    }

    fn execute(&self, args: &Arguments, ctx: &ToolContext) -> Result<ToolOutput, RouterError> {
        let id = args.required_str("componentId")?;
        let theme = args.optional_choice("theme", &THEMES, "both")?;

        let Some(rec) = ctx.catalog().get_by_id(id) else {
            return Ok(ToolOutput::text(render::not_found(id)));
        };

        let output = ToolOutput::text(render::screenshot_summary(
            rec,
            theme,
            &ctx.config().tools.site_url,
        ));
        Ok(match &rec.preview_url {
            Some(url) => output.with_image(url.clone()),
            None => output,
        })
    }
}
