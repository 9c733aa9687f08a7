//! Nutrilog MCP Server Implementation
//!
//! Exposes the diary tools over MCP.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::models::{FoodEntryUpdate, NutrientTargets, NutrientTotals};
use crate::tools::days;
use crate::tools::entries;
use crate::tools::status::{StatusTracker, DIARY_INSTRUCTIONS};
use crate::tools::targets;

/// Nutrilog MCP Service
#[derive(Clone)]
pub struct NutrilogService {
    status_tracker: Arc<StatusTracker>,
    database: Database,
    tool_router: ToolRouter<NutrilogService>,
}

impl NutrilogService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(database_path)),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn not_found(what: &str, key: serde_json::Value) -> Result<CallToolResult, McpError> {
    json_result(&serde_json::json!({ "error": format!("{} not found", what), "key": key }))
}

// ============================================================================
// Food Entry Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogFoodEntryParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// breakfast, lunch, dinner or snack
    pub meal_type: String,
    /// What was eaten
    pub name: String,
    /// Calories eaten (kcal)
    pub calories: f64,
    /// Protein eaten (g)
    #[serde(default)]
    pub protein: f64,
    /// Fat eaten (g)
    #[serde(default)]
    pub fat: f64,
    /// Carbohydrates eaten (g)
    #[serde(default)]
    pub carbs: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetFoodEntryParams {
    /// Food entry ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFoodEntryParams {
    /// Food entry ID
    pub id: i64,
    /// Move the entry to another meal: breakfast, lunch, dinner or snack
    pub meal_type: Option<String>,
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteFoodEntryParams {
    /// Food entry ID to delete
    pub id: i64,
}

// ============================================================================
// Day Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListDaysParams {
    /// Earliest date to include (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Latest date to include (YYYY-MM-DD)
    pub end_date: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 30 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateDayNotesParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// New notes (omit to clear)
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteDayParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Also delete the day's food entries (default false)
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetDayTargetsParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Calorie target (kcal); omit to use the default
    pub calories: Option<f64>,
    /// Protein target (g); omit to use the default
    pub protein: Option<f64>,
    /// Fat target (g); omit to use the default
    pub fat: Option<f64>,
    /// Carbohydrate target (g); omit to use the default
    pub carbs: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetDefaultTargetsParams {
    /// Daily calorie target (kcal); omit for none
    pub calories: Option<f64>,
    /// Daily protein target (g); omit for none
    pub protein: Option<f64>,
    /// Daily fat target (g); omit for none
    pub fat: Option<f64>,
    /// Daily carbohydrate target (g); omit for none
    pub carbs: Option<f64>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutrilogService {
    // --- Status ---

    #[tool(description = "Get the current status of the Nutrilog service including build info, database status, and process information")]
    fn nutrilog_status(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.status_tracker.get_status())
    }

    #[tool(description = "Get instructions for logging food and reading target percentages. Call this when starting a food logging session.")]
    fn diary_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(DIARY_INSTRUCTIONS)]))
    }

    // --- Food Entries ---

    #[tool(description = "Log a food entry with the calories and macros actually eaten. Automatically creates the day if needed.")]
    fn log_food_entry(&self, Parameters(p): Parameters<LogFoodEntryParams>) -> Result<CallToolResult, McpError> {
        let nutrients = NutrientTotals::new(p.calories, p.protein, p.fat, p.carbs);
        let result = entries::log_food_entry(&self.database, &p.date, &p.meal_type, &p.name, nutrients, p.notes)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get a food entry by ID")]
    fn get_food_entry(&self, Parameters(p): Parameters<GetFoodEntryParams>) -> Result<CallToolResult, McpError> {
        let result = entries::get_food_entry(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(entry) => json_result(&entry),
            None => not_found("Food entry", p.id.into()),
        }
    }

    #[tool(description = "Update a food entry. Only the fields provided are changed; day totals are recalculated.")]
    fn update_food_entry(&self, Parameters(p): Parameters<UpdateFoodEntryParams>) -> Result<CallToolResult, McpError> {
        let meal_type = p
            .meal_type
            .as_deref()
            .map(entries::parse_meal_type)
            .transpose()
            .map_err(|e| McpError::invalid_params(e, None))?;
        let data = FoodEntryUpdate {
            meal_type,
            name: p.name,
            calories: p.calories,
            protein: p.protein,
            fat: p.fat,
            carbs: p.carbs,
            notes: p.notes,
        };
        let result = entries::update_food_entry(&self.database, p.id, &data)
            .map_err(|e| McpError::invalid_params(e, None))?;
        match result {
            Some(entry) => json_result(&entry),
            None => not_found("Food entry", p.id.into()),
        }
    }

    #[tool(description = "Delete a food entry")]
    fn delete_food_entry(&self, Parameters(p): Parameters<DeleteFoodEntryParams>) -> Result<CallToolResult, McpError> {
        let deleted = entries::delete_food_entry(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&serde_json::json!({"success": deleted, "id": p.id}))
    }

    // --- Days ---

    #[tool(description = "Get a day's entries grouped by meal, meal and day totals, and percent of calorie and macro targets. Meal percentages always sum to the day percentage.")]
    fn get_day_summary(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = days::get_day_summary(&self.database, &p.date).map_err(|e| McpError::invalid_params(e, None))?;
        match result {
            Some(summary) => json_result(&summary),
            None => not_found("Day", p.date.into()),
        }
    }

    #[tool(description = "List days (newest first) with totals and calorie percent, with optional date range and pagination")]
    fn list_days(&self, Parameters(p): Parameters<ListDaysParams>) -> Result<CallToolResult, McpError> {
        let result = days::list_days(&self.database, p.start_date.as_deref(), p.end_date.as_deref(), p.limit, p.offset)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Update day notes")]
    fn update_day_notes(&self, Parameters(p): Parameters<UpdateDayNotesParams>) -> Result<CallToolResult, McpError> {
        let result = days::update_day_notes(&self.database, &p.date, p.notes).map_err(|e| McpError::invalid_params(e, None))?;
        match result {
            Some(summary) => json_result(&summary),
            None => not_found("Day", p.date.into()),
        }
    }

    #[tool(description = "Override the targets for one day. Omitted values fall back to the defaults; pass none to clear the override.")]
    fn set_day_targets(&self, Parameters(p): Parameters<SetDayTargetsParams>) -> Result<CallToolResult, McpError> {
        let overrides = NutrientTargets {
            calories: p.calories,
            protein: p.protein,
            fat: p.fat,
            carbs: p.carbs,
        };
        let result = days::set_day_targets(&self.database, &p.date, overrides).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete a day. Fails if the day has food entries unless force=true, which deletes them too.")]
    fn delete_day(&self, Parameters(p): Parameters<DeleteDayParams>) -> Result<CallToolResult, McpError> {
        let deleted = days::delete_day(&self.database, &p.date, p.force).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&serde_json::json!({"success": deleted, "date": p.date}))
    }

    #[tool(description = "Force recalculate cached nutrition totals for a day")]
    fn recalculate_day(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = days::recalculate_day(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Targets ---

    #[tool(description = "Get the default daily calorie and macro targets")]
    fn get_default_targets(&self) -> Result<CallToolResult, McpError> {
        let result = targets::get_default_targets(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Replace the default daily calorie and macro targets. Omitted values mean no target.")]
    fn set_default_targets(&self, Parameters(p): Parameters<SetDefaultTargetsParams>) -> Result<CallToolResult, McpError> {
        let defaults = NutrientTargets {
            calories: p.calories,
            protein: p.protein,
            fat: p.fat,
            carbs: p.carbs,
        };
        let result = targets::set_default_targets(&self.database, defaults).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutrilogService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrilog".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrilog".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrilog - food diary with calorie and macro targets. \
                 Call diary_instructions before logging food. \
                 Entries: log/get/update/delete_food_entry. \
                 Days: get_day_summary, list_days, update_day_notes, set_day_targets, delete_day, recalculate_day. \
                 Targets: get/set_default_targets. \
                 Status: nutrilog_status."
                    .into(),
            ),
        }
    }
}
