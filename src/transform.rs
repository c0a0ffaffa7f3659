//! Alert → MessageCard transformation.
//!
//! Pure and deterministic: the same alert always yields an equal card.

use crate::alert::{AlertContext, AlertEssentials, AlertPayload};
use crate::card::{MessageCard, MessageFact, MessageSection};

/// The only monitor condition rendered as an active alert. Matched case-sensitively.
pub const FIRED_CONDITION: &str = "Fired";

pub const FIRED_IMAGE: &str = "https://adaptivecards.io/content/cats/1.png";
pub const DEFAULT_IMAGE: &str = "https://adaptivecards.io/content/cats/3.png";

const FIRED_COLOUR: &str = "red";
const DEFAULT_COLOUR: &str = "green";

/// A decoded payload is missing a substructure the card needs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("alert payload has no `data` object")]
    MissingData,
    #[error("alert payload has no `data.essentials` object")]
    MissingEssentials,
    #[error("alert payload has no `data.alertContext` object")]
    MissingAlertContext,
}

/// Map an alert to a single-section card.
pub fn to_message_card(alert: &AlertPayload) -> Result<MessageCard, TransformError> {
    let data = alert.data.as_ref().ok_or(TransformError::MissingData)?;
    let essentials = data
        .essentials
        .as_ref()
        .ok_or(TransformError::MissingEssentials)?;
    let context = data
        .alert_context
        .as_ref()
        .ok_or(TransformError::MissingAlertContext)?;

    let section = MessageSection {
        activity_title: essentials.alert_rule.clone(),
        activity_subtitle: essentials.description.clone(),
        activity_text: activity_text(essentials),
        activity_image: condition_image(&essentials.monitor_condition).to_string(),
        markdown: true,
        facts: context_facts(context),
    };

    Ok(MessageCard::new(essentials.alert_rule.clone(), vec![section]))
}

/// Facts in fixed order; absent fields are skipped.
///
/// `IncludedSearchResults` is never rendered.
pub fn context_facts(ctx: &AlertContext) -> Vec<MessageFact> {
    [
        fact(
            "Link To Search Results",
            ctx.link_to_filtered_search_results_ui.as_ref(),
            |v| format!("[Link]({v})"),
        ),
        fact(
            "Search Start Time - UTC",
            ctx.search_interval_start_time_utc.as_ref(),
            ToString::to_string,
        ),
        fact(
            "Search End Time - UTC",
            ctx.search_interval_end_time_utc.as_ref(),
            ToString::to_string,
        ),
        fact("Query Executed", ctx.search_query.as_ref(), ToString::to_string),
        fact(
            "Log Analytics Workspace ID",
            ctx.workspace_id.as_ref(),
            ToString::to_string,
        ),
        fact("Query Result Count", ctx.result_count.as_ref(), ToString::to_string),
        fact("Threshold", ctx.threshold.as_ref(), ToString::to_string),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn fact<T>(
    label: &str,
    value: Option<&T>,
    format: impl FnOnce(&T) -> String,
) -> Option<MessageFact> {
    value.map(|v| MessageFact::new(label, format(v)))
}

fn is_fired(condition: &str) -> bool {
    condition == FIRED_CONDITION
}

pub fn condition_image(condition: &str) -> &'static str {
    if is_fired(condition) {
        FIRED_IMAGE
    } else {
        DEFAULT_IMAGE
    }
}

pub fn condition_colour(condition: &str) -> &'static str {
    if is_fired(condition) {
        FIRED_COLOUR
    } else {
        DEFAULT_COLOUR
    }
}

fn activity_text(essentials: &AlertEssentials) -> String {
    format!(
        "Alert <em>{}</em> has been {}",
        essentials.alert_rule,
        strong(
            &essentials.monitor_condition,
            condition_colour(&essentials.monitor_condition)
        )
    )
}

fn strong(text: &str, colour: &str) -> String {
    format!("<strong style=\"color: {colour}\">{text}</strong>")
}
