//! Turns catalog data into card views and escaped HTML fragments.

use shared::domain::{Activity, Catalog};

pub const ACTIVITY_PLACEHOLDER_OPTION: &str = "-- Select an activity --";
pub const NO_PARTICIPANTS_TEXT: &str = "No participants yet";
pub const LOADING_TEXT: &str = "Loading activities...";
pub const LOAD_FAILURE_TEXT: &str = "Failed to load activities. Please try again later.";
pub const UNREGISTER_TITLE: &str = "Unregister participant";
const UNREGISTER_LABEL: &str = "\u{1f5d1}\u{fe0f}";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i128,
    pub participants: Vec<String>,
}

impl ActivityCard {
    pub fn from_activity(name: &str, activity: &Activity) -> Self {
        Self {
            name: name.to_string(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: activity.spots_left(),
            participants: activity.participants.clone(),
        }
    }

    /// Renders the card. `is_disabled` reports whether the removal control of a
    /// participant is currently disabled.
    pub fn render_html(&self, is_disabled: impl Fn(&str) -> bool) -> String {
        let name = escape_html(&self.name);
        let mut html = format!(
            "<div class=\"activity-card\">\
             <h4>{name}</h4>\
             <p>{description}</p>\
             <p><strong>Schedule:</strong> {schedule}</p>\
             <p class=\"availability\"><strong>Availability:</strong> {spots} spots left</p>\
             <div class=\"participants\"><h5>Participants</h5>\
             <div class=\"participants-list-container\">",
            description = escape_html(&self.description),
            schedule = escape_html(&self.schedule),
            spots = self.spots_left,
        );

        if self.participants.is_empty() {
            html.push_str(&format!(
                "<p class=\"participants-none\">{NO_PARTICIPANTS_TEXT}</p>"
            ));
        } else {
            html.push_str("<ul class=\"participants-list\">");
            for participant in &self.participants {
                let email = escape_html(participant);
                let disabled = if is_disabled(participant.as_str()) {
                    " disabled"
                } else {
                    ""
                };
                html.push_str(&format!(
                    "<li class=\"participant-item\">\
                     <span class=\"participant-email\">{email}</span>\
                     <button type=\"button\" class=\"unregister-btn\" title=\"{UNREGISTER_TITLE}\" \
                     data-activity=\"{name}\" data-email=\"{email}\"{disabled}>{UNREGISTER_LABEL}</button>\
                     </li>"
                ));
            }
            html.push_str("</ul>");
        }

        html.push_str("</div></div></div>");
        html
    }
}

pub fn cards_from_catalog(catalog: &Catalog) -> Vec<ActivityCard> {
    catalog
        .iter()
        .map(|(name, activity)| ActivityCard::from_activity(name, activity))
        .collect()
}

/// Options of the activity select: the empty placeholder, then one per name.
pub fn render_activity_options(names: &[String], selected: &str) -> String {
    let mut html = format!("<option value=\"\">{ACTIVITY_PLACEHOLDER_OPTION}</option>");
    for name in names {
        let escaped = escape_html(name);
        let selected = if !selected.is_empty() && name == selected {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{escaped}\"{selected}>{escaped}</option>"
        ));
    }
    html
}
