//! The page handles the board drives, and an in-memory HTML rendition of them.

use std::collections::HashSet;

use crate::{
    events::UiMessage,
    render::{self, escape_html, ActivityCard, LOADING_TEXT},
};

/// Values of the signup form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

/// UI handles owned by one board: the activity list, the activity select,
/// the signup form and the message area.
pub trait BoardSurface: Send + 'static {
    /// Replaces every rendered card. Rebuilt removal controls start enabled.
    fn show_catalog(&mut self, cards: Vec<ActivityCard>);
    fn show_load_failure(&mut self, text: &str);
    fn set_activity_options(&mut self, names: Vec<String>);
    fn set_remove_enabled(&mut self, activity: &str, participant: &str, enabled: bool);
    fn signup_form(&self) -> SignupForm;
    fn reset_form(&mut self);
    /// Sets text and styling and reveals the message area.
    fn show_message(&mut self, message: UiMessage);
    fn hide_message(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivitiesArea {
    Loading,
    Cards(Vec<ActivityCard>),
    Failure(String),
}

#[derive(Debug, Clone)]
pub struct HtmlSurface {
    area: ActivitiesArea,
    options: Vec<String>,
    disabled: HashSet<(String, String)>,
    form: SignupForm,
    message: Option<UiMessage>,
    message_visible: bool,
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self {
            area: ActivitiesArea::Loading,
            options: Vec::new(),
            disabled: HashSet::new(),
            form: SignupForm::default(),
            message: None,
            message_visible: false,
        }
    }
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> &ActivitiesArea {
        &self.area
    }

    pub fn cards(&self) -> &[ActivityCard] {
        match &self.area {
            ActivitiesArea::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn activity_options(&self) -> &[String] {
        &self.options
    }

    pub fn fill_form(&mut self, email: impl Into<String>, activity: impl Into<String>) {
        self.form = SignupForm {
            email: email.into(),
            activity: activity.into(),
        };
    }

    pub fn is_remove_enabled(&self, activity: &str, participant: &str) -> bool {
        !self
            .disabled
            .contains(&(activity.to_string(), participant.to_string()))
    }

    pub fn disabled_controls(&self) -> usize {
        self.disabled.len()
    }

    pub fn message(&self) -> Option<&UiMessage> {
        self.message.as_ref()
    }

    pub fn is_message_visible(&self) -> bool {
        self.message_visible
    }

    pub fn activities_list_html(&self) -> String {
        let inner = match &self.area {
            ActivitiesArea::Loading => format!("<p>{LOADING_TEXT}</p>"),
            ActivitiesArea::Failure(text) => format!("<p>{}</p>", escape_html(text)),
            ActivitiesArea::Cards(cards) => cards
                .iter()
                .map(|card| {
                    card.render_html(|participant| {
                        !self.is_remove_enabled(&card.name, participant)
                    })
                })
                .collect(),
        };
        format!("<div id=\"activities-list\">{inner}</div>")
    }

    pub fn activity_select_html(&self) -> String {
        format!(
            "<select id=\"activity\" required>{}</select>",
            render::render_activity_options(&self.options, &self.form.activity)
        )
    }

    pub fn message_html(&self) -> String {
        let mut classes: Vec<&str> = Vec::new();
        if let Some(message) = &self.message {
            classes.push(message.kind.css_class());
        }
        if !self.message_visible {
            classes.push("hidden");
        }
        let text = self
            .message
            .as_ref()
            .map(|message| escape_html(&message.text))
            .unwrap_or_default();
        format!(
            "<div id=\"message\" class=\"{}\">{text}</div>",
            classes.join(" ")
        )
    }

    pub fn document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head><meta charset=\"UTF-8\"><title>Activity Board</title></head>\n\
             <body>\n\
             <section id=\"activities-container\"><h3>Available Activities</h3>{activities}</section>\n\
             <section id=\"signup-container\"><h3>Sign Up for an Activity</h3>\n\
             <form id=\"signup-form\">\
             <div class=\"form-group\"><label for=\"email\">Email:</label>\
             <input type=\"email\" id=\"email\" required value=\"{email}\"></div>\
             <div class=\"form-group\"><label for=\"activity\">Select Activity:</label>{select}</div>\
             <button type=\"submit\">Sign Up</button></form>\n\
             {message}\n\
             </section>\n\
             </body>\n\
             </html>\n",
            activities = self.activities_list_html(),
            email = escape_html(&self.form.email),
            select = self.activity_select_html(),
            message = self.message_html(),
        )
    }
}

impl BoardSurface for HtmlSurface {
    fn show_catalog(&mut self, cards: Vec<ActivityCard>) {
        self.disabled.clear();
        self.area = ActivitiesArea::Cards(cards);
    }

    fn show_load_failure(&mut self, text: &str) {
        self.disabled.clear();
        self.area = ActivitiesArea::Failure(text.to_string());
    }

    fn set_activity_options(&mut self, names: Vec<String>) {
        // Rebuilt options drop the previous selection.
        self.form.activity.clear();
        self.options = names;
    }

    fn set_remove_enabled(&mut self, activity: &str, participant: &str, enabled: bool) {
        let key = (activity.to_string(), participant.to_string());
        if enabled {
            self.disabled.remove(&key);
        } else {
            self.disabled.insert(key);
        }
    }

    fn signup_form(&self) -> SignupForm {
        self.form.clone()
    }

    fn reset_form(&mut self) {
        self.form = SignupForm::default();
    }

    fn show_message(&mut self, message: UiMessage) {
        self.message = Some(message);
        self.message_visible = true;
    }

    fn hide_message(&mut self) {
        self.message_visible = false;
    }
}
