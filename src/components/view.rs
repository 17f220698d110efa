use serde::Serialize;

use crate::formatting::interpolate;
use crate::models::{AlertSetting, Channel, FormInput, Schedule, ScheduleType, User};

/// A run of inline text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "style", content = "text", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
}

/// What a button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Proceed,
    Cancel,
    Submit,
    OpenDelete,
    ConfirmDelete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadioOption {
    pub name: String,
    pub value: bool,
}

/// Render output of a component, drawn by whatever front end hosts the modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Section {
        class: String,
        children: Vec<Element>,
    },
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        content: Vec<Inline>,
    },
    Image {
        src: String,
    },
    Icon {
        name: String,
        size: u32,
    },
    Button {
        label: String,
        action: Action,
        primary: bool,
        danger: bool,
    },
    Radio {
        setting: AlertSetting,
        value: Option<bool>,
        options: Vec<RadioOption>,
    },
    SchedulePicker {
        schedule: Schedule,
        schedule_options: Vec<ScheduleType>,
        text_before_interval: String,
        description: String,
    },
    ChannelEditor {
        channels: Vec<Channel>,
        form_input: FormInput,
        user: User,
        user_list: Vec<User>,
        hide_schedule_picker: bool,
        email_recipient_text: String,
    },
    ConfirmDialog {
        object_type: String,
        title: String,
        confirm_items: Vec<Vec<Inline>>,
    },
    Tip {
        icon: String,
        content: Vec<Inline>,
    },
    Loading {
        label: String,
    },
    ErrorNotice {
        message: String,
    },
}

impl Element {
    pub fn section(class: &str, children: Vec<Element>) -> Self {
        Element::Section {
            class: class.to_string(),
            children,
        }
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Element::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(content: Vec<Inline>) -> Self {
        Element::Paragraph { content }
    }

    pub fn button(label: impl Into<String>, action: Action) -> Self {
        Element::Button {
            label: label.into(),
            action,
            primary: false,
            danger: false,
        }
    }

    pub fn primary_button(label: impl Into<String>, action: Action) -> Self {
        Element::Button {
            label: label.into(),
            action,
            primary: true,
            danger: false,
        }
    }

    /// Depth-first walk over this element and its descendants.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        visit(self);
        if let Element::Section { children, .. } = self {
            for child in children {
                child.walk(visit);
            }
        }
    }

    pub fn find_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |e| {
            if predicate(e) {
                found.push(e);
            }
        });
        found
    }
}

/// Plain text of a run sequence, markup dropped.
pub fn plain_text(content: &[Inline]) -> String {
    content
        .iter()
        .map(|run| match run {
            Inline::Text(t) | Inline::Strong(t) | Inline::Emphasis(t) => t.as_str(),
        })
        .collect()
}

/// Splits a translated template into styled runs, then fills placeholders.
///
/// `**bold**` becomes [`Inline::Strong`] and `_word_` becomes [`Inline::Emphasis`].
/// Placeholders are substituted after the markup is parsed so values containing
/// `*` or `_` stay literal.
pub fn rich(template: &str, args: &[(&str, String)]) -> Vec<Inline> {
    let mut runs = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while cursor < template.len() {
        let rest = &template[cursor..];
        let strong = rest.find("**");
        let emphasis = rest.find('_');
        let (offset, marker, is_strong) = match (strong, emphasis) {
            (Some(s), Some(e)) if e < s => (e, "_", false),
            (Some(s), _) => (s, "**", true),
            (None, Some(e)) => (e, "_", false),
            (None, None) => break,
        };

        let start = cursor + offset;
        let inner_start = start + marker.len();
        let Some(len) = template[inner_start..].find(marker) else {
            // Unpaired marker stays literal.
            cursor = inner_start;
            continue;
        };

        if start > text_start {
            runs.push(Inline::Text(interpolate(&template[text_start..start], args)));
        }
        let inner = interpolate(&template[inner_start..inner_start + len], args);
        runs.push(if is_strong {
            Inline::Strong(inner)
        } else {
            Inline::Emphasis(inner)
        });
        cursor = inner_start + len + marker.len();
        text_start = cursor;
    }

    if text_start < template.len() {
        runs.push(Inline::Text(interpolate(&template[text_start..], args)));
    }
    runs
}
