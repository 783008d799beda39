//! Client-side signup form validation.
//!
//! A cosmetic pre-submission gate only; the server re-validates everything.
//! Username feedback is live (every input event), the profile-picture
//! filename is suggested on a successful blur, and submission is blocked
//! while any tracked field is empty or the username breaks the pattern.
//! When everything passes, a snapshot of the trimmed values is cached to
//! local storage best-effort and the native form submission proceeds.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use std::rc::Rc;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement};

use crate::consts;
use crate::dom;
use crate::storage::{BrowserStorage, KvStore};

/// 3 to 24 characters: letters, digits, period, underscore, hyphen.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9_.-]{3,24}$").expect("username pattern is valid"));

pub const REQUIRED_MSG: &str = "Required";
pub const USERNAME_RULE_MSG: &str = "3\u{2013}24 chars: letters, numbers, . _ -";

/// The tracked signup fields, in annotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Username,
    School,
    Bio,
    ProfilePic,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Username,
        Field::School,
        Field::Bio,
        Field::ProfilePic,
    ];

    /// The `name` attribute of the corresponding form control.
    #[must_use]
    pub fn input_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Username => "username",
            Field::School => "school",
            Field::Bio => "bio",
            Field::ProfilePic => "profile_pic",
        }
    }
}

/// Raw field values as read from the form controls.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub name: String,
    pub username: String,
    pub school: String,
    pub bio: String,
    pub profile_pic: String,
}

impl FormValues {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Username => &self.username,
            Field::School => &self.school,
            Field::Bio => &self.bio,
            Field::ProfilePic => &self.profile_pic,
        }
    }
}

/// One inline annotation for a failing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Whether the trimmed username satisfies the pattern.
#[must_use]
pub fn username_valid(username: &str) -> bool {
    USERNAME_RE.is_match(username.trim())
}

/// Live feedback for the username field: `None` when it passes.
#[must_use]
pub fn username_error(username: &str) -> Option<&'static str> {
    if username_valid(username) {
        None
    } else {
        Some(USERNAME_RULE_MSG)
    }
}

/// Validate every tracked field for submission.
///
/// Each failing field is reported (not just the first); an empty field is
/// `Required`, and a non-empty username that breaks the pattern gets the
/// pattern message instead.
#[must_use]
pub fn validate(values: &FormValues) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for field in Field::ALL {
        if values.get(field).trim().is_empty() {
            errors.push(FieldError { field, message: REQUIRED_MSG });
        }
    }
    let username = values.username.trim();
    if !username.is_empty() && !username_valid(username) {
        errors.push(FieldError { field: Field::Username, message: USERNAME_RULE_MSG });
    }
    errors
}

/// Suggested profile-picture filename for a valid username.
#[must_use]
pub fn suggested_filename(username: &str) -> Option<String> {
    let username = username.trim();
    if username_valid(username) {
        Some(format!("{username}.jpg"))
    } else {
        None
    }
}

/// The suggestion to apply on username blur: only for a valid username and
/// only while the picture field is still empty. Never overwrites.
#[must_use]
pub fn fill_suggestion(username: &str, current_pic: &str) -> Option<String> {
    if current_pic.is_empty() {
        suggested_filename(username)
    } else {
        None
    }
}

/// Snapshot cached to local storage just before the native submit, for a
/// later page to read. Write-only from this crate's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub name: String,
    pub username: String,
    pub school: String,
    pub bio: String,
    pub profile_pic: String,
}

/// Build the snapshot from trimmed values; the picture path is derived from
/// the username, not from whatever the picture field holds.
#[must_use]
pub fn snapshot(values: &FormValues) -> CurrentUser {
    let username = values.username.trim().to_string();
    CurrentUser {
        name: values.name.trim().to_string(),
        school: values.school.trim().to_string(),
        bio: values.bio.trim().to_string(),
        profile_pic: format!("img/users/{username}.jpg"),
        username,
    }
}

/// Best-effort cache of the snapshot; serialization or storage failure is
/// silently swallowed.
pub fn cache_snapshot<S: KvStore>(store: &S, key: &str, user: &CurrentUser) {
    if let Ok(raw) = serde_json::to_string(user) {
        store.set(key, &raw);
    }
}

// ── Mount layer ─────────────────────────────────────────────────

/// Wire validation if this page has the signup form.
pub(crate) fn mount(doc: &Document) -> bool {
    let Some(form) = dom::query(doc, r#"form[action="/signup"]"#) else {
        return false;
    };

    let controls: Rc<Vec<(Field, Element)>> = Rc::new(
        Field::ALL
            .into_iter()
            .filter_map(|field| {
                let selector = match field {
                    Field::Bio => format!(r#"textarea[name="{}"]"#, field.input_name()),
                    _ => format!(r#"input[name="{}"]"#, field.input_name()),
                };
                let el = form.query_selector(&selector).ok().flatten()?;
                Some((field, el))
            })
            .collect(),
    );

    let username_el = control(&controls, Field::Username);
    let pic_el = control(&controls, Field::ProfilePic);

    if let Some(username_el) = username_el.clone() {
        {
            let doc = doc.clone();
            let username_el = username_el.clone();
            dom::on(&username_el.clone(), "input", move |_| {
                match username_error(&field_value(&username_el)) {
                    Some(msg) => show_error(&doc, &username_el, msg),
                    None => clear_error(&username_el),
                }
            });
        }

        if let Some(pic_el) = pic_el {
            let username_el = username_el.clone();
            dom::on(&username_el.clone(), "blur", move |_| {
                if let Some(suggested) =
                    fill_suggestion(&field_value(&username_el), &field_value(&pic_el))
                {
                    set_field_value(&pic_el, &suggested);
                }
            });
        }
    }

    {
        let doc = doc.clone();
        let controls = Rc::clone(&controls);
        dom::on(&form, "submit", move |ev| {
            let values = collect_values(&controls);
            let errors = validate(&values);
            if errors.is_empty() {
                cache_snapshot(&BrowserStorage, consts::CURRENT_USER_KEY, &snapshot(&values));
                return; // let the native submission proceed
            }
            ev.prevent_default();
            for error in errors {
                if let Some(el) = control(&controls, error.field) {
                    show_error(&doc, &el, error.message);
                }
            }
        });
    }

    true
}

fn control(controls: &[(Field, Element)], field: Field) -> Option<Element> {
    controls
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, el)| el.clone())
}

fn collect_values(controls: &[(Field, Element)]) -> FormValues {
    let mut values = FormValues::default();
    for (field, el) in controls {
        let value = field_value(el);
        match field {
            Field::Name => values.name = value,
            Field::Username => values.username = value,
            Field::School => values.school = value,
            Field::Bio => values.bio = value,
            Field::ProfilePic => values.profile_pic = value,
        }
    }
    values
}

fn field_value(el: &Element) -> String {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn set_field_value(el: &Element, value: &str) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

/// Upsert the inline annotation next to a failing field: mark the field,
/// then create the `<em>` sibling once and update its text in place after.
fn show_error(doc: &Document, el: &Element, msg: &str) {
    let _ = el.class_list().add_1("error");
    let _ = el.set_attribute("aria-invalid", "true");

    if let Some(em) = error_sibling(el) {
        em.set_text_content(Some(msg));
        return;
    }
    let Ok(em) = doc.create_element("em") else {
        return;
    };
    if let Some(html) = em.dyn_ref::<web_sys::HtmlElement>() {
        let style = html.style();
        let _ = style.set_property("color", "#ff6a00");
        let _ = style.set_property("font-style", "normal");
        let _ = style.set_property("font-size", "12px");
    }
    em.set_text_content(Some(msg));
    if let Some(parent) = el.parent_element() {
        let _ = parent.append_child(&em);
    }
}

/// Remove the annotation when the field transitions back to valid.
fn clear_error(el: &Element) {
    let _ = el.class_list().remove_1("error");
    let _ = el.remove_attribute("aria-invalid");
    if let Some(em) = error_sibling(el) {
        em.remove();
    }
}

fn error_sibling(el: &Element) -> Option<Element> {
    el.next_element_sibling().filter(|s| s.tag_name() == "EM")
}
