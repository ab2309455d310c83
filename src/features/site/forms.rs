//! Forms - Field Validation Feedback

use crate::app::context::PageContext;
use crate::constants::ERROR_COLOR;
use crate::dom::{Element, ElementId};
use crate::domain::validation::{FieldValidation, validate_value};

pub const FORM_GROUP_CLASS: &str = "form-group";
pub const FIELD_ERROR_CLASS: &str = "field-error";
pub const FOCUSED_CLASS: &str = "focused";

/// The form a field belongs to, if the element is a field inside one
pub fn owning_form(cx: &PageContext, field: ElementId) -> Option<ElementId> {
    let is_field = cx.document.element(field).is_some_and(Element::is_form_field);
    if !is_field {
        return None;
    }
    cx.document.closest_tag(field, "form")
}

/// Validate one field's current value; `translate` resolves message keys
pub fn check_field(
    cx: &PageContext,
    field: ElementId,
    translate: impl Fn(&str) -> String,
) -> FieldValidation {
    let Some(element) = cx.document.element(field) else {
        return FieldValidation::valid();
    };
    match validate_value(element.value(), element.field_type(), element.is_required()) {
        Ok(()) => FieldValidation::valid(),
        Err(e) => FieldValidation::invalid(translate(e.message_key())),
    }
}

/// Reflect a validation result on the field and its `.form-group`
///
/// Fields outside a form group get no feedback.
pub fn apply_feedback(cx: &mut PageContext, field: ElementId, validation: &FieldValidation) {
    let Some(group) = cx.document.closest_class(field, FORM_GROUP_CLASS) else {
        return;
    };

    for existing in cx
        .document
        .query_within(group, |e| e.has_class(FIELD_ERROR_CLASS))
    {
        cx.document.remove(existing);
    }

    let border = if validation.is_valid { "" } else { ERROR_COLOR };
    cx.document.set_style(field, "border-color", border);

    if !validation.is_valid && !validation.message.is_empty() {
        let error = cx
            .document
            .build("div")
            .class(FIELD_ERROR_CLASS)
            .text(&validation.message)
            .append_to(group);
        cx.document.set_style(error, "color", ERROR_COLOR);
    }
}

/// Required inputs, selects and textareas of a form
pub fn required_fields(cx: &PageContext, form: ElementId) -> Vec<ElementId> {
    cx.document
        .query_within(form, |e| e.is_form_field() && e.is_required())
}

pub fn submit_button(cx: &PageContext, form: ElementId) -> Option<ElementId> {
    cx.document
        .query_within(form, |e| e.tag() == "button" && e.attr("type") == Some("submit"))
        .into_iter()
        .next()
}

/// Floating label: focus marks the field's parent
pub fn mark_focused(cx: &mut PageContext, field: ElementId) {
    if let Some(parent) = cx.document.parent(field) {
        cx.document.add_class(parent, FOCUSED_CLASS);
    }
}

/// Floating label: blur unmarks the parent unless the field has a value
pub fn unmark_focused(cx: &mut PageContext, field: ElementId) {
    if !cx.document.value(field).is_empty() {
        return;
    }
    if let Some(parent) = cx.document.parent(field) {
        cx.document.remove_class(parent, FOCUSED_CLASS);
    }
}
