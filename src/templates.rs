//! Standard markup for the contact wizard

use crate::dom::{el, Document, ElementBuilder, ElementId};
use crate::form::scan::{
    CARD_CLASS, ERROR_CLASS, FLOATING_CLASS, GLOBAL_ERROR_CLASS, GROUP_CLASS, MULTI_STEP_ATTR,
    NEXT_ATTR, PREV_ATTR, PROGRESS_CLASS, PROGRESS_LINE_CLASS, PROGRESS_STEP_CLASS,
    RADIO_GROUP_CLASS, RESET_ATTR, STEP_ATTR, STEP_CLASS, SUCCESS_CLASS,
};

/// Services offered on step 2, as `(value, label)`
pub const SERVICES: [(&str, &str); 3] = [
    ("strategy", "Brand strategy"),
    ("content", "Content production"),
    ("events", "Event communication"),
];

/// Labelled input wrapped in a floating-label group with its error slot
pub fn text_group(name: &str, label: &str, kind: &str, required: bool) -> ElementBuilder {
    let mut input = el("input")
        .attr("type", kind)
        .attr("name", name)
        .attr("aria-label", label);
    if required {
        input = input.attr("required", "");
    }
    el("div")
        .class(&format!("{GROUP_CLASS} {FLOATING_CLASS}"))
        .child(input)
        .child(el("label").text(label))
        .child(el("p").class(ERROR_CLASS))
}

fn nav(prev: bool, next: bool, submit: bool) -> ElementBuilder {
    let mut nav = el("div").class("form-nav");
    if prev {
        nav = nav.child(el("button").attr("type", "button").attr(PREV_ATTR, "").text("Back"));
    }
    if next {
        nav = nav.child(el("button").attr("type", "button").attr(NEXT_ATTR, "").text("Next"));
    }
    if submit {
        nav = nav.child(el("button").attr("type", "submit").text("Send"));
    }
    nav
}

fn step(index: usize, title: &str) -> ElementBuilder {
    el("div")
        .class(STEP_CLASS)
        .attr(STEP_ATTR, &index.to_string())
        .child(el("h3").text(title))
}

fn progress(count: usize) -> ElementBuilder {
    let mut bar = el("div").class(PROGRESS_CLASS);
    for i in 1..=count {
        bar = bar.child(el("span").class(PROGRESS_STEP_CLASS).text(&i.to_string()));
        if i < count {
            bar = bar.child(el("span").class(PROGRESS_LINE_CLASS));
        }
    }
    bar
}

/// Build the three-step contact form under the document root.
///
/// Step 1 asks for contact details, step 2 for one service, step 3 for a
/// message and consent. Returns the `form` element.
pub fn contact_form(doc: &mut Document) -> ElementId {
    let radios = SERVICES.iter().map(|(value, label)| {
        el("label")
            .class("form-radio")
            .child(
                el("input")
                    .attr("type", "radio")
                    .attr("name", "service")
                    .attr("aria-label", label)
                    .value(value),
            )
            .child(el("span").text(label))
    });

    let consent = el("input")
        .attr("type", "checkbox")
        .attr("name", "consent")
        .attr("required", "")
        .attr("aria-label", "I agree to be contacted about my request");

    let message = el("div")
        .class(&format!("{GROUP_CLASS} {FLOATING_CLASS}"))
        .child(
            el("textarea")
                .attr("name", "message")
                .attr("required", "")
                .attr("minlength", "10")
                .attr("aria-label", "Your message"),
        )
        .child(el("label").text("Your message"))
        .child(el("p").class(ERROR_CLASS));

    let form = el("form")
        .attr(MULTI_STEP_ATTR, "")
        .attr("novalidate", "")
        .child(
            step(1, "Your details")
                .child(text_group("name", "Full name", "text", true))
                .child(text_group("email", "Email", "email", true))
                .child(text_group("phone", "Phone", "tel", false))
                .child(nav(false, true, false)),
        )
        .child(
            step(2, "Your project")
                .child(
                    el("div")
                        .class(GROUP_CLASS)
                        .child(el("div").class(RADIO_GROUP_CLASS).children(radios))
                        .child(el("p").class(ERROR_CLASS)),
                )
                .child(nav(true, true, false)),
        )
        .child(
            step(3, "Your message")
                .child(message)
                .child(
                    el("div")
                        .class(GROUP_CLASS)
                        .child(consent)
                        .child(el("p").class(ERROR_CLASS)),
                )
                .child(nav(true, false, true)),
        )
        .child(
            el("div")
                .class("form-honeypot")
                .hidden(true)
                .child(
                    el("input")
                        .attr("type", "text")
                        .attr("name", "_gotcha")
                        .attr("tabindex", "-1")
                        .attr("autocomplete", "off"),
                ),
        )
        .child(el("p").class(GLOBAL_ERROR_CLASS).hidden(true))
        .child(
            el("div")
                .class(SUCCESS_CLASS)
                .hidden(true)
                .child(el("h3").text("Message sent"))
                .child(el("p").text("Thank you, we will get back to you shortly."))
                .child(
                    el("button")
                        .attr("type", "button")
                        .attr(RESET_ATTR, "")
                        .text("Send another message"),
                ),
        );

    let root = doc.root();
    let card = el("section")
        .class(CARD_CLASS)
        .child(progress(3))
        .build(doc, root);
    form.build(doc, card)
}
