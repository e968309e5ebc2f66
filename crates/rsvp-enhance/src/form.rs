//! RSVP form enhancer

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ValidationError;
use crate::validation::{validate, Field};

const SPINNER_HTML: &str = "<span class=\"spinner\"></span>";

/// Placeholder given to labelled inputs so `:placeholder-shown` can drive the
/// floating label.
pub const FLOATING_PLACEHOLDER: &str = " ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum FieldStatus {
    Untouched,
    Error(String),
    Success,
}

/// Raw values of the form inputs at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SubmitOutcome {
    /// Submission stopped; `focus` is the first failing field on the page.
    Blocked {
        errors: Vec<ValidationError>,
        focus: Field,
    },
    /// Submission proceeds; the submit button is disabled and shows
    /// `button_html`.
    Accepted { button_html: Option<String> },
}

#[derive(Debug, Clone)]
pub struct FormEnhancer {
    /// Inputs present, in document order
    fields: Vec<Field>,
    submit_label: Option<String>,
    /// Names of labelled inputs that need [`FLOATING_PLACEHOLDER`]
    floating_labels: Vec<String>,
    statuses: HashMap<Field, FieldStatus>,
    submitting: bool,
}

impl FormEnhancer {
    /// Bind to the POST form in `fragment`, if there is one.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let doc = Html::parse_fragment(fragment);

        let form_sel = Selector::parse("form").ok()?;
        let input_sel = Selector::parse("input[name]").ok()?;
        let button_sel = Selector::parse("button[type=\"submit\"]").ok()?;
        let text_input_sel = Selector::parse("input[type=\"text\"], input.form-control").ok()?;
        let label_sel = Selector::parse("label").ok()?;

        let form = doc.select(&form_sel).find(|form| {
            form.value()
                .attr("method")
                .is_some_and(|m| m.eq_ignore_ascii_case("post"))
        })?;

        let mut fields = Vec::new();
        for input in form.select(&input_sel) {
            if let Some(field) = input.value().attr("name").and_then(Field::from_input_name) {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }

        let floating_labels = form
            .select(&text_input_sel)
            .filter(|input| input.value().attr("placeholder").unwrap_or("").is_empty())
            .filter(|input| {
                input
                    .parent()
                    .and_then(ElementRef::wrap)
                    .is_some_and(|parent| parent.select(&label_sel).next().is_some())
            })
            .filter_map(|input| input.value().attr("name").map(str::to_string))
            .collect();

        let submit_label = form
            .select(&button_sel)
            .next()
            .map(|button| button.text().collect::<String>().trim().to_string());

        Some(Self {
            fields,
            submit_label,
            floating_labels,
            statuses: HashMap::new(),
            submitting: false,
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn floating_labels(&self) -> &[String] {
        &self.floating_labels
    }

    pub fn status(&self, field: Field) -> &FieldStatus {
        self.statuses.get(&field).unwrap_or(&FieldStatus::Untouched)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate a field when it loses focus. Fields not on the form pass.
    pub fn on_blur(&mut self, field: Field, value: &str) -> bool {
        if !self.fields.contains(&field) {
            return true;
        }
        self.check(field, value).is_ok()
    }

    /// Typing clears an error; a previous success mark stays.
    pub fn on_input(&mut self, field: Field) {
        if matches!(self.statuses.get(&field), Some(FieldStatus::Error(_))) {
            self.statuses.insert(field, FieldStatus::Untouched);
        }
    }

    pub fn submit(&mut self, values: &FormValues) -> SubmitOutcome {
        let fields = self.fields.clone();
        let errors: Vec<ValidationError> = fields
            .into_iter()
            .filter_map(|field| self.check(field, values.get(field)).err())
            .collect();

        if let Some(first) = errors.first() {
            let focus = first.field();
            tracing::debug!(errors = errors.len(), focus = focus.input_name(), "Submission blocked");
            return SubmitOutcome::Blocked { errors, focus };
        }

        self.submitting = true;
        let button_html = self
            .submit_label
            .as_deref()
            .map(|label| format!("{} {SPINNER_HTML}", escape_html(label)));

        SubmitOutcome::Accepted { button_html }
    }

    fn check(&mut self, field: Field, value: &str) -> Result<(), ValidationError> {
        let result = validate(field, value);
        let status = match &result {
            Ok(()) => FieldStatus::Success,
            Err(e) => FieldStatus::Error(e.to_string()),
        };
        self.statuses.insert(field, status);
        result
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"
        <form method="POST" action="/form">
          <div class="form-group"><label>Your name</label><input class="form-control" name="name" type="text"></div>
          <div class="form-group"><label>Email</label><input class="form-control" name="email" type="email"></div>
          <div class="form-group"><label>Phone</label><input class="form-control" name="phone" type="tel"></div>
          <select name="willattend"><option value="true">Yes</option></select>
          <button type="submit" class="btn">Submit RSVP</button>
        </form>"#;

    fn values(name: &str, email: &str, phone: &str) -> FormValues {
        FormValues {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    #[test]
    fn test_binds_post_form_only() {
        let enhancer = FormEnhancer::from_fragment(FORM).unwrap();
        assert_eq!(enhancer.fields(), &[Field::Name, Field::Email, Field::Phone]);

        assert!(FormEnhancer::from_fragment("<form method=\"get\"></form>").is_none());
        assert!(FormEnhancer::from_fragment("<h1>Thanks!</h1>").is_none());
    }

    #[test]
    fn test_blur_and_input() {
        let mut enhancer = FormEnhancer::from_fragment(FORM).unwrap();

        assert!(!enhancer.on_blur(Field::Email, "nope"));
        assert_eq!(
            enhancer.status(Field::Email),
            &FieldStatus::Error("Please enter a valid email address".to_string())
        );

        enhancer.on_input(Field::Email);
        assert_eq!(enhancer.status(Field::Email), &FieldStatus::Untouched);

        assert!(enhancer.on_blur(Field::Name, "Al"));
        enhancer.on_input(Field::Name);
        assert_eq!(enhancer.status(Field::Name), &FieldStatus::Success);
    }

    #[test]
    fn test_submit_blocked_focuses_first_error() {
        let mut enhancer = FormEnhancer::from_fragment(FORM).unwrap();

        let outcome = enhancer.submit(&values("Alice", "a@b", "123-456-789"));
        assert_eq!(
            outcome,
            SubmitOutcome::Blocked {
                errors: vec![ValidationError::InvalidEmail, ValidationError::InvalidPhone],
                focus: Field::Email,
            }
        );
        assert_eq!(enhancer.status(Field::Name), &FieldStatus::Success);
        assert!(!enhancer.is_submitting());
    }

    #[test]
    fn test_submit_accepted() {
        let mut enhancer = FormEnhancer::from_fragment(FORM).unwrap();

        let outcome = enhancer.submit(&values("Alice", "a@b.c", "(123) 456-7890"));
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                button_html: Some("Submit RSVP <span class=\"spinner\"></span>".to_string()),
            }
        );
        assert!(enhancer.is_submitting());
    }

    #[test]
    fn test_only_present_fields_are_checked() {
        let mut enhancer = FormEnhancer::from_fragment(
            "<form method=\"post\"><input name=\"name\"><button type=\"submit\">Go & see</button></form>",
        )
        .unwrap();

        assert!(enhancer.on_blur(Field::Phone, ""));
        let outcome = enhancer.submit(&values("Bo", "", ""));
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                button_html: Some("Go &amp; see <span class=\"spinner\"></span>".to_string()),
            }
        );
    }

    #[test]
    fn test_floating_label_inputs() {
        let enhancer = FormEnhancer::from_fragment(
            r#"<form method="POST">
                 <div><label>Name</label><input name="name" type="text"></div>
                 <div><label>Email</label><input class="form-control" name="email" placeholder="you@example.com"></div>
                 <div><input class="form-control" name="phone"></div>
                 <div><label>Note</label><input name="note" type="checkbox"></div>
               </form>"#,
        )
        .unwrap();

        assert_eq!(enhancer.floating_labels(), &["name".to_string()]);
        assert_eq!(FormEnhancer::from_fragment(FORM).unwrap().floating_labels().len(), 3);
    }

    #[test]
    fn test_outcome_json() {
        let mut enhancer = FormEnhancer::from_fragment(FORM).unwrap();

        let blocked = enhancer.submit(&values("Alice", "a@b", "(123) 456-7890"));
        assert_eq!(
            serde_json::to_value(&blocked).unwrap(),
            serde_json::json!({"outcome": "blocked", "errors": ["invalid_email"], "focus": "email"})
        );
        assert_eq!(
            serde_json::to_value(enhancer.status(Field::Email)).unwrap(),
            serde_json::json!({"status": "error", "message": "Please enter a valid email address"})
        );
        assert_eq!(
            serde_json::to_value(enhancer.status(Field::Phone)).unwrap(),
            serde_json::json!({"status": "success"})
        );
    }
}
