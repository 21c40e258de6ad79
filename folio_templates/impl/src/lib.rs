use std::{collections::HashMap, sync::Arc};

use folio_templates_contracts::{Template, TemplateService, BASE_TEMPLATE, TEMPLATES};
use tera::{Tera, Value};

#[derive(Debug, Clone, Default)]
pub struct TemplateServiceImpl {
    state: State,
}

impl TemplateServiceImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        tera.register_filter("nl2br", nl2br);

        tera.add_raw_template("base", BASE_TEMPLATE).unwrap();

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template).unwrap();
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

/// Escapes the input and converts newlines to `<br>` tags, the classic
/// `nl2br(htmlspecialchars(...))` combination.
fn nl2br(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let Value::String(raw) = value else {
        return Err(tera::Error::msg("nl2br expects a string"));
    };

    let escaped = tera::escape_html(raw);
    Ok(Value::String(
        escaped.replace("\r\n", "\n").replace('\n', "<br>\n"),
    ))
}

#[cfg(test)]
mod tests {
    use folio_templates_contracts::ContactEmailTemplate;

    use super::*;

    #[test]
    fn contact_email() {
        let html = render(ContactEmailTemplate {
            name: "Max Mustermann".into(),
            email: "max@example.de".into(),
            message: "Hello!\nSecond line.".into(),
        });

        assert!(html.contains("New Contact Form Submission"));
        assert!(html.contains("<strong>Name:</strong> Max Mustermann"));
        assert!(html.contains("<strong>Email:</strong> max@example.de"));
        assert!(html.contains("Hello!<br>\nSecond line."));
        assert!(html.contains("This message was sent from your portfolio website contact form."));
    }

    #[test]
    fn contact_email_escapes_markup() {
        let html = render(ContactEmailTemplate {
            name: "<b>Max</b>".into(),
            email: "max@example.de".into(),
            message: "<script>alert(1)</script>".into(),
        });

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>Max</b>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;"));
        assert!(html.contains("&lt;b&gt;Max&lt;"));
    }

    fn render<T: Template + 'static>(template: T) -> String {
        TemplateServiceImpl::new().render(&template).unwrap()
    }
}
