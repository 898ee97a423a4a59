use std::sync::Arc;
use tera::Tera;

/// Template engine wrapper for rendering HTML templates
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  /// Loads every template matching `glob`
  pub fn new(glob: &str) -> Result<Self, tera::Error> {
    let mut tera = Tera::new(glob)?;
    tera.autoescape_on(vec!["html.tera", ".html"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  /// Render a template with the given context
  pub fn render(&self, template: &str, context: &tera::Context) -> Result<String, tera::Error> {
    self.tera.render(template, context)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const GLOB: &str = "templates/**/*.html.tera";

  #[test]
  fn test_loads_project_templates() {
    let engine = TemplateEngine::new(GLOB).unwrap();
    let names: Vec<&str> = engine.tera.get_template_names().collect();
    for expected in [
      "pages/login.html.tera",
      "pages/signup.html.tera",
      "pages/dashboard.html.tera",
      "partials/login_form.html.tera",
    ] {
      assert!(names.contains(&expected), "missing {expected}");
    }
  }

  #[test]
  fn test_user_content_is_escaped() {
    let engine = TemplateEngine::new(GLOB).unwrap();
    let mut context = tera::Context::new();
    context.insert("email", "<script>alert(1)</script>");
    context.insert("email_error", &None::<String>);
    context.insert("form_error", &None::<String>);
    context.insert("attempted", &false);

    let html = engine
      .render("partials/login_form.html.tera", &context)
      .unwrap();
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
  }
}
