//! Template engine for Python code generation using Handlebars.
//!
//! Three templates fill the artifact slots:
//!
//! - `python/preamble`: imports, server instance, response helpers, the
//!   document reader, the lookup cache (lookup mode) and the initializer tool
//! - `python/tool`: one generated tool function
//! - `python/closing`: the entry point
//!
//! HTML escaping is disabled; every value reaching a template is already
//! valid Python text.
//!
//! # Examples
//!
//! ```
//! use toolgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let closing = engine.render("python/closing", &json!({"server_title": "Flow"})).unwrap();
//! assert!(closing.contains("mcp.run()"));
//! ```

use handlebars::Handlebars;
use serde::Serialize;
use toolgen_core::{Error, Result};

/// Template engine for code generation.
///
/// Wraps Handlebars in strict mode with the built-in Python templates
/// registered.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with registered templates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_python_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_python_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        let templates = [
            (
                "python/preamble",
                include_str!("../templates/python/preamble.py.hbs"),
            ),
            ("python/tool", include_str!("../templates/python/tool.py.hbs")),
            (
                "python/closing",
                include_str!("../templates/python/closing.py.hbs"),
            ),
        ];

        for (name, source) in templates {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    message: format!("Failed to register {name} template: {e}"),
                })?;
        }

        Ok(())
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template is not registered,
    /// the context lacks a referenced field, or rendering fails.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("Rendering {template_name} failed: {e}"),
            })
    }

    /// Registers a custom template, replacing any template with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolgen_codegen::template_engine::TemplateEngine;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine
    ///     .register_template_string("python/closing", "# end of {{server_title}}\n")
    ///     .unwrap();
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register template '{name}': {e}"),
            })
    }

    /// Returns `true` if a template with `name` is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
