use std::sync::Arc;

use tera::{Context, Tera};

use crate::{admin_shell::AdminShell, config::Environment, error::AppError};

/// Renderer
///
/// The rendering-capability seam shared by the plain template engine and the
/// theming decorator. Views hold a `RendererState` and never know whether
/// theming is layered on, which replaces subclass mixing with composition.
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, ctx: &Context) -> Result<String, AppError>;
}

/// The concrete type used to share the rendering layer across the application
/// state.
pub type RendererState = Arc<dyn Renderer>;

/// TeraRenderer
///
/// Plain template rendering over a fixed, compile-time-embedded template set.
/// Embedding via `include_str!` keeps rendering independent of the process
/// working directory.
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("user_list.html", include_str!("../templates/user_list.html")),
            ("user_row.html", include_str!("../templates/user_row.html")),
            ("index.html", include_str!("../templates/index.html")),
            ("car_list.html", include_str!("../templates/car_list.html")),
            ("dashboard.html", include_str!("../templates/dashboard.html")),
        ])?;
        Ok(Self { tera })
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, template: &str, ctx: &Context) -> Result<String, AppError> {
        Ok(self.tera.render(template, ctx)?)
    }
}

/// ThemedRenderer
///
/// Decorator around any `Renderer` that injects the theme context every page
/// and fragment can rely on: project name, environment badge, and the
/// environment title prefix. Badge and prefix come from the shell's
/// callbacks, so a custom shell re-themes every page without touching the
/// views. Values a handler already put in the context win over the injected
/// ones.
pub struct ThemedRenderer {
    inner: Arc<dyn Renderer>,
    project_name: String,
    environment: Environment,
    shell: AdminShell,
}

impl ThemedRenderer {
    pub fn new(
        inner: Arc<dyn Renderer>,
        project_name: String,
        environment: Environment,
        shell: AdminShell,
    ) -> Self {
        Self {
            inner,
            project_name,
            environment,
            shell,
        }
    }
}

impl Renderer for ThemedRenderer {
    fn render(&self, template: &str, ctx: &Context) -> Result<String, AppError> {
        let badge = (self.shell.environment_badge)(&self.environment);

        let mut themed = Context::new();
        themed.insert("project", &self.project_name);
        themed.insert("environment_label", &badge.label);
        themed.insert("environment_color", badge.color);
        themed.insert(
            "title_prefix",
            &(self.shell.title_prefix)(&self.environment),
        );
        // Handler-provided values take precedence over the theme defaults.
        themed.extend(ctx.clone());

        self.inner.render(template, &themed)
    }
}
