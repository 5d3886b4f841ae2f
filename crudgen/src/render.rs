//! Artifact formatter
//!
//! Turns the typed artifacts from [`crate::artifact`] into Python source using
//! the handlebars templates in [`crate::templates`].

use crate::artifact::{ControllerArtifact, ModelArtifact, RouteArtifact};
use crate::config::AuthSettings;
use crate::error::Result;
use crate::field::ResourceSpec;
use crate::layout::Layout;
use crate::templates::{CONTROLLER_TEMPLATE, MODEL_TEMPLATE, ROUTES_TEMPLATE};
use handlebars::Handlebars;
use serde::Serialize;

const MODEL: &str = "model";
const CONTROLLER: &str = "controller";
const ROUTES: &str = "routes";

/// Rendered text of the three per-resource artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    /// Model module
    pub model: String,
    /// Controller module
    pub controller: String,
    /// Route module
    pub routes: String,
}

/// Handlebars-backed artifact renderer
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    /// Create a renderer with the built-in templates registered
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Generating Python, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, template) in [
            (MODEL, MODEL_TEMPLATE),
            (CONTROLLER, CONTROLLER_TEMPLATE),
            (ROUTES, ROUTES_TEMPLATE),
        ] {
            handlebars
                .register_template_string(name, template)
                .map_err(Box::new)?;
        }

        Ok(Self { handlebars })
    }

    /// Render the model module
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_model(&self, model: &ModelArtifact) -> Result<String> {
        self.render_template(MODEL, model)
    }

    /// Render the controller module
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_controller(&self, controller: &ControllerArtifact) -> Result<String> {
        self.render_template(CONTROLLER, controller)
    }

    /// Render the route module
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_routes(&self, routes: &RouteArtifact) -> Result<String> {
        self.render_template(ROUTES, routes)
    }

    /// Build and render all three artifacts for a resource
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails for any artifact.
    pub fn render(
        &self,
        spec: &ResourceSpec,
        layout: &Layout,
        auth: &AuthSettings,
    ) -> Result<RenderedArtifacts> {
        Ok(RenderedArtifacts {
            model: self.render_model(&ModelArtifact::build(spec))?,
            controller: self.render_controller(&ControllerArtifact::build(spec, layout))?,
            routes: self.render_routes(&RouteArtifact::build(spec, layout, auth))?,
        })
    }

    fn render_template<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        Ok(self.handlebars.render(name, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::Path;

    fn render(resource: &str, fields: &str) -> RenderedArtifacts {
        let spec = ResourceSpec::new(resource, fields).unwrap();
        let layout = Layout::new(Path::new("."), &Config::default());
        Renderer::new()
            .unwrap()
            .render(&spec, &layout, &AuthSettings::default())
            .unwrap()
    }

    #[test]
    fn test_model_without_typing_imports() {
        let rendered = render("items", "name:str,description:str");
        assert_eq!(
            rendered.model,
            "from sqlmodel import SQLModel, Field\n\
             \n\
             \n\
             class Items(SQLModel, table=True):\n    \
             id: int | None = Field(default=None, primary_key=True)\n    \
             name: str\n    \
             description: str\n"
        );
    }

    #[test]
    fn test_model_typing_import_comes_first() {
        let rendered = render("widget", "a:Decimal,b:string,c:UUID");
        let mut lines = rendered.model.lines();
        assert_eq!(lines.next(), Some("from typing import Decimal, UUID"));
        assert_eq!(lines.next(), Some("from sqlmodel import SQLModel, Field"));
        assert!(rendered.model.contains("    a: Decimal\n    b: str\n    c: UUID\n"));
    }

    #[test]
    fn test_controller_forwards_to_repository() {
        let rendered = render("items", "name:str");
        let controller = &rendered.controller;
        assert!(controller.starts_with("from src.models.items import Items\n"));
        assert!(controller.contains(
            "from src.repositories.generic_repository import (\n    get_all,\n    get_by_id,\n"
        ));
        assert!(controller.contains("def get_all_controller():\n    return get_all(Items)\n"));
        assert!(controller
            .contains("def get_by_id_controller(id: int):\n    return get_by_id(Items, id)\n"));
        assert!(controller.contains("def create_controller(data: Items):\n    return create(data)\n"));
        assert!(controller.contains(
            "def update_controller(id: int, data: Items):\n    return update(Items, id, data)\n"
        ));
        assert!(controller.contains(
            "def partial_update_controller(id: int, data: dict):\n    return partial_update(Items, id, data)\n"
        ));
        assert!(controller.contains("def delete_controller(id: int):\n    return delete(Items, id)\n"));
    }

    #[test]
    fn test_routes_guarded_router() {
        let rendered = render("items", "name:str");
        let routes = &rendered.routes;
        assert!(routes.contains(
            "items_routes = APIRouter(dependencies=[Depends(verify_jwt_token)])"
        ));
        assert!(routes.contains("from src.security.verify_jwt_token import verify_jwt_token\n"));
        assert!(routes.contains("from src.controllers.items import (\n    get_all_controller,\n"));
        assert!(routes.contains(
            "@items_routes.get(\"/items\")\ndef route_get_all():\n    return get_all_controller()\n"
        ));
        assert!(routes.contains(
            "@items_routes.get(\"/items/{id}\")\ndef route_get_by_id(id: int):\n    return get_by_id_controller(id)\n"
        ));
        assert!(routes.contains("@items_routes.post(\"/items\")\ndef route_create(data: Items):"));
        assert!(routes.contains("@items_routes.put(\"/items/{id}\")\ndef route_update(id: int, data: Items):"));
        assert!(routes.contains(
            "@items_routes.patch(\"/items/{id}\")\ndef route_partial_update(id: int, data: dict):\n    return partial_update_controller(id, data)\n"
        ));
        assert!(routes.contains("@items_routes.delete(\"/items/{id}\")\ndef route_delete(id: int):"));
    }

    #[test]
    fn test_routes_use_configured_guard() {
        let spec = ResourceSpec::new("items", "name:str").unwrap();
        let layout = Layout::new(Path::new("."), &Config::default());
        let auth = AuthSettings {
            module: "app.auth".to_string(),
            dependency: "require_user".to_string(),
        };
        let rendered = Renderer::new().unwrap().render(&spec, &layout, &auth).unwrap();
        assert!(rendered.routes.contains("from app.auth import require_user\n"));
        assert!(rendered.routes.contains("Depends(require_user)"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let first = render("widget", "c:UUID,a:Decimal,b:string");
        let second = render("widget", "c:UUID,a:Decimal,b:string");
        assert_eq!(first, second);
    }
}
