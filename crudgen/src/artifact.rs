//! Typed intermediate representations of the generated artifacts
//!
//! Builders here decide *what* a model, controller and route module contain
//! (imports, fields, function signatures, delegate calls). Turning them into
//! Python text is the job of [`crate::render::Renderer`], so the structure can
//! be tested without pinning exact layout.
//!
//! All three artifacts share the same six CRUD [`Operation`]s:
//!
//! | Operation       | Route                  | Controller                  | Repository call              |
//! |-----------------|------------------------|-----------------------------|------------------------------|
//! | `GetAll`        | `GET /<r>`             | `get_all_controller()`      | `get_all(Model)`             |
//! | `GetById`       | `GET /<r>/{id}`        | `get_by_id_controller(id)`  | `get_by_id(Model, id)`       |
//! | `Create`        | `POST /<r>`            | `create_controller(data)`   | `create(data)`               |
//! | `Update`        | `PUT /<r>/{id}`        | `update_controller(id, data)` | `update(Model, id, data)`  |
//! | `PartialUpdate` | `PATCH /<r>/{id}`      | `partial_update_controller(id, data)` | `partial_update(Model, id, data)` |
//! | `Delete`        | `DELETE /<r>/{id}`     | `delete_controller(id)`     | `delete(Model, id)`          |

use crate::config::AuthSettings;
use crate::field::{ResourceSpec, PRIMARY_KEY};
use crate::layout::Layout;
use serde::Serialize;
use std::fmt;

/// HTTP method of a generated route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        f.write_str(method)
    }
}

/// One of the six CRUD operations every resource exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// List the collection
    GetAll,
    /// Fetch one row by id
    GetById,
    /// Insert a row
    Create,
    /// Replace a row
    Update,
    /// Patch selected columns of a row
    PartialUpdate,
    /// Delete a row
    Delete,
}

impl Operation {
    /// All operations in generation order
    pub const ALL: [Self; 6] = [
        Self::GetAll,
        Self::GetById,
        Self::Create,
        Self::Update,
        Self::PartialUpdate,
        Self::Delete,
    ];

    /// Function name in the generic repository
    #[must_use]
    pub const fn repository_function(self) -> &'static str {
        match self {
            Self::GetAll => "get_all",
            Self::GetById => "get_by_id",
            Self::Create => "create",
            Self::Update => "update",
            Self::PartialUpdate => "partial_update",
            Self::Delete => "delete",
        }
    }

    /// Function name in the generated controller
    #[must_use]
    pub fn controller_function(self) -> String {
        format!("{}_controller", self.repository_function())
    }

    /// Handler name in the generated route module
    #[must_use]
    pub fn route_handler(self) -> String {
        format!("route_{}", self.repository_function())
    }

    /// HTTP method the operation is mounted on
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::GetAll | Self::GetById => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::PartialUpdate => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Whether the route addresses a single row (`/<r>/{id}`)
    #[must_use]
    pub const fn targets_item(self) -> bool {
        !matches!(self, Self::GetAll | Self::Create)
    }

    /// Parameters of the controller function and route handler
    #[must_use]
    pub fn params(self, class_name: &str) -> Vec<Param> {
        let id = || Param::new("id", "int");
        let body = || Param::new("data", class_name);

        match self {
            Self::GetAll => vec![],
            Self::GetById | Self::Delete => vec![id()],
            Self::Create => vec![body()],
            Self::Update => vec![id(), body()],
            Self::PartialUpdate => vec![id(), Param::new("data", "dict")],
        }
    }

    /// Arguments forwarded to the repository function
    #[must_use]
    pub fn repository_args(self, class_name: &str) -> Vec<String> {
        let mut args = Vec::new();
        if self != Self::Create {
            args.push(class_name.to_string());
        }
        args.extend(self.params(class_name).into_iter().map(|p| p.name));
        args
    }
}

/// A typed Python parameter (`name: annotation`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Parameter name
    pub name: String,
    /// Type annotation
    pub annotation: String,
}

impl Param {
    fn new(name: &str, annotation: &str) -> Self {
        Self {
            name: name.to_string(),
            annotation: annotation.to_string(),
        }
    }
}

/// One column of the generated model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelField {
    /// Column name
    pub name: String,
    /// Python annotation
    pub annotation: String,
    /// Default expression, if any
    pub default: Option<String>,
}

/// SQLModel table class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelArtifact {
    /// Non-primitive types imported from `typing`, sorted
    pub typing_imports: Vec<String>,
    /// Class name
    pub class_name: String,
    /// Columns, synthetic primary key first
    pub fields: Vec<ModelField>,
}

impl ModelArtifact {
    /// Build the model for a resource
    #[must_use]
    pub fn build(spec: &ResourceSpec) -> Self {
        let primary_key = ModelField {
            name: PRIMARY_KEY.to_string(),
            annotation: "int | None".to_string(),
            default: Some("Field(default=None, primary_key=True)".to_string()),
        };

        let fields = std::iter::once(primary_key)
            .chain(spec.fields.iter().map(|field| ModelField {
                name: field.name.clone(),
                // `string`, `integer` and `boolean` are written as `str`, `int` and `bool`
                annotation: field.annotation().to_string(),
                default: None,
            }))
            .collect();

        Self {
            typing_imports: spec.type_imports.iter().cloned().collect(),
            class_name: spec.class_name.clone(),
            fields,
        }
    }
}

/// A controller function forwarding to the generic repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardingFunction {
    /// Function name
    pub name: String,
    /// Parameters
    pub params: Vec<Param>,
    /// Repository function called
    pub delegate: String,
    /// Arguments passed to the delegate
    pub args: Vec<String>,
}

/// Controller module for a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerArtifact {
    /// Module defining the model class
    pub model_module: String,
    /// Model class name
    pub class_name: String,
    /// Generic repository module
    pub repository_module: String,
    /// Repository functions imported
    pub repository_imports: Vec<String>,
    /// Exported functions
    pub functions: Vec<ForwardingFunction>,
}

impl ControllerArtifact {
    /// Build the controller for a resource
    #[must_use]
    pub fn build(spec: &ResourceSpec, layout: &Layout) -> Self {
        let class_name = &spec.class_name;
        let functions = Operation::ALL
            .iter()
            .map(|op| ForwardingFunction {
                name: op.controller_function(),
                params: op.params(class_name),
                delegate: op.repository_function().to_string(),
                args: op.repository_args(class_name),
            })
            .collect();

        Self {
            model_module: layout.model_module(&spec.resource_name),
            class_name: class_name.clone(),
            repository_module: layout.repository_module(),
            repository_imports: Operation::ALL
                .iter()
                .map(|op| op.repository_function().to_string())
                .collect(),
            functions,
        }
    }

    /// Names of the exported functions
    #[must_use]
    pub fn function_names(&self) -> Vec<String> {
        self.functions.iter().map(|f| f.name.clone()).collect()
    }
}

/// One decorated handler of the route module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDef {
    /// HTTP method
    pub method: HttpMethod,
    /// URL path (`/widget` or `/widget/{id}`)
    pub path: String,
    /// Handler function name
    pub handler: String,
    /// Handler parameters
    pub params: Vec<Param>,
    /// Controller function called
    pub controller: String,
    /// Arguments passed to the controller
    pub args: Vec<String>,
}

/// Route module for a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteArtifact {
    /// Module defining the controller functions
    pub controller_module: String,
    /// Controller functions imported
    pub controller_imports: Vec<String>,
    /// Module defining the model class
    pub model_module: String,
    /// Model class name
    pub class_name: String,
    /// Module exporting the auth dependency
    pub auth_module: String,
    /// Auth dependency callable
    pub auth_dependency: String,
    /// Router variable, also the registration entry
    pub router_name: String,
    /// Handlers in generation order
    pub routes: Vec<RouteDef>,
}

impl RouteArtifact {
    /// Build the route module for a resource
    #[must_use]
    pub fn build(spec: &ResourceSpec, layout: &Layout, auth: &AuthSettings) -> Self {
        let resource = &spec.resource_name;
        let class_name = &spec.class_name;

        let routes = Operation::ALL
            .iter()
            .map(|op| {
                let params = op.params(class_name);
                let path = if op.targets_item() {
                    format!("/{resource}/{{id}}")
                } else {
                    format!("/{resource}")
                };
                RouteDef {
                    method: op.method(),
                    path,
                    handler: op.route_handler(),
                    args: params.iter().map(|p| p.name.clone()).collect(),
                    params,
                    controller: op.controller_function(),
                }
            })
            .collect();

        Self {
            controller_module: layout.controller_module(resource),
            controller_imports: Operation::ALL
                .iter()
                .map(|op| op.controller_function())
                .collect(),
            model_module: layout.model_module(resource),
            class_name: class_name.clone(),
            auth_module: auth.module.clone(),
            auth_dependency: auth.dependency.clone(),
            router_name: spec.router_name(),
            routes,
        }
    }
}
