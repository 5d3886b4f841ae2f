//! Template file contents
//!
//! Handlebars templates for the three per-resource artifacts, and the fixed
//! generic repository written once per project. Block tags sit on content
//! lines (never alone on a line) so the output does not depend on standalone
//! whitespace handling.

/// SQLModel table class (`src/models/<resource>.py`)
pub const MODEL_TEMPLATE: &str = r"{{#if typing_imports}}from typing import {{#each typing_imports}}{{#unless @first}}, {{/unless}}{{this}}{{/each}}
{{/if}}from sqlmodel import SQLModel, Field


class {{class_name}}(SQLModel, table=True):
{{#each fields}}    {{name}}: {{annotation}}{{#if default}} = {{default}}{{/if}}
{{/each}}";

/// Controller forwarding to the generic repository (`src/controllers/<resource>.py`)
pub const CONTROLLER_TEMPLATE: &str = r"from {{model_module}} import {{class_name}}
from {{repository_module}} import (
{{#each repository_imports}}    {{this}},
{{/each}}){{#each functions}}


def {{name}}({{#each params}}{{#unless @first}}, {{/unless}}{{name}}: {{annotation}}{{/each}}):
    return {{delegate}}({{#each args}}{{#unless @first}}, {{/unless}}{{this}}{{/each}})
{{/each}}";

/// JWT-guarded router (`src/routes/<resource>.py`)
pub const ROUTES_TEMPLATE: &str = r#"from fastapi import APIRouter, Depends
from {{controller_module}} import (
{{#each controller_imports}}    {{this}},
{{/each}})
from {{model_module}} import {{class_name}}
from {{auth_module}} import {{auth_dependency}}

{{router_name}} = APIRouter(dependencies=[Depends({{auth_dependency}})]){{#each routes}}


@{{../router_name}}.{{method}}("{{path}}")
def {{handler}}({{#each params}}{{#unless @first}}, {{/unless}}{{name}}: {{annotation}}{{/each}}):
    return {{controller}}({{#each args}}{{#unless @first}}, {{/unless}}{{this}}{{/each}})
{{/each}}"#;

/// Generic data-access layer shared by every controller
///
/// Written verbatim, and only when the file does not exist yet.
pub const GENERIC_REPOSITORY: &str = r#"from sqlmodel import Session, select
from src.config.database import engine
from fastapi import HTTPException


def get_all(model_class):
    with Session(engine) as session:
        return session.exec(select(model_class)).all()


def get_by_id(model_class, id: int):
    with Session(engine) as session:
        item = session.get(model_class, id)
        if not item:
            raise HTTPException(
                status_code=404, detail=f"{model_class.__name__} not found"
            )
        return item


def create(model_instance):
    with Session(engine) as session:
        session.add(model_instance)
        session.commit()
        session.refresh(model_instance)
        return model_instance


def update(model_class, id: int, new_data):
    with Session(engine) as session:
        db_item = session.get(model_class, id)
        if not db_item:
            raise HTTPException(
                status_code=404, detail=f"{model_class.__name__} not found"
            )
        for key, value in new_data.dict().items():
            setattr(db_item, key, value)
        session.commit()
        session.refresh(db_item)
        return db_item


def partial_update(model_class, id: int, data: dict):
    with Session(engine) as session:
        db_item = session.get(model_class, id)
        if not db_item:
            raise HTTPException(
                status_code=404, detail=f"{model_class.__name__} not found"
            )
        for key, value in data.items():
            setattr(db_item, key, value)
        session.commit()
        session.refresh(db_item)
        return db_item


def delete(model_class, id: int):
    with Session(engine) as session:
        item = session.get(model_class, id)
        if not item:
            raise HTTPException(
                status_code=404, detail=f"{model_class.__name__} not found"
            )
        session.delete(item)
        session.commit()
        return {"success": True}
"#;
