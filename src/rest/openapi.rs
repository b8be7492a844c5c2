// rest/openapi.rs — Hand-maintained OpenAPI 3.0 description of the task API.
//
// Kept as a static artifact next to the handlers it describes, not wired
// into them: when a route changes, this document changes with it.

use axum::Json;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

static DOCUMENT: Lazy<Value> = Lazy::new(|| {
    let task_schema = json!({
        "type": "object",
        "required": ["id", "title", "description", "completed", "created_at", "updated_at"],
        "properties": {
            "id": { "type": "string", "format": "uuid", "readOnly": true },
            "title": { "type": "string", "maxLength": 200 },
            "description": { "type": "string", "nullable": true },
            "completed": { "type": "boolean", "default": false },
            "created_at": { "type": "string", "format": "date-time", "readOnly": true },
            "updated_at": { "type": "string", "format": "date-time", "readOnly": true }
        }
    });
    let task_input_schema = json!({
        "type": "object",
        "required": ["title"],
        "properties": {
            "title": { "type": "string", "maxLength": 200 },
            "description": { "type": "string", "nullable": true },
            "completed": { "type": "boolean", "default": false }
        }
    });
    let field_errors_schema = json!({
        "type": "object",
        "additionalProperties": {
            "type": "array",
            "items": { "type": "string" }
        }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Tasks API",
            "version": "v1",
            "description": "API for managing tasks",
            "contact": { "email": "contact@tasks.local" },
            "license": { "name": "MIT" }
        },
        "paths": {
            "/api/tasks/": {
                "get": {
                    "summary": "Get list of all tasks",
                    "responses": {
                        "200": {
                            "description": "All tasks, newest first",
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Task" }
                            } } }
                        }
                    }
                },
                "post": {
                    "summary": "Create a new task",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/TaskInput" } } }
                    },
                    "responses": {
                        "201": {
                            "description": "Created task",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Task" } } }
                        },
                        "400": {
                            "description": "Validation failure",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/FieldErrors" } } }
                        }
                    }
                }
            },
            "/api/tasks/{id}/": {
                "parameters": [{
                    "name": "id",
                    "in": "path",
                    "required": true,
                    "schema": { "type": "string" }
                }],
                "get": {
                    "summary": "Get a specific task by ID",
                    "responses": {
                        "200": {
                            "description": "The task",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Task" } } }
                        },
                        "404": { "description": "No task with this id" }
                    }
                },
                "put": {
                    "summary": "Update a specific task",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/TaskInput" } } }
                    },
                    "responses": {
                        "200": {
                            "description": "Updated task",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Task" } } }
                        },
                        "400": {
                            "description": "Validation failure",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/FieldErrors" } } }
                        },
                        "404": { "description": "No task with this id" }
                    }
                },
                "delete": {
                    "summary": "Delete a specific task",
                    "responses": {
                        "204": { "description": "No Content" },
                        "404": { "description": "No task with this id" }
                    }
                }
            },
            "/api/health": {
                "get": {
                    "summary": "Service liveness and database probe",
                    "responses": {
                        "200": { "description": "Health report" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Task": task_schema,
                "TaskInput": task_input_schema,
                "FieldErrors": field_errors_schema
            }
        }
    })
});

pub async fn openapi_spec() -> Json<Value> {
    Json(DOCUMENT.clone())
}
