// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Registration call shapes.

use crate::tools::{ToolArg, ToolFn};

/// How a registration call was shaped, decided from its argument count.
#[derive(Debug)]
pub enum RegistrationShape {
    /// `(schema, handler)`
    WithSchemaAndHandler { schema: ToolArg, handler: ToolFn },
    /// `(description, schema, handler)`
    WithDescriptionSchemaAndHandler {
        description: ToolArg,
        schema: ToolArg,
        handler: ToolFn,
    },
    /// Anything else; forwarded as-is.
    Unrecognized(Vec<ToolArg>),
}

impl RegistrationShape {
    /// Classify the arguments that follow the tool name.
    ///
    /// Two arguments are `(schema, handler)`, three are
    /// `(description, schema, handler)`. A recognized count whose last
    /// argument is not a handler leaves nothing to instrument and is
    /// treated as unrecognized.
    pub fn classify(args: Vec<ToolArg>) -> Self {
        let args = match <[ToolArg; 2]>::try_from(args) {
            Ok([schema, ToolArg::Handler(handler)]) => {
                return Self::WithSchemaAndHandler { schema, handler }
            }
            Ok(other) => return Self::Unrecognized(other.into()),
            Err(args) => args,
        };

        match <[ToolArg; 3]>::try_from(args) {
            Ok([description, schema, ToolArg::Handler(handler)]) => {
                Self::WithDescriptionSchemaAndHandler {
                    description,
                    schema,
                    handler,
                }
            }
            Ok(other) => Self::Unrecognized(other.into()),
            Err(args) => Self::Unrecognized(args),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::WithSchemaAndHandler { .. } => "schema+handler",
            Self::WithDescriptionSchemaAndHandler { .. } => "description+schema+handler",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    /// Replace the handler, keeping every other argument in place.
    pub fn map_handler<F>(self, wrap: F) -> Self
    where
        F: FnOnce(ToolFn) -> ToolFn,
    {
        match self {
            Self::WithSchemaAndHandler { schema, handler } => Self::WithSchemaAndHandler {
                schema,
                handler: wrap(handler),
            },
            Self::WithDescriptionSchemaAndHandler {
                description,
                schema,
                handler,
            } => Self::WithDescriptionSchemaAndHandler {
                description,
                schema,
                handler: wrap(handler),
            },
            unrecognized @ Self::Unrecognized(_) => unrecognized,
        }
    }

    /// Turn the shape back into positional arguments.
    pub fn into_args(self) -> Vec<ToolArg> {
        match self {
            Self::WithSchemaAndHandler { schema, handler } => {
                vec![schema, ToolArg::Handler(handler)]
            }
            Self::WithDescriptionSchemaAndHandler {
                description,
                schema,
                handler,
            } => vec![description, schema, ToolArg::Handler(handler)],
            Self::Unrecognized(args) => args,
        }
    }
}
