//! Pipeline definition resolution

mod resolver;
mod templates;

pub use resolver::{generate, resolve, PipelineDefinition, ResolveError, WorkflowSource, WORKFLOW_DIR};
pub use templates::for_tag;
