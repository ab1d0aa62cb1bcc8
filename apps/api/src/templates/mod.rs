// Template rendering core: catalog, section extraction, layout profiles and the
// single parameterised renderer, plus the template HTTP handlers.

pub mod dates;
pub mod handlers;
pub mod layout;
pub mod registry;
pub mod render;
pub mod sections;
pub mod selector;

pub use layout::RendererKind;
pub use registry::{TemplateDescriptor, TemplateFilter};
pub use selector::{render, render_with, RenderError};
