//! Reading component trees from templates and writing them back

use std::fmt::Write;

use crate::component::ComponentRef;
use crate::config::DesignConfig;
use crate::context::{DesignContext, DesignError};
use crate::markup::Document;

/// Read a template with default configuration
///
/// # Example
///
/// ```rust
/// use design_context::design;
///
/// let context = design::read(r#"
///     <v-vertical-layout>
///         <v-button _id="ok" caption="OK"></v-button>
///     </v-vertical-layout>
/// "#).unwrap();
///
/// let button = context.component_by_local_id("ok").unwrap();
/// assert_eq!(button.caption().as_deref(), Some("OK"));
/// ```
pub fn read(source: &str) -> Result<DesignContext, DesignError> {
    read_with_config(source, &DesignConfig::default())
}

/// Read a template into a fresh context configured with `config`
pub fn read_with_config(source: &str, config: &DesignConfig) -> Result<DesignContext, DesignError> {
    read_with_context(source, DesignContext::new().with_config(config))
}

/// Read a template into a prepared context
///
/// Use this to register creation listeners or share services before the
/// template is read. The single root element of the body becomes the
/// context's component root.
pub fn read_with_context(
    source: &str,
    mut context: DesignContext,
) -> Result<DesignContext, DesignError> {
    let document = Document::parse(source)?;
    context.read_prefixes(&document)?;

    let roots: Vec<_> = document.body.child_elements().collect();
    if roots.len() > 1 {
        return Err(DesignError::MultipleRoots { count: roots.len() });
    }

    let root = match roots.first() {
        Some(root) => Some(context.create_child(root)?),
        None => None,
    };
    context.set_component_root(root);
    Ok(context)
}

/// Write a component tree with default configuration
pub fn write(root: &ComponentRef) -> Result<String, DesignError> {
    let mut context = DesignContext::new();
    context.set_component_root(Some(root.clone()));
    write_with_context(&mut context, &DesignConfig::default())
}

/// Write the context's component root as a complete template
///
/// Prefix declarations are stored after the tree is written so that
/// prefixes derived along the way are declared too.
pub fn write_with_context(
    context: &mut DesignContext,
    config: &DesignConfig,
) -> Result<String, DesignError> {
    let mut document = Document::new();
    if let Some(root) = context.component_root().cloned() {
        let design = context.create_node(&root)?;
        document.body.append_child(design);
    }
    context.store_prefixes(&mut document);
    Ok(document.to_html(config.indent))
}

/// One line per component: class, global id, local id and caption
pub fn describe_tree(context: &DesignContext) -> String {
    let mut out = String::new();
    if let Some(root) = context.component_root() {
        describe_component(&mut out, context, root, 0);
    }
    out
}

fn describe_component(out: &mut String, context: &DesignContext, component: &ComponentRef, depth: usize) {
    let _ = write!(out, "{}{}", "  ".repeat(depth), component.class().simple_name);
    if let Some(id) = component.id() {
        let _ = write!(out, " #{}", id);
    }
    if let Some(local_id) = context.local_id_of(component) {
        let _ = write!(out, " _id={}", local_id);
    }
    if let Some(caption) = component.caption() {
        let _ = write!(out, " \"{}\"", caption);
    }
    out.push('\n');
    for child in component.children() {
        describe_component(out, context, &child, depth + 1);
    }
}
