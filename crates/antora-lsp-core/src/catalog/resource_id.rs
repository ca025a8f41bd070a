//! Parsing Antora resource ids.
//!
//! A resource id has the shape
//! `[version@][component:][module:][family$]relative[#fragment]`.
//! Missing parts are filled in from the referencing document's context.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::{Family, ResourceIdentity};

/// Module used when an id names a component but no module.
pub const ROOT_MODULE: &str = "ROOT";

/// The component version and module an id is resolved relative to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceContext {
    pub component: String,
    pub version: String,
    pub module: String,
}

impl From<&ResourceIdentity> for ResourceContext {
    fn from(src: &ResourceIdentity) -> Self {
        Self {
            component: src.component.clone(),
            version: src.version.clone(),
            module: src.module.clone(),
        }
    }
}

/// A resource id with every coordinate filled in except possibly the version.
///
/// `version` is `None` when the id names another component without a
/// version; the catalog substitutes that component's latest version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResourceId {
    pub component: String,
    pub version: Option<String>,
    pub module: String,
    pub family: Family,
    pub relative: String,
}

fn resource_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:([^@:$]+)@)?(?:(?:([^@:$]+):)?(?:([^@:$]+))?:)?(?:([^@:$]+)\$)?([^:$][^@:$]*)$")
            .expect("valid resource id pattern")
    })
}

/// Parse `spec` relative to `context`.
///
/// Returns `None` when the id is malformed, names an unknown family, or
/// names a family outside `permitted`.
pub fn parse_resource_id(
    spec: &str,
    context: &ResourceContext,
    default_family: Family,
    permitted: &[Family],
) -> Option<ParsedResourceId> {
    let spec = spec.split_once('#').map_or(spec, |(id, _fragment)| id);
    let caps = resource_id_re().captures(spec)?;
    let group = |i: usize| caps.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty());

    let version = group(1).map(str::to_string);
    let family = match group(4) {
        Some(name) => name.parse::<Family>().ok()?,
        None => default_family,
    };
    if !permitted.contains(&family) {
        return None;
    }

    let (component, version, module) = match group(2) {
        Some(component) => (
            component.to_string(),
            version,
            group(3).unwrap_or(ROOT_MODULE).to_string(),
        ),
        None => (
            context.component.clone(),
            version.or_else(|| Some(context.version.clone())),
            group(3).map_or_else(|| context.module.clone(), str::to_string),
        ),
    };

    let mut relative = group(5)?.to_string();
    if family == Family::Page && Path::new(&relative).extension().is_none() {
        relative.push_str(".adoc");
    }

    Some(ParsedResourceId {
        component,
        // An empty version means "latest", both when given and when inherited.
        version: version.filter(|v| !v.is_empty()),
        module,
        family,
        relative,
    })
}
