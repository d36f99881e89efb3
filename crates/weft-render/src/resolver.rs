use std::collections::HashMap;

use serde_json::Value;

use weft_core::FragmentSpec;

use crate::error::ResolveError;

/// Variable bindings made available to fragment rendering.
pub type Bindings = HashMap<String, Value>;

/// Resolves a fragment reference plus bindings into rendered markup.
///
/// Implementations own the actual template machinery, whether that is
/// a template engine, a component library or plain string building. The renderer only
/// decides *what* to resolve and how to wrap the result.
pub trait FragmentResolver: Send + Sync {
    fn resolve(&self, spec: &FragmentSpec, bindings: &Bindings) -> Result<String, ResolveError>;
}

type FragmentFn = Box<dyn Fn(&Bindings) -> String + Send + Sync>;

/// Closure-backed [`FragmentResolver`].
///
/// Registers a render function per template and per named region, keyed
/// the way identifiers parse: `template("index", ..)` answers bare
/// `"index"` lookups, `fragment("index", "load", ..)` answers
/// `"index :: load"`.
#[derive(Default)]
pub struct FnResolver {
    templates: HashMap<String, FragmentFn>,
    fragments: HashMap<(String, String), FragmentFn>,
}

impl FnResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a render function for a whole template.
    pub fn template<F>(mut self, name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Bindings) -> String + Send + Sync + 'static,
    {
        self.templates.insert(name.into(), Box::new(render));
        self
    }

    /// Register a render function for a named region within a template.
    pub fn fragment<F>(
        mut self,
        template: impl Into<String>,
        region: impl Into<String>,
        render: F,
    ) -> Self
    where
        F: Fn(&Bindings) -> String + Send + Sync + 'static,
    {
        self.fragments
            .insert((template.into(), region.into()), Box::new(render));
        self
    }

    fn knows_template(&self, name: &str) -> bool {
        self.templates.contains_key(name) || self.fragments.keys().any(|(t, _)| t == name)
    }
}

impl FragmentResolver for FnResolver {
    fn resolve(&self, spec: &FragmentSpec, bindings: &Bindings) -> Result<String, ResolveError> {
        match spec.region() {
            None => self
                .templates
                .get(spec.template())
                .map(|render| render(bindings))
                .ok_or_else(|| ResolveError::TemplateNotFound(spec.template().to_string())),
            Some(region) => self
                .fragments
                .get(&(spec.template().to_string(), region.to_string()))
                .map(|render| render(bindings))
                .ok_or_else(|| {
                    if self.knows_template(spec.template()) {
                        ResolveError::FragmentNotFound(format!(
                            "{} :: {}",
                            spec.template(),
                            region
                        ))
                    } else {
                        ResolveError::TemplateNotFound(spec.template().to_string())
                    }
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> FnResolver {
        FnResolver::new()
            .template("index", |_| "<html>".to_string())
            .fragment("index", "load", |bindings| {
                format!("<span>{}</span>", bindings["time"])
            })
    }

    #[test]
    fn resolves_whole_template_and_region() {
        let resolver = resolver();
        let mut bindings = Bindings::new();
        bindings.insert("time".to_string(), serde_json::json!(42));

        let markup = resolver
            .resolve(&FragmentSpec::parse("index"), &bindings)
            .unwrap();
        assert_eq!(markup, "<html>");

        let markup = resolver
            .resolve(&FragmentSpec::parse("index :: load"), &bindings)
            .unwrap();
        assert_eq!(markup, "<span>42</span>");
    }

    #[test]
    fn unknown_template_and_region_are_distinct_errors() {
        let resolver = resolver();
        let bindings = Bindings::new();

        assert_eq!(
            resolver
                .resolve(&FragmentSpec::parse("missing"), &bindings)
                .unwrap_err(),
            ResolveError::TemplateNotFound("missing".to_string())
        );
        assert_eq!(
            resolver
                .resolve(&FragmentSpec::parse("index :: missing"), &bindings)
                .unwrap_err(),
            ResolveError::FragmentNotFound("index :: missing".to_string())
        );
    }
}
