/// A parsed fragment identifier.
///
/// Identifiers are either a bare template name (`"index"`) or a template
/// plus a named region inside it (`"index :: load"`). The identifier is
/// split on the first `::`; whitespace around both parts is
/// insignificant. Without a region the entire template is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSpec {
    template: String,
    region: Option<String>,
}

impl FragmentSpec {
    pub fn parse(identifier: &str) -> Self {
        match identifier.split_once("::") {
            Some((template, region)) => Self {
                template: template.trim().to_string(),
                region: Some(region.trim().to_string()),
            },
            None => Self {
                template: identifier.trim().to_string(),
                region: None,
            },
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Named region within the template, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}
