//! Static command configuration: descriptors, option specs and declarations.

use std::collections::BTreeMap;

use crate::domain::DataValue;

/// One entry of a command's option table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Flag name without dashes (`"i"`, `"group"`)
    pub flag: String,
    /// `None`: boolean flag, `Some(true)`: takes a value, `Some(false)`: value optional
    pub required: Option<bool>,
    pub description: String,
}

impl OptionSpec {
    pub fn flag(flag: &str, description: &str) -> Self {
        Self {
            flag: flag.to_string(),
            required: None,
            description: description.to_string(),
        }
    }

    pub fn value(flag: &str, description: &str) -> Self {
        Self {
            flag: flag.to_string(),
            required: Some(true),
            description: description.to_string(),
        }
    }

    pub fn optional_value(flag: &str, description: &str) -> Self {
        Self {
            flag: flag.to_string(),
            required: Some(false),
            description: description.to_string(),
        }
    }

    /// A flag carries no value; its presence is the value.
    pub fn is_flag(&self) -> bool {
        self.required.is_none()
    }

    pub fn is_short(&self) -> bool {
        self.flag.chars().count() == 1
    }
}

/// Metadata a command implementation declares about itself.
///
/// Every field is optional; only the present ones are copied into the
/// descriptor when the implementation is bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    pub arguments: Option<Vec<String>>,
    pub description: Option<String>,
    pub options: Option<Vec<OptionSpec>>,
    pub usage: Option<String>,
    pub menu: Option<bool>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arguments(mut self, names: &[&str]) -> Self {
        self.arguments = Some(names.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn options(mut self, options: Vec<OptionSpec>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn usage(mut self, template: &str) -> Self {
        self.usage = Some(template.to_string());
        self
    }

    pub fn menu(mut self, visible: bool) -> Self {
        self.menu = Some(visible);
        self
    }
}

/// Registry entry for one canonical command.
///
/// The implementation binding lives alongside the descriptor in the
/// registry; this struct is the plain metadata half.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandDescriptor {
    pub name: String,
    /// Ordered positional parameter names
    pub arguments: Vec<String>,
    pub options: Vec<OptionSpec>,
    pub description: String,
    /// Usage template with a single `%s` placeholder for the command name
    pub usage: Option<String>,
    pub menu: bool,
    /// Static defaults copied into every instance's data store
    pub data: BTreeMap<String, DataValue>,
}

impl CommandDescriptor {
    pub fn option(&self, flag: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.flag == flag)
    }

    /// Copy every present declaration over the current values.
    pub fn apply(&mut self, declared: &Declarations) {
        if let Some(arguments) = &declared.arguments {
            self.arguments = arguments.clone();
        }
        if let Some(description) = &declared.description {
            self.description = description.clone();
        }
        if let Some(options) = &declared.options {
            self.options = options.clone();
        }
        if let Some(usage) = &declared.usage {
            self.usage = Some(usage.clone());
        }
        if let Some(menu) = declared.menu {
            self.menu = menu;
        }
    }

    /// Expand the usage template for this command's name.
    pub fn usage_line(&self) -> Option<String> {
        self.usage
            .as_ref()
            .map(|template| template.replacen("%s", &self.name, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_declarations_when_applied_then_only_present_fields_change() {
        let mut descriptor = CommandDescriptor {
            name: "report".into(),
            description: "from config".into(),
            menu: true,
            ..Default::default()
        };
        descriptor.apply(&Declarations::new().arguments(&["date", "date_end"]));

        assert_eq!(descriptor.arguments, vec!["date", "date_end"]);
        assert_eq!(descriptor.description, "from config");
        assert!(descriptor.menu);
    }

    #[test]
    fn given_usage_template_when_expanded_then_placeholder_is_name() {
        let descriptor = CommandDescriptor {
            name: "report".into(),
            usage: Some("%s [-ilt] [date [end_date]]".into()),
            ..Default::default()
        };
        assert_eq!(
            descriptor.usage_line().as_deref(),
            Some("report [-ilt] [date [end_date]]")
        );
    }
}
