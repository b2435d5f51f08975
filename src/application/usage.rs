//! Fixed-width usage text for the help command.

use crate::domain::{CommandDescriptor, OptionSpec};

fn display_flag(spec: &OptionSpec) -> String {
    if spec.is_short() {
        format!("-{}", spec.flag)
    } else {
        format!("--{}", spec.flag)
    }
}

/// `[-abc]` from the short flags, empty without any.
pub fn option_string(descriptor: &CommandDescriptor) -> String {
    let flags: String = descriptor
        .options
        .iter()
        .filter(|o| o.is_short())
        .map(|o| o.flag.as_str())
        .collect();
    if flags.is_empty() {
        String::new()
    } else {
        format!("[-{}]", flags)
    }
}

/// Usage lines for `descriptor`.
///
/// The short form is a single menu row. The long form carries the
/// description (unless `short`), the usage line and one row per option.
pub fn usage_lines(
    descriptor: &CommandDescriptor,
    script_name: &str,
    long: bool,
    short: bool,
) -> Vec<String> {
    let options = option_string(descriptor);

    if !long {
        let line = format!(
            "{:>19.19} {:<10.10} {:<71.71}",
            descriptor.name, options, descriptor.description
        );
        return vec![line.trim_end().to_string()];
    }

    let mut lines = Vec::new();
    if !short && !descriptor.description.is_empty() {
        lines.push(descriptor.description.clone());
    }

    let usage = match descriptor.usage_line() {
        Some(template) => format!("{} {}", script_name, template),
        None if options.is_empty() => format!("{} {}", script_name, descriptor.name),
        None => format!("{} {} {}", script_name, descriptor.name, options),
    };
    lines.push(format!("Usage: {:<93.93}", usage).trim_end().to_string());

    for spec in &descriptor.options {
        let line = format!(
            "{:>19.19} {:<5.5} {:<78.78}",
            display_flag(spec),
            "",
            spec.description
        );
        lines.push(line.trim_end().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> CommandDescriptor {
        CommandDescriptor {
            name: "report".into(),
            description: "Show entries".into(),
            options: vec![
                OptionSpec::value("i", "Issue key"),
                OptionSpec::flag("t", "Today only"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn given_descriptor_when_short_usage_then_single_padded_row() {
        let lines = usage_lines(&report(), "wlog", false, false);
        assert_eq!(
            lines,
            vec![format!("{:>19} {:<10} Show entries", "report", "[-it]")]
        );
    }

    #[test]
    fn given_descriptor_when_long_usage_then_description_usage_and_options() {
        let lines = usage_lines(&report(), "wlog", true, false);
        assert_eq!(lines[0], "Show entries");
        assert_eq!(lines[1], "Usage: wlog report [-it]");
        assert_eq!(lines[2], format!("{:>19}       Issue key", "-i"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn given_template_when_long_short_usage_then_template_used_without_description() {
        let mut descriptor = report();
        descriptor.usage = Some("%s [-it] [date]".into());
        let lines = usage_lines(&descriptor, "wlog", true, true);
        assert_eq!(lines[0], "Usage: wlog report [-it] [date]");
    }

    #[test]
    fn given_long_name_when_short_usage_then_truncated_to_column() {
        let descriptor = CommandDescriptor {
            name: "a-very-long-command-name-indeed".into(),
            ..Default::default()
        };
        let lines = usage_lines(&descriptor, "wlog", false, false);
        assert_eq!(lines[0], "a-very-long-command");
    }
}
