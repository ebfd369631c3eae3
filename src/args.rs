use std::error::Error;

use crate::offset::OutputMode;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a string value for a flag
    pub fn extract_value(&mut self, flag: &str) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide a value after {} for {}", flag, self.command_name).into()
        })
    }

    /// Extract an output mode for -m/--mode
    pub fn extract_mode(&mut self, flag: &str) -> Result<OutputMode, Box<dyn Error>> {
        let raw = self.extract_value(flag)?;
        Ok(raw.parse::<OutputMode>()?)
    }

    /// Get next argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }
}

/// Flags shared by the calculation commands
#[derive(Default, Debug)]
pub struct CommandFlags {
    pub mode: OutputMode,
    pub strict: bool,
    pub in_place: bool,
    pub positional: Vec<String>,
}

impl CommandFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional argument at `idx`, or a usage error.
    pub fn positional(&self, idx: usize, usage: &str) -> Result<&str, Box<dyn Error>> {
        self.positional
            .get(idx)
            .map(String::as_str)
            .ok_or_else(|| usage.to_string().into())
    }
}

/// Negative intervals and numbers (`-2w`, `-1`) and a bare `-` are values,
/// not flags.
pub fn looks_like_flag(arg: &str) -> bool {
    let mut chars = arg.chars();
    chars.next() == Some('-') && chars.next().is_some_and(|c| !c.is_ascii_digit())
}

pub fn parse_command_flags(
    args: Vec<String>,
    command_name: &str,
) -> Result<CommandFlags, Box<dyn Error>> {
    let mut flags = CommandFlags::new();
    let mut parser = ArgParser::new(args, command_name);
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "-m" | "--mode" => flags.mode = parser.extract_mode(&arg)?,
            "--strict" => flags.strict = true,
            "-i" | "--in-place" => flags.in_place = true,
            other if looks_like_flag(other) => {
                return Err(format!("Unknown flag for {command_name}: {other}").into());
            }
            _ => flags.positional.push(arg),
        }
    }
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_arg_parser_extract_value() {
        let mut parser = ArgParser::new(strings(&["--mode", "week"]), "test");
        let flag = parser.next().unwrap();
        assert_eq!(flag, "--mode");
        assert_eq!(parser.extract_value("--mode").unwrap(), "week");
        assert!(parser.next().is_none());
        assert!(parser.extract_value("--mode").is_err());
    }

    #[test]
    fn test_negative_values_are_positional() {
        let flags = parse_command_flags(strings(&["2022-01-01", "-2w", "--mode", "week"]), "offset").unwrap();
        assert_eq!(flags.positional, vec!["2022-01-01", "-2w"]);
        assert_eq!(flags.mode, OutputMode::Week);
        assert!(!flags.strict);
    }

    #[test]
    fn test_unknown_flag_and_bad_mode() {
        assert!(parse_command_flags(strings(&["--loud"]), "offset").is_err());
        assert!(parse_command_flags(strings(&["-m", "sideways"]), "offset").is_err());
        assert!(parse_command_flags(strings(&["-m"]), "offset").is_err());
    }

    #[test]
    fn test_positional_usage_error() {
        let flags = parse_command_flags(strings(&["-", "--in-place"]), "expand").unwrap();
        assert!(flags.in_place);
        assert_eq!(flags.positional(0, "usage").unwrap(), "-");
        assert_eq!(flags.positional(1, "usage: more").unwrap_err().to_string(), "usage: more");
    }
}
