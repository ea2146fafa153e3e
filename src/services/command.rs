//! Templated host commands

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::ActionError;

/// Whitespace-separated command line with `{name}` placeholders.
///
/// Placeholders are substituted per argument, so a value containing spaces
/// stays a single argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
}

impl CommandTemplate {
    pub fn parse(template: &str) -> Result<Self, ActionError> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ActionError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with every `{key}` replaced by its value
    pub fn render(&self, values: &[(&str, &str)]) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                values.iter().fold(arg.clone(), |acc, (key, value)| {
                    acc.replace(&format!("{{{}}}", key), value)
                })
            })
            .collect()
    }

    /// Run the command to completion
    pub async fn run(&self, values: &[(&str, &str)]) -> Result<(), ActionError> {
        let args = self.render(values);
        debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|source| ActionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ActionError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Check that the program behind a template can be spawned at all
pub async fn check_command_available(template: &CommandTemplate) -> Result<(), ActionError> {
    Command::new(template.program())
        .arg("--version")
        .output()
        .await
        .map_err(|source| ActionError::Spawn {
            program: template.program().to_string(),
            source,
        })?;

    info!("{} is available", template.program());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_program_and_args() {
        let template = CommandTemplate::parse("xset s {secs}").unwrap();
        assert_eq!(template.program(), "xset");
        assert_eq!(template.render(&[("secs", "5")]), vec!["s", "5"]);
    }

    #[test]
    fn render_keeps_spaced_values_as_one_argument() {
        let template = CommandTemplate::parse("notify-send -t 3000 {message}").unwrap();
        assert_eq!(
            template.render(&[("message", "Sleep timer: 60 min")]),
            vec!["-t", "3000", "Sleep timer: 60 min"]
        );
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        let template = CommandTemplate::parse("set {ms} {other}").unwrap();
        assert_eq!(template.render(&[("ms", "5000")]), vec!["5000", "{other}"]);
    }

    #[test]
    fn empty_template_is_rejected() {
        assert!(matches!(
            CommandTemplate::parse("   "),
            Err(ActionError::EmptyCommand)
        ));
    }

    #[tokio::test]
    async fn missing_program_reports_spawn_error() {
        let template = CommandTemplate::parse("definitely-not-a-real-program-xyz").unwrap();
        let result = template.run(&[]).await;
        assert!(matches!(result, Err(ActionError::Spawn { .. })));
    }
}
