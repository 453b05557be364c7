use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::control::domain::actuator::{Actuator, ActuatorError};
use crate::control::domain::control_channel::ControlLevel;
use crate::shared::config_error::ConfigError;

const VALUE_PLACEHOLDER: &str = "{value}";
const PERCENT_PLACEHOLDER: &str = "{percent}";

/// Drives a device by running an external command per level change.
///
/// The template is split on whitespace (no shell quoting). `{value}` is
/// replaced by the backend-native level and `{percent}` by the rounded
/// 0-100 level, e.g. `amixer -q set Master {percent}%` or
/// `brightnessctl -q set {percent}%`.
///
/// Identical consecutive levels are not re-sent.
pub struct CommandActuator {
    program: String,
    args: Vec<String>,
    last_sent: Option<Vec<String>>,
}

impl CommandActuator {
    pub fn new(template: &str) -> Result<Self, ConfigError> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ConfigError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
            last_sent: None,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the command's program can be found, either as a path or on `PATH`.
    pub fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }

    fn render_args(&self, level: ControlLevel) -> Vec<String> {
        let value = format_level(level.value);
        let percent = format!("{:.0}", level.percent);
        self.args
            .iter()
            .map(|arg| {
                arg.replace(VALUE_PLACEHOLDER, &value)
                    .replace(PERCENT_PLACEHOLDER, &percent)
            })
            .collect()
    }
}

impl Actuator for CommandActuator {
    fn set_level(&mut self, level: ControlLevel) -> Result<(), ActuatorError> {
        let args = self.render_args(level);
        if self.last_sent.as_ref() == Some(&args) {
            return Ok(());
        }

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ActuatorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::debug!("{} stderr: {}", self.program, stderr.trim());
            return Err(ActuatorError::Status {
                program: self.program.clone(),
                status: output.status.to_string(),
            });
        }

        self.last_sent = Some(args);
        Ok(())
    }
}

/// Whole numbers print without a fraction; others keep three decimals.
fn format_level(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.3}")
    }
}

fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| {
            [
                dir.join(program),
                dir.join(format!("{program}{}", std::env::consts::EXE_SUFFIX)),
            ]
        })
        .find(|p| p.is_file())
}
