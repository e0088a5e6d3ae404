// src/system/transport.rs

use crate::{
    core::interpolator,
    models::{PlayerSettings, TransportRequest, TransportResponse, TransportSettings},
};
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Please configure your player settings (uid, code and server) first.")]
    MissingPlayerSettings,
    #[error("No relay program is configured. Set [transport].relay in the settings file.")]
    NoRelayConfigured,
    #[error("Relay command could not be parsed: {0}")]
    CommandParse(String),
    #[error("Relay command is empty.")]
    EmptyCommand,
    #[error("Relay '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Relay '{program}' exited with a non-zero error code: {stderr}")]
    NonZeroExitStatus { program: String, stderr: String },
    #[error("Relay '{program}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl TransportRequest {
    /// Pairs a final command with the player it is meant for.
    pub fn from_player(
        player: &PlayerSettings,
        command: impl Into<String>,
    ) -> Result<Self, TransportError> {
        if !player.is_complete() {
            return Err(TransportError::MissingPlayerSettings);
        }
        Ok(Self {
            uid: player.uid.trim().to_string(),
            code: player.code.trim().to_string(),
            server: player.server.trim().to_string(),
            command: command.into(),
        })
    }
}

/// Delivers a final command to the game server.
pub trait CommandTransport {
    fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Sends nothing. Reports the command back as if the server had accepted it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunTransport;

impl CommandTransport for DryRunTransport {
    fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        log::info!(
            "[dry-run] would send '{}' to uid {} on {}",
            request.command,
            request.uid,
            request.server
        );
        Ok(TransportResponse {
            message: request.command.clone(),
            code: 0,
        })
    }
}

/// Runs an external program that talks to the server.
///
/// The program line may use `<uid>`, `<code>`, `<server>` and `<command>`. It is split into
/// arguments first and filled in afterwards, so a command containing spaces or quotes stays
/// one argument.
#[derive(Debug, Clone)]
pub struct RelayTransport {
    template: String,
}

impl RelayTransport {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The program and arguments that `send` will run for `request`.
    pub fn render_args(&self, request: &TransportRequest) -> Result<Vec<String>, TransportError> {
        let parts = shlex::split(&self.template)
            .ok_or_else(|| TransportError::CommandParse(self.template.clone()))?;
        if parts.is_empty() {
            return Err(TransportError::EmptyCommand);
        }

        let values: &[(&str, &str)] = &[
            ("uid", request.uid.as_str()),
            ("code", request.code.as_str()),
            ("server", request.server.as_str()),
            ("command", request.command.as_str()),
        ];
        Ok(parts
            .iter()
            .map(|part| interpolator::materialize(part, values))
            .collect())
    }
}

impl CommandTransport for RelayTransport {
    fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        let args = self.render_args(request)?;
        let (program, rest) = args.split_first().ok_or(TransportError::EmptyCommand)?;
        log::debug!("Running relay '{}' with {} argument(s)", program, rest.len());

        let output = StdCommand::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| TransportError::CommandFailed(program.clone(), e))?;

        if !output.status.success() {
            return Err(TransportError::NonZeroExitStatus {
                program: program.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|source| TransportError::InvalidUtf8Output {
                program: program.clone(),
                source,
            })?;
        Ok(parse_response(&stdout))
    }
}

/// Reads the relay's reply: a `{message, code}` JSON object, or else plain text.
fn parse_response(stdout: &str) -> TransportResponse {
    let trimmed = stdout.trim();
    serde_json::from_str(trimmed).unwrap_or_else(|_| {
        log::trace!("Relay output is not JSON, using it verbatim.");
        TransportResponse {
            message: trimmed.to_string(),
            code: 0,
        }
    })
}

/// Picks the transport for the current settings.
pub fn build_transport(
    settings: &TransportSettings,
    dry_run: bool,
) -> Result<Box<dyn CommandTransport>, TransportError> {
    if dry_run {
        return Ok(Box::new(DryRunTransport));
    }
    match settings.relay.as_deref().map(str::trim) {
        Some(relay) if !relay.is_empty() => Ok(Box::new(RelayTransport::new(relay))),
        _ => Err(TransportError::NoRelayConfigured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerSettings {
        PlayerSettings {
            uid: "10001".to_string(),
            code: " 4321 ".to_string(),
            server: "asia".to_string(),
        }
    }

    fn request(command: &str) -> TransportRequest {
        TransportRequest::from_player(&player(), command).unwrap()
    }

    #[test]
    fn test_request_requires_complete_player() {
        let mut incomplete = player();
        incomplete.uid = String::new();
        assert!(matches!(
            TransportRequest::from_player(&incomplete, "/heal"),
            Err(TransportError::MissingPlayerSettings)
        ));
        assert_eq!(request("/heal").code, "4321");
    }

    #[test]
    fn test_dry_run_echoes_command() {
        let response = DryRunTransport.send(&request("/heal")).unwrap();
        assert_eq!(response.message, "/heal");
        assert_eq!(response.code, 0);
    }

    #[test]
    fn test_relay_args_keep_command_as_one_argument() {
        let relay = RelayTransport::new("gm-relay --uid <uid> --server=<server> -- '<command>'");
        let args = relay.render_args(&request("/give 501024 x5")).unwrap();
        assert_eq!(
            args,
            vec!["gm-relay", "--uid", "10001", "--server=asia", "--", "/give 501024 x5"]
        );
    }

    #[test]
    fn test_relay_command_tokens_are_not_rescanned() {
        let relay = RelayTransport::new("relay <command>");
        let args = relay.render_args(&request("/say <uid>")).unwrap();
        assert_eq!(args, vec!["relay", "/say <uid>"]);
    }

    #[test]
    fn test_relay_template_errors() {
        assert!(matches!(
            RelayTransport::new("relay 'unclosed").render_args(&request("/heal")),
            Err(TransportError::CommandParse(_))
        ));
        assert!(matches!(
            RelayTransport::new("   ").render_args(&request("/heal")),
            Err(TransportError::EmptyCommand)
        ));
    }

    #[test]
    fn test_parse_response() {
        assert_eq!(
            parse_response("{\"message\": \"Success\", \"code\": 200}\n"),
            TransportResponse {
                message: "Success".to_string(),
                code: 200
            }
        );
        assert_eq!(
            parse_response("  done  \n"),
            TransportResponse {
                message: "done".to_string(),
                code: 0
            }
        );
    }

    #[test]
    fn test_build_transport() {
        let none = TransportSettings::default();
        assert!(build_transport(&none, true).is_ok());
        assert!(matches!(
            build_transport(&none, false),
            Err(TransportError::NoRelayConfigured)
        ));
        let relay = TransportSettings {
            relay: Some("relay <command>".to_string()),
        };
        assert!(build_transport(&relay, false).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_relay_runs_program() {
        let relay = RelayTransport::new(r#"echo '{"message": "<command>", "code": 7}'"#);
        let response = relay.send(&request("/heal")).unwrap();
        assert_eq!(response.message, "/heal");
        assert_eq!(response.code, 7);

        let plain = RelayTransport::new("echo ok <uid>");
        assert_eq!(plain.send(&request("/heal")).unwrap().message, "ok 10001");

        let failing = RelayTransport::new("false");
        assert!(matches!(
            failing.send(&request("/heal")),
            Err(TransportError::NonZeroExitStatus { .. })
        ));
    }
}
