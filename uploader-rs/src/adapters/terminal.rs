// Line oriented configuration form and alerts on a terminal.

use log::error;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use telemetry_common::{RawConfig, UserPrompt};

const FORM_TITLE: &str = "Automotive Telemetry Lab";
const FORM_HINT: &str = "Press Enter to keep the value in brackets, Ctrl+D to cancel.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldKind {
    Switch,
    Text,
    Url,
    Secret,
    Number,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConfigField {
    UseConfigFile,
    SaveConfigFile,
    ConfigFileName,
    BaseUrl,
    Username,
    Password,
    Interval,
    MaxRetries,
    RetryDelay,
    ResetRetryCounterDuration,
}

impl ConfigField {
    fn title(&self) -> &'static str {
        match self {
            ConfigField::UseConfigFile => "Use Config File",
            ConfigField::SaveConfigFile => "Save Config File",
            ConfigField::ConfigFileName => "Config File Name",
            ConfigField::BaseUrl => "Base URL",
            ConfigField::Username => "username",
            ConfigField::Password => "password",
            ConfigField::Interval => "Cycle Interval In Milliseconds",
            ConfigField::MaxRetries => "Maximum Number of Retries",
            ConfigField::RetryDelay => "Retry Delay in Seconds",
            ConfigField::ResetRetryCounterDuration => "Reset Retry in Seconds",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            ConfigField::UseConfigFile | ConfigField::SaveConfigFile => FieldKind::Switch,
            ConfigField::ConfigFileName | ConfigField::Username => FieldKind::Text,
            ConfigField::BaseUrl => FieldKind::Url,
            ConfigField::Password => FieldKind::Secret,
            ConfigField::Interval
            | ConfigField::MaxRetries
            | ConfigField::RetryDelay
            | ConfigField::ResetRetryCounterDuration => FieldKind::Number,
        }
    }

    fn text<'a>(&self, config: &'a mut RawConfig) -> Option<&'a mut String> {
        match self {
            ConfigField::UseConfigFile | ConfigField::SaveConfigFile => None,
            ConfigField::ConfigFileName => Some(&mut config.config_file_name),
            ConfigField::BaseUrl => Some(&mut config.base_url),
            ConfigField::Username => Some(&mut config.username),
            ConfigField::Password => Some(&mut config.password),
            ConfigField::Interval => Some(&mut config.interval),
            ConfigField::MaxRetries => Some(&mut config.max_retries),
            ConfigField::RetryDelay => Some(&mut config.retry_delay),
            ConfigField::ResetRetryCounterDuration => {
                Some(&mut config.reset_retry_counter_duration)
            }
        }
    }

    fn flag<'a>(&self, config: &'a mut RawConfig) -> Option<&'a mut bool> {
        match self {
            ConfigField::UseConfigFile => Some(&mut config.use_config_file),
            ConfigField::SaveConfigFile => Some(&mut config.save_config_file),
            _ => None,
        }
    }
}

struct FormSection {
    header: &'static str,
    fields: &'static [ConfigField],
    footer: Option<&'static str>,
}

const FORM: [FormSection; 4] = [
    FormSection {
        header: "Configuration Information",
        fields: &[
            ConfigField::UseConfigFile,
            ConfigField::SaveConfigFile,
            ConfigField::ConfigFileName,
        ],
        footer: None,
    },
    FormSection {
        header: "Server Connection Info",
        fields: &[
            ConfigField::BaseUrl,
            ConfigField::Username,
            ConfigField::Password,
        ],
        footer: None,
    },
    FormSection {
        header: "Data Collection",
        fields: &[ConfigField::Interval],
        footer: Some("Zero value means no loop delay."),
    },
    FormSection {
        header: "Data Transmission Failure Handling",
        fields: &[
            ConfigField::MaxRetries,
            ConfigField::RetryDelay,
            ConfigField::ResetRetryCounterDuration,
        ],
        footer: None,
    },
];

fn parse_switch(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => Some(true),
        "n" | "no" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn switch_label(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Configuration form and alerts over any line reader and writer.
pub struct TerminalPrompt<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl TerminalPrompt<BufReader<Stdin>, Stdout> {
    /// Prompt on the process standard input and output.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> TerminalPrompt<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    pub fn into_parts(self) -> (R, W) {
        (
            self.input.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.output.into_inner().unwrap_or_else(PoisonError::into_inner),
        )
    }

    fn fill_form(&self, current: &RawConfig) -> io::Result<Option<RawConfig>> {
        let mut input = self.input.lock().unwrap_or_else(PoisonError::into_inner);
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        let mut config = current.clone();

        writeln!(output, "\n{}\n{}", FORM_TITLE, FORM_HINT)?;
        for section in FORM.iter() {
            writeln!(output, "\n== {} ==", section.header)?;
            for field in section.fields {
                if !ask_field(&mut *input, &mut *output, *field, &mut config)? {
                    writeln!(output)?;
                    return Ok(None);
                }
            }
            if let Some(footer) = section.footer {
                writeln!(output, "{}", footer)?;
            }
        }
        output.flush()?;
        Ok(Some(config))
    }
}

/// Asks for a single field until the answer is valid. Returns false on end of input.
fn ask_field<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: ConfigField,
    config: &mut RawConfig,
) -> io::Result<bool> {
    loop {
        let shown = match field.kind() {
            FieldKind::Switch => field
                .flag(config)
                .map(|v| switch_label(*v).to_string())
                .unwrap_or_default(),
            FieldKind::Secret => "***".to_string(),
            _ => field.text(config).map(|v| v.clone()).unwrap_or_default(),
        };
        write!(output, "  {} [{}]: ", field.title(), shown)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(true);
        }

        match field.kind() {
            FieldKind::Switch => match (parse_switch(answer), field.flag(config)) {
                (Some(value), Some(flag)) => {
                    *flag = value;
                    return Ok(true);
                }
                _ => writeln!(output, "  Please answer yes or no.")?,
            },
            FieldKind::Number if answer.parse::<u64>().is_err() => {
                writeln!(output, "  Please enter a non-negative whole number.")?
            }
            _ => {
                if let Some(text) = field.text(config) {
                    *text = answer.to_string();
                }
                return Ok(true);
            }
        }
    }
}

impl<R, W> UserPrompt for TerminalPrompt<R, W>
where
    R: BufRead,
    W: Write,
{
    fn edit_config(&self, current: &RawConfig) -> Option<RawConfig> {
        match self.fill_form(current) {
            Ok(config) => config,
            Err(e) => {
                error!("Configuration form failed: {}", e);
                None
            }
        }
    }

    fn alert(&self, message: &str) {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(output, "\n{}\n", message).and_then(|_| output.flush()) {
            error!("Could not show alert '{}': {}", message, e);
        }
    }
}
