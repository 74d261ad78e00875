//! INI file configuration adapter.

use crate::domain::error::SignalError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SignalError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| SignalError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, SignalError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| SignalError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn reads_signal_section() {
        let content = r#"
[signal]
grace_days = 5
trailing_atr = 2.5
; comment lines are ignored
max_entry_bias = 0.15
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(adapter.get_int("signal", "grace_days", 0), 5);
        assert_eq!(adapter.get_double("signal", "trailing_atr", 0.0), 2.5);
        assert_eq!(
            adapter.get_string("signal", "max_entry_bias"),
            Some("0.15".to_string())
        );
    }

    #[test]
    fn missing_key_and_section_are_none() {
        let adapter = FileConfigAdapter::from_string("[signal]\nwarmup_bars = 60\n").unwrap();
        assert_eq!(adapter.get_string("signal", "missing"), None);
        assert_eq!(adapter.get_string("data", "warmup_bars"), None);
    }

    #[test]
    fn numeric_getters_fall_back_to_default() {
        let adapter = FileConfigAdapter::from_string(
            "[signal]\nwarmup_bars = many\ntrailing_atr = wide\n",
        )
        .unwrap();
        assert_eq!(adapter.get_int("signal", "warmup_bars", 60), 60);
        assert_eq!(adapter.get_int("signal", "absent", 7), 7);
        assert_eq!(adapter.get_double("signal", "trailing_atr", 3.0), 3.0);
        assert_eq!(adapter.get_double("signal", "absent", 0.5), 0.5);
    }

    #[test]
    fn bool_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[output]\na = true\nb = Yes\nc = 1\nd = off\ne = no\nf = maybe\n",
        )
        .unwrap();
        assert!(adapter.get_bool("output", "a", false));
        assert!(adapter.get_bool("output", "b", false));
        assert!(adapter.get_bool("output", "c", false));
        assert!(!adapter.get_bool("output", "d", true));
        assert!(!adapter.get_bool("output", "e", true));
        assert!(adapter.get_bool("output", "f", true));
        assert!(!adapter.get_bool("output", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[signal]\nbreakout_lookback = 55\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("signal", "breakout_lookback", 20), 55);
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/signal.ini");
        match result {
            Err(SignalError::ConfigParse { file, .. }) => {
                assert_eq!(file, "/nonexistent/path/signal.ini");
            }
            _ => panic!("expected ConfigParse error"),
        }
    }
}
