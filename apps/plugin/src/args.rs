//! Launch arguments the Stream Deck host passes to the plugin binary.
//!
//! The host invokes the plugin as
//! `<binary> -port 28196 -pluginUUID <uuid> -registerEvent <event> -info <json>`.
//! Without these the plugin cannot register, so missing required flags are
//! a startup error.

use anyhow::{Context, bail};

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchArgs {
    pub port: u16,
    pub plugin_uuid: String,
    pub register_event: String,
    /// Opaque host/application description JSON; logged, not interpreted.
    pub info: String,
}

/// Parses the host launch arguments (program name already stripped).
///
/// Flags may appear in any order; unknown flags are skipped so future
/// host versions can add arguments without breaking older plugins.
pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<LaunchArgs> {
    let mut port = None;
    let mut plugin_uuid = None;
    let mut register_event = None;
    let mut info = None;

    let mut iter = args.into_iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "-port" => {
                let value = iter.next().context("-port needs a value")?;
                port = Some(
                    value
                        .parse::<u16>()
                        .with_context(|| format!("invalid port '{value}'"))?,
                );
            }
            "-pluginUUID" => plugin_uuid = iter.next(),
            "-registerEvent" => register_event = iter.next(),
            "-info" => info = iter.next(),
            other => tracing::debug!(flag = other, "ignoring unknown launch flag"),
        }
    }

    let Some(port) = port else {
        bail!("missing -port argument");
    };
    let Some(plugin_uuid) = plugin_uuid else {
        bail!("missing -pluginUUID argument");
    };
    let Some(register_event) = register_event else {
        bail!("missing -registerEvent argument");
    };

    Ok(LaunchArgs {
        port,
        plugin_uuid,
        register_event,
        info: info.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_full_argument_set() {
        let args = parse(strings(&[
            "-port",
            "28196",
            "-pluginUUID",
            "ABCDEF",
            "-registerEvent",
            "registerPlugin",
            "-info",
            "{}",
        ]))
        .unwrap();

        assert_eq!(args.port, 28196);
        assert_eq!(args.plugin_uuid, "ABCDEF");
        assert_eq!(args.register_event, "registerPlugin");
        assert_eq!(args.info, "{}");
    }

    #[test]
    fn order_does_not_matter() {
        let args = parse(strings(&[
            "-registerEvent",
            "registerPlugin",
            "-port",
            "1234",
            "-pluginUUID",
            "X",
        ]))
        .unwrap();
        assert_eq!(args.port, 1234);
    }

    #[test]
    fn info_is_optional() {
        let args = parse(strings(&[
            "-port",
            "1",
            "-pluginUUID",
            "u",
            "-registerEvent",
            "e",
        ]))
        .unwrap();
        assert!(args.info.is_empty());
    }

    #[test]
    fn missing_port_is_an_error() {
        let err = parse(strings(&["-pluginUUID", "u", "-registerEvent", "e"])).unwrap_err();
        assert!(err.to_string().contains("-port"));
    }

    #[test]
    fn non_numeric_port_is_an_error() {
        let err = parse(strings(&[
            "-port",
            "zzz",
            "-pluginUUID",
            "u",
            "-registerEvent",
            "e",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("invalid port"));
    }

    #[test]
    fn unknown_flags_are_skipped() {
        let args = parse(strings(&[
            "-futureFlag",
            "whatever",
            "-port",
            "9",
            "-pluginUUID",
            "u",
            "-registerEvent",
            "e",
        ]))
        .unwrap();
        assert_eq!(args.port, 9);
    }
}
