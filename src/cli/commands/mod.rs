pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_FRONTEND_ORIGIN: &str = "frontend-origin";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("formgate")
        .about("Login and profile forms with shared field validation")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("FORMGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_FRONTEND_ORIGIN)
                .long("frontend-origin")
                .help("Origin allowed to call the API from a browser, example: https://forms.example.com")
                .long_help(
                    "Origin allowed to call the API from a browser. When unset no CORS headers are sent.",
                )
                .env("FORMGATE_FRONTEND_ORIGIN"),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "formgate");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Login and profile forms with shared field validation".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_port_and_origin() {
        temp_env::with_vars(
            [
                ("FORMGATE_PORT", None::<&str>),
                ("FORMGATE_FRONTEND_ORIGIN", None::<&str>),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "formgate",
                    "--port",
                    "9090",
                    "--frontend-origin",
                    "https://forms.example.com",
                ]);

                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(9090));
                assert_eq!(
                    matches.get_one::<String>(ARG_FRONTEND_ORIGIN).cloned(),
                    Some("https://forms.example.com".to_string())
                );
            },
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("FORMGATE_PORT", None::<&str>),
                ("FORMGATE_FRONTEND_ORIGIN", None::<&str>),
                ("FORMGATE_LOG_LEVEL", None::<&str>),
            ],
            || {
                let matches = new().get_matches_from(vec!["formgate"]);

                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
                assert_eq!(matches.get_one::<String>(ARG_FRONTEND_ORIGIN), None);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(0)
                );
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("FORMGATE_PORT", Some("443")),
                ("FORMGATE_FRONTEND_ORIGIN", Some("http://localhost:3000")),
                ("FORMGATE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["formgate"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>(ARG_FRONTEND_ORIGIN).cloned(),
                    Some("http://localhost:3000".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("FORMGATE_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["formgate"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("FORMGATE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["formgate".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_rejects_invalid_log_level() {
        temp_env::with_vars([("FORMGATE_LOG_LEVEL", Some("loud"))], || {
            assert!(new().try_get_matches_from(vec!["formgate"]).is_err());
        });
    }
}
