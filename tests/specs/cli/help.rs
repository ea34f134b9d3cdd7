//! CLI help output specs

use crate::prelude::*;

#[test]
fn ap_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn ap_help_lists_every_command() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("activate")
        .stdout_has("close")
        .stdout_has("return")
        .stdout_has("list")
        .stdout_has("check")
        .stdout_has("reload");
}

#[test]
fn ap_activate_help_names_the_argument() {
    cli()
        .args(&["activate", "--help"])
        .passes()
        .stdout_has("<PROJECT>");
}

#[test]
fn help_needs_no_config() {
    cli()
        .env("AP_CONFIG", "/nonexistent/config.toml")
        .args(&["--help"])
        .passes();
}
