//! INI loading tests against real files on disk.

use std::io::Write;

use cosmon::adapters::ini_config::IniConfigAdapter;
use cosmon::app::ports::{ConfigError, ConfigPort};
use cosmon::config::CosmonConfig;
use cosmon::pins;
use tempfile::NamedTempFile;

fn write_conf(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(body.as_bytes()).expect("write config");
    file.flush().expect("flush config");
    file
}

fn load(body: &str) -> CosmonConfig {
    let file = write_conf(body);
    IniConfigAdapter::new(file.path())
        .load()
        .expect("config should load")
}

#[test]
fn full_file_is_applied() {
    let c = load(
        "[gpio]\n\
         gpio_COS = 21\n\
         gpio_network = 4\n\
         gpio_shutdown = 6\n\
         \n\
         [functions]\n\
         enable_network_status_LED = yes\n\
         enable_shutdown_switch = true\n\
         \n\
         [COS settings]\n\
         COS_poll_loop_interval_ms = 50\n\
         COS_timeout_ms = 60000\n\
         COS_timeout_enable = no\n\
         network_check_divisor = 10\n\
         shutdown_switch_activate_count = 40\n",
    );

    assert_eq!(c.cos_pin, 21);
    assert_eq!(c.network_pin, 4);
    assert_eq!(c.shutdown_pin, 6);
    assert!(c.network_indicator_enabled);
    assert!(c.shutdown_enabled);
    assert_eq!(c.loop_delay_ms, 50);
    assert_eq!(c.cos_timeout_ms, 60_000);
    assert!(!c.cos_timeout_enabled);
    assert_eq!(c.network_check_divisor, 10);
    assert_eq!(c.shutdown_activate_count, 40);
    assert_eq!(c.timeout_ticks(), 1200);
}

#[test]
fn partial_file_keeps_defaults_for_the_rest() {
    let c = load("[COS settings]\nCOS_timeout_ms = 30000\n");
    let d = CosmonConfig::default();

    assert_eq!(c.cos_timeout_ms, 30_000);
    assert_eq!(c.cos_pin, d.cos_pin);
    assert_eq!(c.loop_delay_ms, d.loop_delay_ms);
    assert_eq!(c.commands, d.commands);
    assert!(!c.shutdown_enabled);
}

#[test]
fn malformed_values_fall_back_individually() {
    let c = load(
        "[gpio]\n\
         gpio_COS = banana\n\
         gpio_network = 99\n\
         \n\
         [COS settings]\n\
         COS_poll_loop_interval_ms = 0\n\
         network_check_divisor = 0\n\
         shutdown_switch_activate_count = 12\n",
    );

    assert_eq!(c.cos_pin, pins::DEFAULT_COS_PIN);
    assert_eq!(c.network_pin, pins::DEFAULT_NETWORK_PIN);
    assert_eq!(c.loop_delay_ms, 100);
    assert_eq!(c.network_check_divisor, 20);
    assert_eq!(c.shutdown_activate_count, 12);
}

#[test]
fn command_overrides_are_read() {
    let c = load(
        "[commands]\n\
         key_command = /usr/local/bin/key.sh\n\
         unkey_command = /usr/local/bin/unkey.sh\n\
         \n\
         [service]\n\
         control_socket = /tmp/asterisk.ctl\n",
    );

    assert_eq!(c.commands.key, "/usr/local/bin/key.sh");
    assert_eq!(c.commands.unkey, "/usr/local/bin/unkey.sh");
    assert_eq!(
        c.commands.poweroff,
        CosmonConfig::default().commands.poweroff
    );
    assert_eq!(c.control_socket, "/tmp/asterisk.ctl");
}

#[test]
fn trailing_comments_do_not_reset_values() {
    let c = load(
        "[COS settings]\n\
         COS_timeout_ms = 60000 ; one minute\n\
         COS_poll_loop_interval_ms = 50 ; faster polling\n",
    );

    assert_eq!(c.cos_timeout_ms, 60_000);
    assert_eq!(c.loop_delay_ms, 50);
    assert_eq!(c.timeout_ticks(), 1200);
}

#[test]
fn missing_file_reports_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let adapter = IniConfigAdapter::new(dir.path().join("COSmon.conf"));
    assert_eq!(adapter.load(), Err(ConfigError::NotFound));
}

