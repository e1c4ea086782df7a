//! Build script for nunchuk-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates nunchuk.toml and compiles it into `SESSION_CONFIG`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted at the top level of nunchuk.toml
const SESSION_KEYS: &[&str] = &[
    "address",
    "cycle_interval_ms",
    "button_c_window_ms",
    "button_z_window_ms",
    "connect_attempts",
    "clock",
    "verbosity",
    "calibration",
];

/// Keys accepted in [calibration]
const CALIBRATION_KEYS: &[&str] = &[
    "joystick_x_neutral",
    "joystick_y_neutral",
    "accel_x_neutral",
    "accel_y_neutral",
    "accel_z_neutral",
];

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate nunchuk.toml at compile time
fn validate_config() -> toml::Table {
    println!("cargo:rerun-if-changed=nunchuk.toml");

    let config_path = Path::new("nunchuk.toml");

    if !config_path.exists() {
        fail(
            "nunchuk.toml not found",
            &["The firmware requires a nunchuk.toml next to Cargo.toml.".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read nunchuk.toml", &[e.to_string()]),
    };

    let config: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => fail(
            "Invalid TOML syntax in nunchuk.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_session(&config, &mut errors);
    validate_calibration(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid session configuration", &errors);
    }

    println!("cargo:warning=nunchuk.toml validated successfully");
    config
}

fn validate_session(config: &toml::Table, errors: &mut Vec<String>) {
    for key in config.keys() {
        if !SESSION_KEYS.contains(&key.as_str()) {
            errors.push(format!("unknown key '{}'", key));
        }
    }

    check_integer(config, "address", 0x08, 0x77, "", errors);
    check_integer(config, "cycle_interval_ms", 1, 60_000, "", errors);
    check_integer(config, "button_c_window_ms", 0, 60_000, "", errors);
    check_integer(config, "button_z_window_ms", 0, 60_000, "", errors);
    check_integer(config, "connect_attempts", 1, 10, "", errors);

    check_choice(config, "clock", &["Standard100kHz", "Fast400kHz"], errors);
    check_choice(config, "verbosity", &["errors", "info", "verbose"], errors);
}

fn validate_calibration(config: &toml::Table, errors: &mut Vec<String>) {
    let calibration = match config.get("calibration") {
        None => return,
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[calibration] must be a table".to_string());
            return;
        }
    };

    for key in calibration.keys() {
        if !CALIBRATION_KEYS.contains(&key.as_str()) {
            errors.push(format!("[calibration] unknown key '{}'", key));
        }
    }

    let section = "[calibration] ";
    check_integer(calibration, "joystick_x_neutral", 0, 255, section, errors);
    check_integer(calibration, "joystick_y_neutral", 0, 255, section, errors);
    check_integer(calibration, "accel_x_neutral", 0, 1023, section, errors);
    check_integer(calibration, "accel_y_neutral", 0, 1023, section, errors);
    check_integer(calibration, "accel_z_neutral", 0, 1023, section, errors);
}

fn check_integer(
    table: &toml::Table,
    key: &str,
    min: i64,
    max: i64,
    section: &str,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("{}{} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("{}{} must be an integer", section, key)),
    }
}

fn check_choice(table: &toml::Table, key: &str, choices: &[&str], errors: &mut Vec<String>) {
    match table.get(key) {
        None => {}
        Some(toml::Value::String(s)) if choices.contains(&s.as_str()) => {}
        Some(_) => errors.push(format!("{} must be one of {}", key, choices.join(", "))),
    }
}

/// Emit `SESSION_CONFIG` as a chain of const builders over the defaults
fn generate_config(config: &toml::Table) {
    let int = |table: &toml::Table, key: &str| table.get(key).and_then(toml::Value::as_integer);

    let mut expr = String::from("SessionConfig::DEFAULT");

    if let Some(v) = int(config, "address") {
        expr.push_str(&format!("\n    .with_address({:#04x})", v));
    }
    if let Some(v) = int(config, "cycle_interval_ms") {
        expr.push_str(&format!("\n    .with_cycle_interval_ms({})", v));
    }

    let c_window = int(config, "button_c_window_ms");
    let z_window = int(config, "button_z_window_ms");
    if c_window.is_some() || z_window.is_some() {
        let window = |value: Option<i64>, default: &str| {
            value
                .map(|v| v.to_string())
                .unwrap_or_else(|| default.to_string())
        };
        expr.push_str(&format!(
            "\n    .with_button_windows({}, {})",
            window(c_window, "SessionConfig::DEFAULT.button_c_window_ms"),
            window(z_window, "SessionConfig::DEFAULT.button_z_window_ms")
        ));
    }

    if let Some(v) = int(config, "connect_attempts") {
        expr.push_str(&format!("\n    .with_connect_attempts({})", v));
    }
    if let Some(v) = config.get("clock").and_then(toml::Value::as_str) {
        expr.push_str(&format!("\n    .with_clock(ClockMode::{})", v));
    }
    if let Some(v) = config.get("verbosity").and_then(toml::Value::as_str) {
        let variant = match v {
            "errors" => "Errors",
            "verbose" => "Verbose",
            _ => "Info",
        };
        expr.push_str(&format!("\n    .with_verbosity(Verbosity::{})", variant));
    }

    if let Some(cal) = config.get("calibration").and_then(toml::Value::as_table) {
        let field = |key: &str, default: &str| {
            int(cal, key)
                .map(|v| v.to_string())
                .unwrap_or_else(|| default.to_string())
        };
        expr.push_str(&format!(
            "\n    .with_calibration(Calibration {{\n        \
             joystick_x_neutral: {},\n        \
             joystick_y_neutral: {},\n        \
             accel_x_neutral: {},\n        \
             accel_y_neutral: {},\n        \
             accel_z_neutral: {},\n    \
             }})",
            field("joystick_x_neutral", "Calibration::DEFAULT.joystick_x_neutral"),
            field("joystick_y_neutral", "Calibration::DEFAULT.joystick_y_neutral"),
            field("accel_x_neutral", "Calibration::DEFAULT.accel_x_neutral"),
            field("accel_y_neutral", "Calibration::DEFAULT.accel_y_neutral"),
            field("accel_z_neutral", "Calibration::DEFAULT.accel_z_neutral"),
        ));
    }

    let code = format!(
        "/// Session configuration from nunchuk.toml\n\
         pub const SESSION_CONFIG: SessionConfig = {};\n",
        expr
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("session_config.rs"), code).unwrap();
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
