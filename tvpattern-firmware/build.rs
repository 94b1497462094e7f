//! Build script for tvpattern-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time
//! - Generates the pattern catalog from the `[pattern.*]` sections
//! - Links the PicoVGA glue library

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIO lines on the RP2040
const GPIO_COUNT: i64 = 30;

/// Pattern keys in `[pattern.*]` sections
const PATTERN_KEYS: &[&str] = &["name", "width", "height", "data", "rows"];

fn main() {
    setup_linker();
    let patterns = validate_config();
    generate_patterns(&patterns);
    link_picovga();
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml configuration at compile time
///
/// Returns the checked pattern catalog.
fn validate_config() -> Vec<Pattern> {
    // Re-run if board.toml changes
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the tvpattern-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_buttons(&config, &mut errors);
    validate_sampler(&config, &mut errors);
    validate_video(&config, &mut errors);
    report("Invalid board configuration", &errors);

    let mut errors = Vec::new();
    let patterns = validate_patterns(&config, &mut errors);
    report("Invalid pattern catalog", &errors);

    println!(
        "cargo:warning=board.toml validated successfully ({} patterns)",
        patterns.len()
    );
    patterns
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a boxed list of errors
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Get a section as a table, if present
fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Table> {
    config.get(name).and_then(|s| s.as_table())
}

/// Check a pin string like `"^!gpio26"`, returning the line number
fn check_pin(value: &toml::Value, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    let Some(s) = value.as_str() else {
        errors.push(format!("{} must be a pin string", key));
        return None;
    };

    let number = s
        .trim_start_matches(['!', '^'])
        .strip_prefix("gpio")
        .and_then(|n| n.parse::<i64>().ok());

    match number {
        Some(n) if (0..GPIO_COUNT).contains(&n) => Some(n),
        _ => {
            errors.push(format!("{} = '{}' is not a valid gpio", key, s));
            None
        }
    }
}

/// Validate the `[buttons]` and `[indicator]` sections
fn validate_buttons(config: &toml::Value, errors: &mut Vec<String>) {
    let mut lines = Vec::new();

    if let Some(buttons) = section(config, "buttons") {
        for (key, value) in buttons {
            if !["next", "prev", "mode"].contains(&key.as_str()) {
                errors.push(format!("[buttons] unknown key '{}'", key));
                continue;
            }
            if let Some(n) = check_pin(value, &format!("[buttons] {}", key), errors) {
                if lines.contains(&n) {
                    errors.push(format!("[buttons] gpio{} used by two buttons", n));
                }
                lines.push(n);
            }
        }
    }

    let Some(indicator) = section(config, "indicator") else {
        return;
    };

    for (key, value) in indicator {
        match key.as_str() {
            "release" => {
                if !matches!(value.as_str(), Some("ignore" | "mirror")) {
                    errors.push("[indicator] release must be 'ignore' or 'mirror'".to_string());
                }
            }
            "next" | "prev" | "mode" => {
                // next and prev fall back to default lines, mode has none
                let has_mode = section(config, "buttons").is_some_and(|b| b.contains_key("mode"));
                if key == "mode" && !has_mode {
                    errors.push("[indicator] mode set but no mode button".to_string());
                }
                if let Some(n) = check_pin(value, &format!("[indicator] {}", key), errors) {
                    if lines.contains(&n) {
                        errors.push(format!("[indicator] gpio{} is a button input", n));
                    }
                }
            }
            _ => errors.push(format!("[indicator] unknown key '{}'", key)),
        }
    }
}

/// Validate the `[sampler]` section
fn validate_sampler(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(sampler) = section(config, "sampler") else {
        return;
    };

    for (key, value) in sampler {
        match (key.as_str(), value.as_integer()) {
            ("interval_us", Some(us)) if (100..=100_000).contains(&us) => {}
            ("interval_us", _) => {
                errors.push("[sampler] interval_us must be 100-100000".to_string())
            }
            _ => errors.push(format!("[sampler] unknown key '{}'", key)),
        }
    }
}

/// Validate the `[video]` section
fn validate_video(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(video) = section(config, "video") else {
        return;
    };

    for (key, value) in video {
        let Some(n) = value.as_integer() else {
            errors.push(format!("[video] {} must be an integer", key));
            continue;
        };
        match key.as_str() {
            "default_mode" if (0..=255).contains(&n) => {}
            "first_pin" if (0..GPIO_COUNT).contains(&n) => {}
            "pin_count" if (1..=GPIO_COUNT).contains(&n) => {}
            "default_mode" | "first_pin" | "pin_count" => {
                errors.push(format!("[video] {} = {} out of range", key, n))
            }
            _ => errors.push(format!("[video] unknown key '{}'", key)),
        }
    }

    let first = video.get("first_pin").and_then(|v| v.as_integer()).unwrap_or(0);
    let count = video.get("pin_count").and_then(|v| v.as_integer()).unwrap_or(9);
    if first + count > GPIO_COUNT {
        errors.push(format!("[video] gpio{}..gpio{} past last gpio", first, first + count - 1));
    }
}

/// Pattern entry after validation
struct Pattern {
    name: String,
    width: u16,
    height: u16,
    data: PathBuf,
    data_len: usize,
    rows: Vec<u16>,
}

/// Validate the `[pattern.*]` sections and their asset files
///
/// Patterns keep their board.toml order.
fn validate_patterns(config: &toml::Value, errors: &mut Vec<String>) -> Vec<Pattern> {
    let patterns = match section(config, "pattern") {
        Some(t) if !t.is_empty() => t,
        _ => {
            errors.push("Missing [pattern.*] section - at least one pattern is required".into());
            return Vec::new();
        }
    };

    let mut loaded = Vec::new();
    for (id, pattern) in patterns {
        match load_pattern(id, pattern) {
            Ok(p) => loaded.push(p),
            Err(e) => errors.push(e),
        }
    }
    loaded
}

/// Read one pattern and check its row table against its RLE data
fn load_pattern(id: &str, pattern: &toml::Value) -> Result<Pattern, String> {
    let table = pattern
        .as_table()
        .ok_or_else(|| format!("[pattern.{}] must be a table", id))?;

    if let Some(key) = table.keys().find(|k| !PATTERN_KEYS.contains(&k.as_str())) {
        return Err(format!("[pattern.{}] unknown key '{}'", id, key));
    }

    let name = table
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("[pattern.{}] missing 'name'", id))?;
    let dimension = |key: &str| -> Result<u16, String> {
        table
            .get(key)
            .and_then(|v| v.as_integer())
            .and_then(|n| u16::try_from(n).ok())
            .filter(|&n| n > 0)
            .ok_or_else(|| format!("[pattern.{}] '{}' must be 1-65535", id, key))
    };
    let width = dimension("width")?;
    let height = dimension("height")?;
    let asset = |key: &str| -> Result<PathBuf, String> {
        let path = table
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| format!("[pattern.{}] missing '{}'", id, key))?;
        let path = manifest_dir().join(path);
        println!("cargo:rerun-if-changed={}", path.display());
        if path.is_file() {
            Ok(path)
        } else {
            Err(format!("[pattern.{}] {} file not found", id, key))
        }
    };
    let data = asset("data")?;
    let rows_path = asset("rows")?;

    let data_len = fs::metadata(&data)
        .map_err(|e| format!("[pattern.{}] data: {}", id, e))?
        .len() as usize;
    let raw_rows =
        fs::read(&rows_path).map_err(|e| format!("[pattern.{}] rows: {}", id, e))?;
    if raw_rows.len() % 2 != 0 {
        return Err(format!("[pattern.{}] rows file has odd length", id));
    }
    let rows: Vec<u16> = raw_rows
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    // Row table carries one terminating offset past the last row
    let entries = height as usize + 1;
    if rows.len() < entries {
        return Err(format!(
            "[pattern.{}] {} row entries, need {}",
            id,
            rows.len(),
            entries
        ));
    }
    if rows[..entries].windows(2).any(|w| w[0] > w[1]) {
        return Err(format!("[pattern.{}] row offsets not ascending", id));
    }
    // Offsets count 32-bit words of RLE data
    if rows[entries - 1] as usize * 4 > data_len {
        return Err(format!("[pattern.{}] row offsets run past data", id));
    }

    Ok(Pattern {
        name: name.to_string(),
        width,
        height,
        data,
        data_len,
        rows: rows[..entries].to_vec(),
    })
}

fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap())
}

/// Write `$OUT_DIR/patterns.rs` with the `PATTERNS` catalog
fn generate_patterns(patterns: &[Pattern]) {
    let mut out = String::new();
    out.push_str("// Generated by build.rs from board.toml\n\n");

    for (i, p) in patterns.iter().enumerate() {
        writeln!(
            out,
            "static PATTERN_{}_DATA: Aligned<[u8; {}]> = Aligned(*include_bytes!({:?}));",
            i,
            p.data_len,
            p.data.display().to_string()
        )
        .unwrap();
    }

    writeln!(
        out,
        "\n/// Test patterns, in button order\npub static PATTERNS: [ImageDescriptor; {}] = [",
        patterns.len()
    )
    .unwrap();
    for (i, p) in patterns.iter().enumerate() {
        let rows = p
            .rows
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "    ImageDescriptor {{\n        name: {:?},\n        width: {},\n        height: {},\n        rows: &[{}],\n        data: &PATTERN_{}_DATA.0,\n    }},",
            p.name, p.width, p.height, rows, i
        )
        .unwrap();
    }
    out.push_str("];\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("patterns.rs"), out).unwrap();
}

/// Link the prebuilt PicoVGA glue library
fn link_picovga() {
    println!("cargo:rerun-if-env-changed=PICOVGA_LIB_DIR");

    match env::var("PICOVGA_LIB_DIR") {
        Ok(dir) => {
            println!("cargo:rustc-link-search=native={}", dir);
            println!("cargo:rustc-link-lib=static=picovga_glue");
        }
        Err(_) => {
            println!(
                "cargo:warning=PICOVGA_LIB_DIR not set; linking will fail without libpicovga_glue.a"
            );
        }
    }
}
