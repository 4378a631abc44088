// build.rs

use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Get the output directory set by Cargo
    let out_dir = env::var("OUT_DIR").unwrap();
    // Construct the path for the file where we'll write the build info
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    // Stamp the watch face build so the shell can report it at startup
    let build_date = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    fs::write(
        &dest_path,
        format!("pub const BUILD_DATE: &str = \"{}\";", build_date),
    ).unwrap();

    // Only re-run when the script itself changes, the date is informational
    println!("cargo:rerun-if-changed=build.rs");
}
