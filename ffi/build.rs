//! Generates `include/geoclient.h` from the `extern "C"` surface.

use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let config = cbindgen::Config {
        language: cbindgen::Language::C,
        include_guard: Some("GEOCLIENT_H".to_string()),
        cpp_compat: true,
        ..Default::default()
    };

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            let include_dir = crate_dir.join("include");
            if let Err(err) = std::fs::create_dir_all(&include_dir) {
                println!("cargo:warning=cannot create {}: {err}", include_dir.display());
                return;
            }
            bindings.write_to_file(include_dir.join("geoclient.h"));
        }
        Err(err) => println!("cargo:warning=skipping C header generation: {err}"),
    }
}
