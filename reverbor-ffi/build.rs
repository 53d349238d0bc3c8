// Build script that tries to generate a C header with `cbindgen`.
// If `cbindgen` is not available, it falls back to copying the
// checked-in `include/reverbor.h` to $OUT_DIR.
//
// Either way, consumers can include the header from:
//   - <repo>/reverbor-ffi/include/reverbor.h   (checked-in)
//   - $OUT_DIR/reverbor.h

use std::{env, fs, path::PathBuf, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=include/reverbor.h");

    let (Some(crate_dir), Some(out_dir)) = (env::var_os("CARGO_MANIFEST_DIR"), env::var_os("OUT_DIR")) else {
        println!("cargo:warning=reverbor-ffi: cargo did not provide CARGO_MANIFEST_DIR/OUT_DIR; skipping header");
        return;
    };
    let crate_dir = PathBuf::from(crate_dir);
    let header_path_repo = crate_dir.join("include").join("reverbor.h");
    let header_path_out = PathBuf::from(out_dir).join("reverbor.h");

    let cbindgen_ok = Command::new("cbindgen")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    if cbindgen_ok {
        let generated = Command::new("cbindgen")
            .arg("--crate")
            .arg("reverbor-ffi")
            .arg("--lang")
            .arg("C")
            .arg("--output")
            .arg(&header_path_out)
            .current_dir(&crate_dir)
            .status()
            .map(|s| s.success())
            .unwrap_or(false);

        if generated {
            if let Some(parent) = header_path_repo.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = fs::copy(&header_path_out, &header_path_repo);
            println!("cargo:warning=reverbor-ffi: generated header with cbindgen -> {}", header_path_out.display());
            return;
        }
        println!("cargo:warning=reverbor-ffi: cbindgen failed; falling back to checked-in header");
    }

    if let Err(e) = fs::copy(&header_path_repo, &header_path_out) {
        println!("cargo:warning=reverbor-ffi: could not copy include/reverbor.h to OUT_DIR: {e}");
    }
}
